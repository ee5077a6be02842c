//! Proc macros for campus-query.
//!
//! # Available Macros
//!
//! - [`Record`] - Implement `campus_query::Record` from struct field annotations
//!
//! # Examples
//!
//! For working examples, see `campus-portal/tests/record_derive.rs`.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Record` trait for catalog structs.
///
/// This macro generates an implementation of the `Record` trait from
/// `campus-query`, exposing annotated fields to search, filters and sort keys.
/// Annotated fields must implement `AsRef<str>`.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `text` | Free-text field, searched by substring |
/// | `category` | Categorical field, matched exactly by field filters |
/// | `key` | Orderable field (date, time), used as a sort key |
/// | `skip` | Exclude this field from queries |
/// | `rename = "..."` | Use a custom name for queries |
///
/// Fields without a `#[record(...)]` attribute are not visible to queries.
/// Every visible field can be filtered on and sorted by; the kind only
/// decides whether it takes part in search.
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. Field name constants (e.g., `Course::SEMESTER`, `Course::TITLE`)
/// 2. `Record::field_value()` returning the field as text
/// 3. `Record::text_fields()` listing the `text` fields in declaration order
///
/// # Example
///
/// ```ignore
/// use campus_macros::Record;
/// use campus_query::Criteria;
///
/// #[derive(Record)]
/// struct Course {
///     #[record(skip)]
///     id: String,
///
///     #[record(text)]
///     title: String,
///
///     #[record(category)]
///     semester: String,
///
///     #[record(category, rename = "type")]
///     kind: String,
/// }
///
/// let criteria = Criteria::new()
///     .search("web")
///     .filter(Course::SEMESTER, "S1");
/// let found = criteria.apply(&courses);
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
