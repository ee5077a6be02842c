//! The [`Record`] trait: how the engine reads a catalog item.
//!
//! It is typically implemented with `#[derive(Record)]` from the
//! `campus-macros` crate, but can also be implemented by hand.

use crate::value::Value;

/// A catalog item that can be searched, filtered and sorted.
///
/// # Derive Usage
///
/// ```ignore
/// use campus_macros::Record;
///
/// #[derive(Record)]
/// struct Course {
///     #[record(text)]
///     title: String,
///     #[record(text)]
///     code: String,
///     #[record(category)]
///     semester: String,
/// }
///
/// assert_eq!(Course::SEMESTER, "semester");
/// ```
///
/// # Manual Implementation
///
/// ```
/// use campus_query::{Record, Value};
///
/// struct Scholarship {
///     title: String,
///     deadline: String,
/// }
///
/// impl Record for Scholarship {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "title" => Value::Text(&self.title),
///             "deadline" => Value::Text(&self.deadline),
///             _ => Value::None,
///         }
///     }
///
///     fn text_fields(&self) -> &'static [&'static str] {
///         &["title"]
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of a field for filtering and sorting.
    ///
    /// Unknown fields must return [`Value::None`], which never satisfies a
    /// constrained filter and sorts last.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// The fields searched by a free-text term.
    ///
    /// Defaults to none, in which case only an empty term matches.
    fn text_fields(&self) -> &'static [&'static str] {
        &[]
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field_value(&self, field: &str) -> Value<'_> {
        (**self).field_value(field)
    }

    fn text_fields(&self) -> &'static [&'static str] {
        (**self).text_fields()
    }
}
