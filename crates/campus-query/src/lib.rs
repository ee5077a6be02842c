//! Campus query - search, filter and sort catalog records.
//!
//! Every list page of the student portal (courses, forum posts,
//! scholarships, timetable entries) shows a subset of a fixed collection
//! chosen by the same kind of criteria:
//!
//! - a free-text search term, matched case-insensitively as a substring of
//!   any of the record's text fields
//! - zero or more categorical filters, each either the sentinel `all` or an
//!   exact value
//! - optionally, a sort key (a date or a time of day)
//!
//! This crate is that logic, as pure functions over borrowed slices. It does
//! no I/O and never fails while filtering or sorting.
//!
//! # Quick Start
//!
//! ```rust
//! use campus_query::{filter_records, sort_by_field, Criteria, Dir, Record, Value};
//!
//! struct Scholarship {
//!     title: String,
//!     country: String,
//!     domain: String,
//!     deadline: String,
//! }
//!
//! impl Record for Scholarship {
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "title" => Value::Text(&self.title),
//!             "country" => Value::Text(&self.country),
//!             "domain" => Value::Text(&self.domain),
//!             "deadline" => Value::Text(&self.deadline),
//!             _ => Value::None,
//!         }
//!     }
//!
//!     fn text_fields(&self) -> &'static [&'static str] {
//!         &["title", "country"]
//!     }
//! }
//!
//! let offers = vec![
//!     Scholarship {
//!         title: "Stage Développeur Frontend".into(),
//!         country: "France".into(),
//!         domain: "Informatique".into(),
//!         deadline: "2024-04-30".into(),
//!     },
//!     Scholarship {
//!         title: "Assistant Marketing Digital".into(),
//!         country: "France".into(),
//!         domain: "Marketing".into(),
//!         deadline: "2024-03-20".into(),
//!     },
//! ];
//!
//! let criteria = Criteria::new().search("FRANCE").filter("domain", "all");
//! let matching = filter_records(&offers, &criteria);
//! assert_eq!(matching.len(), 2);
//!
//! let by_deadline = sort_by_field(matching, |s| s.field_value("deadline"), Dir::Asc);
//! assert_eq!(by_deadline[0].deadline, "2024-03-20");
//! ```
//!
//! # Semantics
//!
//! ```text
//! match = (term is empty ∨ ∃ text field containing term)
//!       ∧ (∀ filter: value is "all" ∨ field == value)
//! ```
//!
//! Filtering keeps source order. Sorting is opt-in, stable, and places
//! records without a sort value last.

mod criteria;
mod error;
mod facets;
mod filter;
mod ordering;
mod traits;
mod value;

// Re-export public API
pub use criteria::{filter_records, Criteria};
pub use error::{QueryError, Result};
pub use facets::{distinct_values, filter_options};
pub use filter::{is_all, FieldFilter, SearchTerm, ALL};
pub use ordering::{compare_values, sort_by_field, Dir, OrderBy, SortKey};
pub use traits::Record;
pub use value::{Timestamp, Value};
