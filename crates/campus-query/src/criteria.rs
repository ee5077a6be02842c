//! Criteria builder and executor.
//!
//! [`Criteria`] is the explicit, serializable description of what a list page
//! shows: a free-text search term, categorical field filters and an optional
//! sort key. [`filter_records`] and [`Criteria::apply`] run it against a
//! collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::filter::{FieldFilter, SearchTerm};
use crate::ordering::{Dir, OrderBy};
use crate::traits::Record;

/// Search and filter criteria for one query.
///
/// The match logic is:
///
/// ```text
/// match = (search term is empty OR some text field contains it)
///       ∧ (every field filter is "all" OR equals the record's field)
/// ```
///
/// # Example
///
/// ```
/// use campus_query::{Criteria, Record, Value};
///
/// struct Course {
///     title: &'static str,
///     semester: &'static str,
/// }
///
/// impl Record for Course {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "title" => Value::Text(self.title),
///             "semester" => Value::Text(self.semester),
///             _ => Value::None,
///         }
///     }
///
///     fn text_fields(&self) -> &'static [&'static str] {
///         &["title"]
///     }
/// }
///
/// let courses = [
///     Course { title: "Programmation Web Avancée", semester: "S1" },
///     Course { title: "Management de Projet", semester: "S2" },
/// ];
///
/// let criteria = Criteria::new().search("web").filter("semester", "S1");
/// let found = criteria.apply(&courses);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].semester, "S1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Criteria {
    /// Free-text search term; empty matches everything.
    pub search_term: String,
    /// Selected value per categorical field; `"all"` means unconstrained.
    pub field_filters: BTreeMap<String, String>,
    /// Optional sort key applied by [`Criteria::apply`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderBy>,
}

impl Criteria {
    /// Creates empty criteria. Empty criteria match every record.
    pub fn new() -> Self {
        Criteria::default()
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Sets the free-text search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Selects a value for a categorical field.
    ///
    /// A later selection for the same field replaces the earlier one.
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.field_filters.insert(field.into(), value.into());
        self
    }

    /// Adds an already-parsed field filter.
    pub fn with_filter(self, filter: FieldFilter) -> Self {
        self.filter(filter.field, filter.value)
    }

    /// Selects a value only when one is given. `None` leaves the field
    /// unconstrained.
    pub fn filter_opt(self, field: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.filter(field, value),
            None => self,
        }
    }

    /// Sets the sort key used by [`Criteria::apply`].
    pub fn order_by(mut self, field: impl Into<String>, dir: Dir) -> Self {
        self.order = Some(OrderBy::new(field, dir));
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// The field filters as [`FieldFilter`] values, in field-name order.
    pub fn field_filters(&self) -> impl Iterator<Item = FieldFilter> + '_ {
        self.field_filters
            .iter()
            .map(|(field, value)| FieldFilter::new(field.as_str(), value.as_str()))
    }

    /// Returns `true` if these criteria constrain nothing (match everything).
    pub fn is_empty(&self) -> bool {
        SearchTerm::new(&self.search_term).is_empty()
            && self.field_filters().all(|f| f.is_unconstrained())
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single record matches these criteria.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        Matcher::new(self).matches(record)
    }

    /// Filters and, if an order key is set, sorts the records.
    pub fn apply<'a, T: Record>(&self, records: &'a [T]) -> Vec<&'a T> {
        let matching = filter_records(records, self);
        match &self.order {
            Some(order) => order.sort(matching),
            None => matching,
        }
    }

    /// Counts the number of matching records.
    pub fn count<T: Record>(&self, records: &[T]) -> usize {
        let matcher = Matcher::new(self);
        records.iter().filter(|r| matcher.matches(*r)).count()
    }

    /// Finds the first matching record in source order.
    pub fn find<'a, T: Record>(&self, records: &'a [T]) -> Option<&'a T> {
        let matcher = Matcher::new(self);
        records.iter().find(|r| matcher.matches(*r))
    }
}

/// Criteria prepared for evaluation: the term normalized once, unconstrained
/// filters dropped.
struct Matcher {
    term: SearchTerm,
    filters: Vec<FieldFilter>,
}

impl Matcher {
    fn new(criteria: &Criteria) -> Self {
        Matcher {
            term: SearchTerm::new(&criteria.search_term),
            filters: criteria
                .field_filters()
                .filter(|f| !f.is_unconstrained())
                .collect(),
        }
    }

    fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.term.matches(record) && self.filters.iter().all(|f| f.matches_record(record))
    }
}

/// Returns the records matching `criteria`, in their original order.
///
/// This never sorts, even when `criteria.order` is set; use
/// [`Criteria::apply`] for filter-then-sort. The input is not modified and
/// the result borrows from it.
pub fn filter_records<'a, T: Record>(records: &'a [T], criteria: &Criteria) -> Vec<&'a T> {
    let matcher = Matcher::new(criteria);
    records.iter().filter(|r| matcher.matches(*r)).collect()
}
