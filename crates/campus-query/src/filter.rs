//! Predicates that make up a query.
//!
//! A [`SearchTerm`] is a case-insensitive substring test over a record's
//! free-text fields. A [`FieldFilter`] is an exact-match test on a single
//! categorical field, with [`ALL`] as the "no constraint" sentinel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::traits::Record;
use crate::value::Value;

/// Sentinel filter value that matches every record.
///
/// Compared ASCII case-insensitively, so `All` coming from a dropdown is
/// accepted too.
pub const ALL: &str = "all";

/// Returns `true` if `value` is the [`ALL`] sentinel.
pub fn is_all(value: &str) -> bool {
    value.eq_ignore_ascii_case(ALL)
}

/// A free-text search over a record's text fields.
///
/// The term is lowercased once at construction; each field is lowercased at
/// match time. Whitespace is part of the term: only `""` matches everything.
///
/// # Example
///
/// ```
/// use campus_query::SearchTerm;
///
/// let term = SearchTerm::new("WEB");
/// assert!(term.matches_text("Programmation Web Avancée"));
/// assert!(!term.matches_text("Management de Projet"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm {
    needle: String,
}

impl SearchTerm {
    /// Creates a search term from raw user input.
    pub fn new(term: &str) -> Self {
        SearchTerm {
            needle: term.to_lowercase(),
        }
    }

    /// Returns `true` if the term is empty (matches everything).
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// The lowercased term.
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Tests a single piece of text.
    pub fn matches_text(&self, text: &str) -> bool {
        self.is_empty() || text.to_lowercase().contains(&self.needle)
    }

    /// Tests a record: matches if any of its text fields contains the term.
    ///
    /// Text fields that are missing or not textual are skipped.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        if self.is_empty() {
            return true;
        }
        record.text_fields().iter().any(|field| {
            record
                .field_value(field)
                .as_str()
                .is_some_and(|text| text.to_lowercase().contains(&self.needle))
        })
    }
}

/// An exact-match constraint on one categorical field.
///
/// # Example
///
/// ```
/// use campus_query::{FieldFilter, Value};
///
/// let filter: FieldFilter = "semester=S1".parse().unwrap();
/// assert!(filter.matches(&Value::Text("S1")));
/// assert!(!filter.matches(&Value::Text("S2")));
/// assert!(FieldFilter::all("semester").matches(&Value::Text("S2")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldFilter {
    /// The field name to compare.
    pub field: String,
    /// The selected value, or [`ALL`].
    pub value: String,
}

impl FieldFilter {
    /// Creates a new filter.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        FieldFilter {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a filter that accepts every value of `field`.
    pub fn all(field: impl Into<String>) -> Self {
        FieldFilter::new(field, ALL)
    }

    /// Returns `true` if this filter places no constraint on the field,
    /// i.e. its value is the [`ALL`] sentinel.
    pub fn is_unconstrained(&self) -> bool {
        is_all(&self.value)
    }

    /// Evaluates this filter against a field value.
    ///
    /// Equality is case-sensitive: categorical values are codes, not prose.
    /// A missing or non-text value never satisfies a constrained filter.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        if self.is_unconstrained() {
            return true;
        }
        match field_value {
            Value::Text(s) => *s == self.value,
            _ => false,
        }
    }

    /// Evaluates this filter against a record.
    pub fn matches_record<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.matches(&record.field_value(&self.field))
    }
}

impl FromStr for FieldFilter {
    type Err = QueryError;

    /// Parses `field=value`. Whitespace around both halves is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| QueryError::InvalidFilter(s.to_string()))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(QueryError::EmptyField(s.to_string()));
        }
        Ok(FieldFilter::new(field, value.trim()))
    }
}

impl fmt::Display for FieldFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Post {
        title: &'static str,
        author: &'static str,
        category: Option<&'static str>,
    }

    impl Record for Post {
        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "title" => Value::Text(self.title),
                "author" => Value::Text(self.author),
                "category" => self.category.map_or(Value::None, Value::Text),
                _ => Value::None,
            }
        }

        fn text_fields(&self) -> &'static [&'static str] {
            &["title", "author", "missing"]
        }
    }

    fn post() -> Post {
        Post {
            title: "Besoin d'aide pour INF301",
            author: "Alice Martin",
            category: Some("Homework Help"),
        }
    }

    #[test]
    fn search_is_case_insensitive() {
        assert!(SearchTerm::new("inf301").matches(&post()));
        assert!(SearchTerm::new("ALICE").matches(&post()));
        assert!(!SearchTerm::new("bob").matches(&post()));
    }

    #[test]
    fn search_lowercases_non_ascii() {
        let term = SearchTerm::new("AVANCÉE");
        assert!(term.matches_text("Programmation Web Avancée"));
    }

    #[test]
    fn only_the_empty_term_matches_everything() {
        assert!(SearchTerm::new("").matches(&post()));
        assert!(SearchTerm::new("").is_empty());
        assert!(!SearchTerm::new(" ").is_empty());
    }

    #[test]
    fn whitespace_is_part_of_the_term() {
        assert_eq!(SearchTerm::new(" Web ").as_str(), " web ");
        assert!(!SearchTerm::new("avancée ").matches_text("Programmation Web Avancée"));
        assert!(SearchTerm::new("web ").matches_text("Programmation Web Avancée"));

        let blank = SearchTerm::new(" ");
        assert!(!blank.matches_text("MAT101"));
        assert!(blank.matches(&post()));
    }

    #[test]
    fn field_filter_exact_match() {
        let filter = FieldFilter::new("category", "Homework Help");
        assert!(filter.matches_record(&post()));

        let filter = FieldFilter::new("category", "homework help");
        assert!(!filter.matches_record(&post()));
    }

    #[test]
    fn sentinel_matches_anything() {
        assert!(FieldFilter::all("category").matches(&Value::None));
        assert!(FieldFilter::new("category", "All").matches(&Value::Text("x")));
    }

    #[test]
    fn empty_selection_is_an_exact_value() {
        let filter = FieldFilter::new("category", "");
        assert!(!filter.is_unconstrained());
        assert!(!filter.matches(&Value::Text("x")));
        assert!(filter.matches(&Value::Text("")));
        assert!(!filter.matches(&Value::None));
    }

    #[test]
    fn missing_field_never_matches_constrained_filter() {
        let mut p = post();
        p.category = None;
        assert!(!FieldFilter::new("category", "Events").matches_record(&p));
        assert!(!FieldFilter::new("nope", "Events").matches_record(&p));
    }

    #[test]
    fn timestamp_value_does_not_match_text_filter() {
        let filter = FieldFilter::new("date", "2024-03-05");
        assert!(!filter.matches(&Value::Timestamp(crate::Timestamp(0))));
    }

    #[test]
    fn parse_field_filter() {
        let f: FieldFilter = " semester = S1 ".parse().unwrap();
        assert_eq!(f, FieldFilter::new("semester", "S1"));
        assert_eq!(f.to_string(), "semester=S1");

        let f: FieldFilter = "type=Student Job".parse().unwrap();
        assert_eq!(f.value, "Student Job");
    }

    #[test]
    fn parse_field_filter_errors() {
        assert_eq!(
            "semester".parse::<FieldFilter>(),
            Err(QueryError::InvalidFilter("semester".to_string()))
        );
        assert_eq!(
            "=S1".parse::<FieldFilter>(),
            Err(QueryError::EmptyField("=S1".to_string()))
        );
    }
}
