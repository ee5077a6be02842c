//! Ordering types for query result sorting.
//!
//! Provides [`Dir`] for sort direction, [`OrderBy`] for field-based ordering
//! and [`sort_by_field`] for stable, non-mutating sorts.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::traits::Record;
use crate::value::{Timestamp, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (earliest / smallest first).
    #[default]
    Asc,
    /// Descending order (latest / largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dir {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Dir::Asc),
            "desc" | "descending" => Ok(Dir::Desc),
            _ => Err(QueryError::InvalidDirection(s.to_string())),
        }
    }
}

/// A sort key: the field to sort by and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ascending ordering for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Asc)
    }

    /// Creates a new descending ordering for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Desc)
    }

    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }

    /// Sorts records by this key. See [`sort_by_field`].
    pub fn sort<'a, T, I>(&self, records: I) -> Vec<&'a T>
    where
        T: Record + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        sort_by_field(records, |r: &'a T| r.field_value(&self.field), self.dir)
    }
}

/// The comparable form of a field value.
///
/// Variants are ordered: dates first, then other text, then missing values.
/// Dates compare chronologically and text lexicographically, which puts
/// zero-padded `HH:MM` times in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey<'a> {
    /// A timestamp, or text that parses as one.
    Date(Timestamp),
    /// Any other text.
    Text(&'a str),
    /// No value.
    Missing,
}

impl<'a> SortKey<'a> {
    /// Classifies a field value.
    pub fn of(value: &Value<'a>) -> Self {
        match value {
            Value::Timestamp(t) => SortKey::Date(*t),
            Value::Text(s) => match Timestamp::parse(s) {
                Some(t) => SortKey::Date(t),
                None => SortKey::Text(s),
            },
            Value::None => SortKey::Missing,
        }
    }

    /// Returns `true` for [`SortKey::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, SortKey::Missing)
    }

    /// Compares under a direction. Missing values stay last either way.
    pub fn compare(&self, other: &SortKey<'a>, dir: Dir) -> Ordering {
        match (self.is_missing(), other.is_missing()) {
            (false, false) => dir.apply(self.cmp(other)),
            (missing_a, missing_b) => missing_a.cmp(&missing_b),
        }
    }
}

/// Compares two field values in ascending order.
///
/// - Texts that parse as dates compare chronologically and sort before
///   texts that do not.
/// - Other texts compare lexicographically.
/// - `None` sorts after everything else.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    SortKey::of(a).compare(&SortKey::of(b), Dir::Asc)
}

/// Returns the records ordered by the value `key` extracts from each one.
///
/// The sort is stable: records with equal keys keep their relative input
/// order. The input is never modified; the result borrows from it.
///
/// # Example
///
/// ```
/// use campus_query::{sort_by_field, Dir, Value};
///
/// let deadlines = ["2024-04-30", "2024-03-20", "2024-05-15"];
/// let sorted = sort_by_field(&deadlines, |d| Value::Text(d), Dir::Asc);
/// assert_eq!(sorted, [&"2024-03-20", &"2024-04-30", &"2024-05-15"]);
/// ```
pub fn sort_by_field<'a, T, I, F>(records: I, key: F, dir: Dir) -> Vec<&'a T>
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&'a T) -> Value<'a>,
{
    let mut keyed: Vec<(SortKey<'a>, &'a T)> = records
        .into_iter()
        .map(|r| (SortKey::of(&key(r)), r))
        .collect();
    keyed.sort_by(|(ka, _), (kb, _)| ka.compare(kb, dir));
    keyed.into_iter().map(|(_, r)| r).collect()
}
