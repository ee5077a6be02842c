//! Runtime value types for field comparison.
//!
//! The [`Value`] enum represents the runtime value of a field extracted from a
//! record. Catalog records are mostly strings: titles, codes, semesters, ISO
//! dates. [`Timestamp`] gives date-like strings a comparable form.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Runtime value for comparison, borrowed from the source record.
///
/// This enum represents the value of a field at query execution time.
/// The accessor function provided to query methods returns this type.
///
/// # Example
///
/// ```
/// use campus_query::Value;
///
/// struct Course {
///     title: String,
///     semester: String,
/// }
///
/// fn accessor<'a>(course: &'a Course, field: &str) -> Value<'a> {
///     match field {
///         "title" => Value::Text(&course.title),
///         "semester" => Value::Text(&course.semester),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    /// Text value (borrowed).
    Text(&'a str),
    /// Already-parsed point in time.
    Timestamp(Timestamp),
    /// Field not present, null, or unsupported.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` if this is a `Text` value.
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Extracts the text value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Interprets the value as a point in time.
    ///
    /// Text values are parsed with [`Timestamp::parse`]; anything else that is
    /// not already a timestamp yields `None`.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(t) => Some(*t),
            Value::Text(s) => Timestamp::parse(s),
            Value::None => None,
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Text(s)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::Text(s.as_str())
    }
}

impl<'a, T> From<Option<T>> for Value<'a>
where
    T: Into<Value<'a>>,
{
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::None)
    }
}

impl From<Timestamp> for Value<'_> {
    fn from(t: Timestamp) -> Self {
        Value::Timestamp(t)
    }
}

/// Timestamp value represented as milliseconds since Unix epoch.
///
/// This provides a simple, timezone-agnostic representation suitable
/// for comparison operations.
///
/// # Example
///
/// ```
/// use campus_query::Timestamp;
///
/// let deadline = Timestamp::parse("2024-03-20").unwrap();
/// let posted = Timestamp::parse("2024-03-20T10:00:00Z").unwrap();
/// assert!(deadline < posted);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a new timestamp from seconds since Unix epoch.
    ///
    /// Saturates at the representable range.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1000))
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns the timestamp as seconds since Unix epoch.
    pub fn as_secs(self) -> i64 {
        self.0.div_euclid(1000)
    }

    /// Parses a date or date-time string.
    ///
    /// Accepted forms, tried in order:
    /// - RFC 3339 (`2024-03-05T10:00:00Z`, `2024-03-05T10:00:00+02:00`)
    /// - naive date-time (`2024-03-05T10:00:00`, `2024-03-05 10:00:00`,
    ///   optionally without seconds), read as UTC
    /// - bare date (`2024-05-15`), read as midnight UTC
    ///
    /// Returns `None` for anything else, including time-of-day strings such
    /// as `09:00`, which are left to plain string ordering.
    pub fn parse(s: &str) -> Option<Timestamp> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Timestamp(dt.timestamp_millis()));
        }

        for format in [
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M",
        ] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Some(Timestamp(naive.and_utc().timestamp_millis()));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Timestamp(naive.and_utc().timestamp_millis()))
    }

    /// Compares two timestamps.
    pub fn compare(self, other: Timestamp) -> Ordering {
        self.cmp(&other)
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl<Tz: chrono::TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Timestamp(dt.timestamp_millis())
    }
}
