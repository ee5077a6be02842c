//! Filter option lists.
//!
//! A list page offers one dropdown per categorical field. Its options are the
//! sentinel followed by every distinct value present in the collection.

use crate::filter::ALL;
use crate::traits::Record;

/// Distinct text values of `field`, in first-seen order.
///
/// Missing and non-text values are skipped.
pub fn distinct_values<'a, T: Record>(records: &'a [T], field: &str) -> Vec<&'a str> {
    let mut seen: Vec<&'a str> = Vec::new();
    for record in records {
        if let Some(value) = record.field_value(field).as_str() {
            if !seen.contains(&value) {
                seen.push(value);
            }
        }
    }
    seen
}

/// The options of a filter dropdown: [`ALL`] followed by [`distinct_values`].
pub fn filter_options<'a, T: Record>(records: &'a [T], field: &str) -> Vec<&'a str> {
    let mut options = vec![ALL];
    options.extend(distinct_values(records, field));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    struct Course(&'static str, Option<&'static str>);

    impl Record for Course {
        fn field_value(&self, field: &str) -> Value<'_> {
            match (field, self.1) {
                ("semester", _) => Value::Text(self.0),
                ("level", Some(level)) => Value::Text(level),
                _ => Value::None,
            }
        }
    }

    #[test]
    fn distinct_in_first_seen_order() {
        let courses = [
            Course("S2", None),
            Course("S1", Some("L3")),
            Course("S2", Some("L2")),
        ];
        assert_eq!(distinct_values(&courses, "semester"), ["S2", "S1"]);
        assert_eq!(distinct_values(&courses, "level"), ["L3", "L2"]);
        assert!(distinct_values(&courses, "nope").is_empty());
    }

    #[test]
    fn options_start_with_sentinel() {
        let courses = [Course("S1", None)];
        assert_eq!(filter_options(&courses, "semester"), ["all", "S1"]);
        assert_eq!(filter_options::<Course>(&[], "semester"), ["all"]);
    }
}
