//! Behaviour of the query engine over portal-shaped records.

use campus_query::{
    filter_options, filter_records, sort_by_field, Criteria, Dir, FieldFilter, Record, Value,
};

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Course {
    id: &'static str,
    title: &'static str,
    code: &'static str,
    lecturer: &'static str,
    semester: &'static str,
    discipline: &'static str,
    level: &'static str,
}

impl Record for Course {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "title" => Value::Text(self.title),
            "code" => Value::Text(self.code),
            "lecturer" => Value::Text(self.lecturer),
            "semester" => Value::Text(self.semester),
            "discipline" => Value::Text(self.discipline),
            "level" => Value::Text(self.level),
            _ => Value::None,
        }
    }

    fn text_fields(&self) -> &'static [&'static str] {
        &["title", "code", "lecturer"]
    }
}

fn courses() -> Vec<Course> {
    vec![
        Course {
            id: "c1",
            title: "Programmation Web Avancée",
            code: "INF301",
            lecturer: "Dr. Dupont",
            semester: "S1",
            discipline: "Informatique",
            level: "L3",
        },
        Course {
            id: "c2",
            title: "Analyse de Données Statistiques",
            code: "STA205",
            lecturer: "Prof. Martin",
            semester: "S1",
            discipline: "Mathématiques",
            level: "L2",
        },
        Course {
            id: "c3",
            title: "Management de Projet",
            code: "MAN400",
            lecturer: "Mme. Dubois",
            semester: "S2",
            discipline: "Gestion",
            level: "M1",
        },
    ]
}

#[derive(Debug)]
struct Offer {
    id: &'static str,
    deadline: &'static str,
}

fn deadline<'a>(offer: &'a Offer) -> Value<'a> {
    Value::Text(offer.deadline)
}

fn ids<'a>(found: impl IntoIterator<Item = &'a Course>) -> Vec<&'static str> {
    found.into_iter().map(|c| c.id).collect()
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn identity_filter_returns_everything_in_order() {
    let data = courses();
    let found = filter_records(&data, &Criteria::new());
    assert_eq!(ids(found), ["c1", "c2", "c3"]);
}

#[test]
fn filtering_is_idempotent() {
    let data = courses();
    let criteria = Criteria::new().search("de").filter("semester", "S1");
    let first = filter_records(&data, &criteria);
    let second = filter_records(&data, &criteria);
    assert_eq!(first, second);
    assert_eq!(ids(first), ["c2"]);
}

#[test]
fn search_is_case_insensitive_substring() {
    let data = courses();
    let found = filter_records(&data, &Criteria::new().search("WEB"));
    assert_eq!(ids(found), ["c1"]);

    let found = filter_records(&data, &Criteria::new().search("xyz"));
    assert!(found.is_empty());
}

#[test]
fn whitespace_in_the_term_is_significant() {
    let data = courses();
    assert!(filter_records(&data, &Criteria::new().search("avancée ")).is_empty());
    assert_eq!(ids(filter_records(&data, &Criteria::new().search("web "))), ["c1"]);

    // only titles with a space match a single blank
    let codes_only = [Course {
        title: "Algebre",
        ..data[0].clone()
    }];
    let blank = Criteria::new().search(" ");
    assert!(filter_records(&codes_only, &blank).is_empty());
    assert_eq!(ids(filter_records(&data, &blank)), ["c1", "c2", "c3"]);
}

#[test]
fn search_matches_code_and_lecturer() {
    let data = courses();
    assert_eq!(ids(filter_records(&data, &Criteria::new().search("sta2"))), ["c2"]);
    assert_eq!(ids(filter_records(&data, &Criteria::new().search("dubois"))), ["c3"]);
}

#[test]
fn categorical_filter_is_exact() {
    let data = courses();
    let c1 = &data[..1];

    assert!(filter_records(c1, &Criteria::new().filter("semester", "S2")).is_empty());
    assert_eq!(ids(filter_records(c1, &Criteria::new().filter("semester", "all"))), ["c1"]);
    assert_eq!(ids(filter_records(c1, &Criteria::new().filter("semester", "S1"))), ["c1"]);
    assert!(filter_records(c1, &Criteria::new().filter("semester", "s1")).is_empty());
}

#[test]
fn empty_selected_value_is_not_a_wildcard() {
    let data = courses();
    assert!(filter_records(&data, &Criteria::new().filter("code", "")).is_empty());
    assert_eq!(
        ids(filter_records(&data, &Criteria::new().filter_opt("code", None::<&str>))),
        ["c1", "c2", "c3"]
    );
}

#[test]
fn filters_on_two_fields_must_both_hold() {
    let data = courses();
    let both = Criteria::new()
        .filter("semester", "S1")
        .filter("discipline", "Informatique");
    assert_eq!(ids(filter_records(&data, &both)), ["c1"]);

    let fails_one = Criteria::new()
        .filter("semester", "S2")
        .filter("discipline", "Informatique");
    assert!(filter_records(&data, &fails_one).is_empty());
}

#[test]
fn search_and_filters_combine() {
    let data = courses();
    let criteria = Criteria::new().search("a").filter("level", "M1");
    assert_eq!(ids(filter_records(&data, &criteria)), ["c3"]);
}

#[test]
fn unknown_filter_field_excludes_everything() {
    let data = courses();
    let criteria = Criteria::new().filter("room", "B101");
    assert!(filter_records(&data, &criteria).is_empty());
}

#[test]
fn empty_input_yields_empty_output() {
    let none: Vec<Course> = Vec::new();
    let criteria = Criteria::new().search("web").filter("semester", "S1");
    assert!(filter_records(&none, &criteria).is_empty());
    assert!(criteria.apply(&none).is_empty());
}

#[test]
fn parsed_filters_feed_criteria() {
    let data = courses();
    let filter: FieldFilter = "discipline=Gestion".parse().unwrap();
    let criteria = Criteria::new().with_filter(filter);
    assert_eq!(ids(filter_records(&data, &criteria)), ["c3"]);
}

#[test]
fn dropdown_options() {
    let data = courses();
    assert_eq!(filter_options(&data, "semester"), ["all", "S1", "S2"]);
    assert_eq!(
        filter_options(&data, "discipline"),
        ["all", "Informatique", "Mathématiques", "Gestion"]
    );
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn deadlines_sort_ascending() {
    let offers = [
        Offer { id: "s1", deadline: "2024-04-30" },
        Offer { id: "s2", deadline: "2024-03-20" },
        Offer { id: "s3", deadline: "2024-05-15" },
    ];
    let sorted = sort_by_field(&offers, deadline, Dir::Asc);
    let dates: Vec<&str> = sorted.iter().map(|o| o.deadline).collect();
    assert_eq!(dates, ["2024-03-20", "2024-04-30", "2024-05-15"]);

    let sorted = sort_by_field(&offers, deadline, Dir::Desc);
    let dates: Vec<&str> = sorted.iter().map(|o| o.deadline).collect();
    assert_eq!(dates, ["2024-05-15", "2024-04-30", "2024-03-20"]);
}

#[test]
fn equal_deadlines_keep_input_order() {
    let offers = [
        Offer { id: "late", deadline: "2024-06-01" },
        Offer { id: "first", deadline: "2024-04-30" },
        Offer { id: "second", deadline: "2024-04-30" },
    ];
    let sorted = sort_by_field(&offers, deadline, Dir::Asc);
    let order: Vec<&str> = sorted.iter().map(|o| o.id).collect();
    assert_eq!(order, ["first", "second", "late"]);

    let sorted = sort_by_field(&offers, deadline, Dir::Desc);
    let order: Vec<&str> = sorted.iter().map(|o| o.id).collect();
    assert_eq!(order, ["late", "first", "second"]);
}

#[test]
fn times_of_day_sort_lexicographically() {
    let starts = ["14:00", "09:00", "10:30"];
    let sorted = sort_by_field(&starts, |s| Value::Text(s), Dir::Asc);
    assert_eq!(sorted, [&"09:00", &"10:30", &"14:00"]);
}

#[test]
fn iso_dates_with_and_without_time() {
    let dates = ["2024-03-05T10:00:00Z", "2024-03-04T15:00:00Z", "2024-03-05"];
    let sorted = sort_by_field(&dates, |s| Value::Text(s), Dir::Desc);
    assert_eq!(
        sorted,
        [&"2024-03-05T10:00:00Z", &"2024-03-05", &"2024-03-04T15:00:00Z"]
    );
}

#[test]
fn sorting_leaves_filter_output_untouched() {
    let data = courses();
    let matching = filter_records(&data, &Criteria::new());
    let sorted = sort_by_field(matching.clone(), |c| Value::Text(c.code), Dir::Asc);
    assert_eq!(ids(sorted), ["c1", "c3", "c2"]);
    assert_eq!(ids(matching), ["c1", "c2", "c3"]);
}
