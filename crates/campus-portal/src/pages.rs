//! List page queries.
//!
//! Each page turns its filter controls into a [`Criteria`] and runs it against
//! the matching catalog collection. The filter structs hold what a user picked;
//! `None` (or the `"all"` sentinel) leaves a field unconstrained.

use campus_query::{filter_options, sort_by_field, Criteria, Dir, FieldFilter, Record, ALL};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::model::{
    Announcement, Course, Day, ForumCategory, ForumPost, OfferKind, Scholarship, TimetableEntry,
};

/// Semesters offered by the timetable selector.
pub const SEMESTERS: [&str; 6] = ["S1", "S2", "S3", "S4", "S5", "S6"];

/// Groups offered by the timetable selector.
pub const GROUPS: [&str; 3] = ["A", "B", "C"];

// ============================================================================
// Courses
// ============================================================================

/// Filter controls of the courses page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseFilters {
    /// Matched against title, code and lecturer.
    pub search: String,
    pub semester: Option<String>,
    pub discipline: Option<String>,
    pub level: Option<String>,
    /// Extra `field=value` constraints.
    pub extra: Vec<FieldFilter>,
}

impl CourseFilters {
    pub fn criteria(&self) -> Criteria {
        let criteria = Criteria::new()
            .search(self.search.as_str())
            .filter_opt(Course::SEMESTER, self.semester.as_deref())
            .filter_opt(Course::DISCIPLINE, self.discipline.as_deref())
            .filter_opt(Course::LEVEL, self.level.as_deref());
        self.extra
            .iter()
            .cloned()
            .fold(criteria, Criteria::with_filter)
    }
}

/// Courses matching the filters, in catalog order.
pub fn courses<'a>(catalog: &'a Catalog, filters: &CourseFilters) -> Vec<&'a Course> {
    let found = filters.criteria().apply(&catalog.courses);
    debug!(total = catalog.courses.len(), found = found.len(), "course query");
    found
}

// ============================================================================
// Scholarships
// ============================================================================

/// Filter controls of the scholarships page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScholarshipFilters {
    /// Matched against title, organization and country.
    pub search: String,
    pub domain: Option<String>,
    pub kind: Option<String>,
    /// Deadline order, soonest first by default.
    pub dir: Dir,
}

impl ScholarshipFilters {
    pub fn criteria(&self) -> Criteria {
        Criteria::new()
            .search(self.search.as_str())
            .filter_opt(Scholarship::DOMAIN, self.domain.as_deref())
            .filter_opt(Scholarship::TYPE, self.kind.as_deref())
            .order_by(Scholarship::DEADLINE, self.dir)
    }
}

/// Offers matching the filters, ordered by deadline.
pub fn scholarships<'a>(catalog: &'a Catalog, filters: &ScholarshipFilters) -> Vec<&'a Scholarship> {
    let found = filters.criteria().apply(&catalog.scholarships);
    debug!(
        total = catalog.scholarships.len(),
        found = found.len(),
        dir = %filters.dir,
        "scholarship query"
    );
    found
}

// ============================================================================
// Forum
// ============================================================================

/// Filter controls of the forum page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForumFilters {
    /// Matched against title, content and author.
    pub search: String,
    pub category: Option<ForumCategory>,
}

impl ForumFilters {
    pub fn criteria(&self) -> Criteria {
        Criteria::new()
            .search(self.search.as_str())
            .filter_opt(ForumPost::CATEGORY, self.category.map(ForumCategory::as_str))
    }
}

/// Posts matching the filters, in board order (newest posts are prepended).
pub fn forum_posts<'a>(posts: &'a [ForumPost], filters: &ForumFilters) -> Vec<&'a ForumPost> {
    let found = filters.criteria().apply(posts);
    debug!(total = posts.len(), found = found.len(), "forum query");
    found
}

// ============================================================================
// Timetable
// ============================================================================

/// Selection of the timetable page. Both fields are always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableFilters {
    pub semester: String,
    pub group: String,
}

impl Default for TimetableFilters {
    fn default() -> Self {
        TimetableFilters {
            semester: SEMESTERS[0].to_string(),
            group: GROUPS[0].to_string(),
        }
    }
}

impl TimetableFilters {
    pub fn criteria(&self) -> Criteria {
        Criteria::new()
            .filter(TimetableEntry::SEMESTER, self.semester.as_str())
            .filter(TimetableEntry::GROUP, self.group.as_str())
    }
}

/// The slots of one day, by start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySchedule<'a> {
    pub day: Day,
    pub label: &'static str,
    pub entries: Vec<&'a TimetableEntry>,
}

impl DaySchedule<'_> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A Monday to Saturday timetable for one semester and group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekView<'a> {
    pub semester: String,
    pub group: String,
    pub days: Vec<DaySchedule<'a>>,
}

impl<'a> WeekView<'a> {
    /// Slots of a given day, empty for days outside the week view.
    pub fn day(&self, day: Day) -> &[&'a TimetableEntry] {
        self.days
            .iter()
            .find(|d| d.day == day)
            .map(|d| d.entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn slot_count(&self) -> usize {
        self.days.iter().map(|d| d.entries.len()).sum()
    }
}

/// Builds the week view for the selected semester and group.
pub fn week_view<'a>(catalog: &'a Catalog, filters: &TimetableFilters) -> WeekView<'a> {
    let selected = filters.criteria().apply(&catalog.timetable);

    let days = Day::WEEK
        .into_iter()
        .map(|day| {
            let same_day = selected.iter().copied().filter(|e| e.day == day);
            DaySchedule {
                day,
                label: day.label(),
                entries: sort_by_field(same_day, |e| e.field_value(TimetableEntry::START_TIME), Dir::Asc),
            }
        })
        .collect();

    let view = WeekView {
        semester: filters.semester.clone(),
        group: filters.group.clone(),
        days,
    };
    debug!(
        semester = %view.semester,
        group = %view.group,
        slots = view.slot_count(),
        "timetable query"
    );
    view
}

// ============================================================================
// Announcements
// ============================================================================

/// Announcements, newest first.
pub fn latest_announcements(catalog: &Catalog) -> Vec<&Announcement> {
    sort_by_field(
        &catalog.announcements,
        |a| a.field_value(Announcement::DATE),
        Dir::Desc,
    )
}

// ============================================================================
// Filter options
// ============================================================================

/// A list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Courses,
    Scholarships,
    Forum,
    Timetable,
}

/// The choices of one filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub field: &'static str,
    pub options: Vec<String>,
}

impl FilterOptions {
    fn new<'s>(field: &'static str, options: impl IntoIterator<Item = &'s str>) -> Self {
        FilterOptions {
            field,
            options: options.into_iter().map(str::to_string).collect(),
        }
    }

    /// `"all"` followed by fixed choices.
    fn fixed<'s>(field: &'static str, choices: impl IntoIterator<Item = &'s str>) -> Self {
        Self::new(field, std::iter::once(ALL).chain(choices))
    }
}

/// The dropdowns of a page.
///
/// Data-driven fields list the values present in the catalog; forum
/// categories and offer types are fixed lists; the timetable selectors have
/// no `"all"` choice.
pub fn page_options(catalog: &Catalog, page: Page) -> Vec<FilterOptions> {
    match page {
        Page::Courses => [Course::SEMESTER, Course::DISCIPLINE, Course::LEVEL]
            .into_iter()
            .map(|field| FilterOptions::new(field, filter_options(&catalog.courses, field)))
            .collect(),
        Page::Scholarships => vec![
            FilterOptions::new(
                Scholarship::DOMAIN,
                filter_options(&catalog.scholarships, Scholarship::DOMAIN),
            ),
            FilterOptions::fixed(Scholarship::TYPE, OfferKind::ALL.map(OfferKind::as_str)),
        ],
        Page::Forum => vec![FilterOptions::fixed(
            ForumPost::CATEGORY,
            ForumCategory::ALL.map(ForumCategory::as_str),
        )],
        Page::Timetable => vec![
            FilterOptions::new(TimetableEntry::SEMESTER, SEMESTERS),
            FilterOptions::new(TimetableEntry::GROUP, GROUPS),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    fn ids<T, F: Fn(&T) -> &str>(items: &[&T], id: F) -> Vec<String> {
        items.iter().map(|i| id(i).to_string()).collect()
    }

    #[test]
    fn courses_default_lists_everything() {
        let catalog = catalog();
        let found = courses(&catalog, &CourseFilters::default());
        assert_eq!(ids(&found, |c: &Course| c.id.as_str()), ["c1", "c2", "c3"]);
    }

    #[test]
    fn courses_search_code_and_lecturer() {
        let catalog = catalog();
        let by_code = CourseFilters {
            search: "sta2".into(),
            ..Default::default()
        };
        assert_eq!(ids(&courses(&catalog, &by_code), |c: &Course| c.id.as_str()), ["c2"]);

        let by_lecturer = CourseFilters {
            search: "DUBOIS".into(),
            ..Default::default()
        };
        assert_eq!(ids(&courses(&catalog, &by_lecturer), |c: &Course| c.id.as_str()), ["c3"]);
    }

    #[test]
    fn courses_combine_filters() {
        let catalog = catalog();
        let filters = CourseFilters {
            semester: Some("S1".into()),
            level: Some("L3".into()),
            discipline: Some("All".into()),
            ..Default::default()
        };
        assert_eq!(ids(&courses(&catalog, &filters), |c: &Course| c.id.as_str()), ["c1"]);
    }

    #[test]
    fn courses_extra_filters() {
        let catalog = catalog();
        let filters = CourseFilters {
            extra: vec!["discipline=Gestion".parse().unwrap()],
            ..Default::default()
        };
        assert_eq!(ids(&courses(&catalog, &filters), |c: &Course| c.id.as_str()), ["c3"]);
    }

    #[test]
    fn scholarships_sorted_by_deadline() {
        let catalog = catalog();
        let found = scholarships(&catalog, &ScholarshipFilters::default());
        assert_eq!(ids(&found, |s: &Scholarship| s.id.as_str()), ["s3", "s2", "s1"]);

        let latest_first = ScholarshipFilters {
            dir: Dir::Desc,
            ..Default::default()
        };
        let found = scholarships(&catalog, &latest_first);
        assert_eq!(ids(&found, |s: &Scholarship| s.id.as_str()), ["s1", "s2", "s3"]);
    }

    #[test]
    fn scholarships_filter_by_type_and_country() {
        let catalog = catalog();
        let filters = ScholarshipFilters {
            search: "france".into(),
            kind: Some("Internship".into()),
            ..Default::default()
        };
        let found = scholarships(&catalog, &filters);
        assert_eq!(ids(&found, |s: &Scholarship| s.id.as_str()), ["s2"]);
    }

    #[test]
    fn forum_filters_by_category_and_author() {
        let catalog = catalog();
        let events = ForumFilters {
            category: Some(ForumCategory::Events),
            ..Default::default()
        };
        let found = forum_posts(&catalog.forum_posts, &events);
        assert_eq!(ids(&found, |p: &ForumPost| p.id.as_str()), ["f2"]);

        let by_author = ForumFilters {
            search: "alice".into(),
            ..Default::default()
        };
        let found = forum_posts(&catalog.forum_posts, &by_author);
        assert_eq!(ids(&found, |p: &ForumPost| p.id.as_str()), ["f1"]);
    }

    #[test]
    fn week_view_defaults_to_s1_group_a() {
        let catalog = catalog();
        let view = week_view(&catalog, &TimetableFilters::default());
        assert_eq!(view.days.len(), 6);
        assert_eq!(view.slot_count(), 4);
        assert_eq!(
            ids(view.day(Day::Monday), |e: &TimetableEntry| e.id.as_str()),
            ["t1", "t2"]
        );
        assert!(view.day(Day::Tuesday).is_empty());
        assert!(view.day(Day::Sunday).is_empty());
        assert_eq!(view.days[5].label, "Samedi");
    }

    #[test]
    fn week_view_sorts_each_day_by_start_time() {
        let mut catalog = catalog();
        // push an earlier Monday slot at the end of the collection
        let mut early = catalog.timetable[1].clone();
        early.id = "t6".into();
        early.start_time = "08:00".into();
        catalog.timetable.push(early);

        let view = week_view(&catalog, &TimetableFilters::default());
        assert_eq!(
            ids(view.day(Day::Monday), |e: &TimetableEntry| e.id.as_str()),
            ["t6", "t1", "t2"]
        );
    }

    #[test]
    fn week_view_other_group() {
        let catalog = catalog();
        let filters = TimetableFilters {
            semester: "S2".into(),
            group: "B".into(),
        };
        let view = week_view(&catalog, &filters);
        assert_eq!(view.slot_count(), 1);
        assert_eq!(ids(view.day(Day::Tuesday), |e: &TimetableEntry| e.id.as_str()), ["t3"]);
    }

    #[test]
    fn announcements_newest_first() {
        let catalog = catalog();
        let found = latest_announcements(&catalog);
        assert_eq!(ids(&found, |a: &Announcement| a.id.as_str()), ["1", "2", "3"]);
    }

    #[test]
    fn course_options_follow_data() {
        let options = page_options(&catalog(), Page::Courses);
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].field, "semester");
        assert_eq!(options[0].options, ["all", "S1", "S2"]);
        assert_eq!(options[2].options, ["all", "L3", "L2", "M1"]);
    }

    #[test]
    fn fixed_options() {
        let catalog = catalog();
        let forum = page_options(&catalog, Page::Forum);
        assert_eq!(forum[0].options.len(), 6);
        assert_eq!(forum[0].options[1], "Homework Help");

        let offers = page_options(&catalog, Page::Scholarships);
        assert_eq!(offers[0].options, ["all", "Toutes", "Informatique", "Marketing"]);
        assert_eq!(offers[1].field, "type");
        assert_eq!(offers[1].options, ["all", "Scholarship", "Internship", "Student Job"]);

        let timetable = page_options(&catalog, Page::Timetable);
        assert_eq!(timetable[1].options, ["A", "B", "C"]);
    }
}
