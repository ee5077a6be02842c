//! Portal records.
//!
//! Every list page works on one of these types. Each derives [`Record`] so the
//! query engine can search its text fields, filter its categorical fields and
//! sort on its dates or times. Field names in queries are the Rust field
//! names (or the `rename` given in `#[record]`); the serialized form uses the
//! camelCase names of the bundled data set.

use std::fmt;
use std::str::FromStr;

use campus_macros::Record;
use serde::{Deserialize, Serialize};

use crate::forum::ForumError;

/// A course with its downloadable resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[record(skip)]
    pub id: String,
    #[record(text)]
    pub title: String,
    #[record(text)]
    pub code: String,
    #[record(text)]
    pub lecturer: String,
    #[record(category)]
    pub semester: String,
    #[record(category)]
    pub discipline: String,
    #[record(category)]
    pub level: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// A file attached to a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceKind {
    Pdf,
    Ppt,
    Doc,
    Video,
}

/// Day of the week a timetable slot falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// The days shown in the week view.
    pub const WEEK: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// Display name in the portal's language.
    pub fn label(self) -> &'static str {
        match self {
            Day::Monday => "Lundi",
            Day::Tuesday => "Mardi",
            Day::Wednesday => "Mercredi",
            Day::Thursday => "Jeudi",
            Day::Friday => "Vendredi",
            Day::Saturday => "Samedi",
            Day::Sunday => "Dimanche",
        }
    }
}

impl AsRef<str> for Day {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// One weekly slot of a course for a semester and group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub id: String,
    pub course_id: String,
    #[record(text)]
    pub course_title: String,
    #[record(category)]
    pub day: Day,
    /// Zero-padded `HH:MM`.
    #[record(key)]
    pub start_time: String,
    #[record(key)]
    pub end_time: String,
    #[record(text)]
    pub room: String,
    #[record(category)]
    pub semester: String,
    #[record(category)]
    pub group: String,
}

/// Forum section a post belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForumCategory {
    #[serde(rename = "Homework Help")]
    HomeworkHelp,
    Announcements,
    Events,
    #[serde(rename = "Campus Life")]
    CampusLife,
    #[default]
    General,
}

impl ForumCategory {
    pub const ALL: [ForumCategory; 5] = [
        ForumCategory::HomeworkHelp,
        ForumCategory::Announcements,
        ForumCategory::Events,
        ForumCategory::CampusLife,
        ForumCategory::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ForumCategory::HomeworkHelp => "Homework Help",
            ForumCategory::Announcements => "Announcements",
            ForumCategory::Events => "Events",
            ForumCategory::CampusLife => "Campus Life",
            ForumCategory::General => "General",
        }
    }
}

impl AsRef<str> for ForumCategory {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ForumCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForumCategory {
    type Err = ForumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ForumCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ForumError::UnknownCategory(s.to_string()))
    }
}

/// A forum thread and its replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    pub id: String,
    #[record(text)]
    pub title: String,
    #[record(text)]
    pub content: String,
    #[record(text)]
    pub author: String,
    #[record(category)]
    pub category: ForumCategory,
    /// ISO 8601 date-time.
    #[record(key)]
    pub date: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author: String,
    pub content: String,
    pub date: String,
}

/// Kind of opportunity listed on the scholarships page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferKind {
    Scholarship,
    Internship,
    #[serde(rename = "Student Job")]
    StudentJob,
}

impl OfferKind {
    pub const ALL: [OfferKind; 3] = [
        OfferKind::Scholarship,
        OfferKind::Internship,
        OfferKind::StudentJob,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OfferKind::Scholarship => "Scholarship",
            OfferKind::Internship => "Internship",
            OfferKind::StudentJob => "Student Job",
        }
    }
}

impl AsRef<str> for OfferKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A scholarship, internship or student job offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
pub struct Scholarship {
    pub id: String,
    #[record(text)]
    pub title: String,
    #[record(text)]
    pub organization: String,
    #[record(text)]
    pub country: String,
    /// ISO 8601 date.
    #[record(key)]
    pub deadline: String,
    #[record(category)]
    pub domain: String,
    #[record(category, rename = "type")]
    #[serde(rename = "type")]
    pub kind: OfferKind,
    pub apply_link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementKind {
    Event,
    News,
    Urgent,
}

impl AsRef<str> for AnnouncementKind {
    fn as_ref(&self) -> &str {
        match self {
            AnnouncementKind::Event => "event",
            AnnouncementKind::News => "news",
            AnnouncementKind::Urgent => "urgent",
        }
    }
}

/// Home page announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
pub struct Announcement {
    pub id: String,
    #[record(text)]
    pub title: String,
    #[record(text)]
    pub content: String,
    #[record(key)]
    pub date: String,
    #[record(category, rename = "type")]
    #[serde(rename = "type")]
    pub kind: AnnouncementKind,
}

/// A frequently asked question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
pub struct FaqItem {
    pub id: String,
    #[record(text)]
    pub question: String,
    #[record(text)]
    pub answer: String,
}

/// The signed-in student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub student_id: String,
    pub major: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    /// Where the uploaded CV is stored, `uploads/<file name>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_url: Option<String>,
}
