//! # Campus portal
//!
//! The student portal's catalog pages on top of [`campus_query`]: course
//! catalog, scholarships, forum, timetable and announcements, plus form
//! validation and a study assistant.
//!
//! ## Modules
//!
//! - [`model`]: the records (courses, timetable slots, posts, offers, ...)
//! - [`catalog`]: the bundled data set and loading from JSON or YAML files
//! - [`pages`]: one query per list page, and its filter choices
//! - [`forum`]: publishing and commenting on the in-memory board
//! - [`validation`]: sign-in, sign-up and contact form checks
//! - [`profile`]: editing the signed-in student's profile
//! - [`assistant`]: the [`TextGenerator`](assistant::TextGenerator) capability
//!   and the offline FAQ responder
//! - [`config`]: YAML configuration with environment overrides
//! - [`render`]: template and structured output
//! - [`cli`]: the `campus` command line
//!
//! ## Example
//!
//! ```
//! use campus_portal::catalog::Catalog;
//! use campus_portal::pages::{courses, CourseFilters};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let filters = CourseFilters {
//!     search: "web".into(),
//!     semester: Some("S1".into()),
//!     ..Default::default()
//! };
//! let found = courses(&catalog, &filters);
//! assert_eq!(found[0].code, "INF301");
//! ```

pub mod assistant;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod forum;
pub mod model;
pub mod pages;
pub mod profile;
pub mod render;
pub mod validation;

pub use catalog::{Catalog, CatalogError};
pub use config::{ConfigError, PortalConfig};
pub use model::{
    Announcement, Course, FaqItem, ForumPost, Scholarship, TimetableEntry, User,
};
