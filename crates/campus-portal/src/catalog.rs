//! Catalog data sets.
//!
//! A [`Catalog`] holds every collection the portal lists. The bundled demo data
//! ships inside the binary ([`Catalog::builtin`]); a replacement can be read
//! from a JSON or YAML file with the same shape ([`Catalog::load`]).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::model::{
    Announcement, Course, FaqItem, ForumPost, Scholarship, TimetableEntry, User,
};

const BUILTIN_CATALOG: &str = include_str!("data/catalog.json");

/// Errors raised while reading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported catalog format '{0}': expected .json, .yaml or .yml")]
    UnsupportedFormat(PathBuf),
}

/// File formats a catalog can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(DataFormat::Json),
            "yaml" | "yml" => Some(DataFormat::Yaml),
            _ => None,
        }
    }
}

/// Every record collection of the portal.
///
/// Collections keep the order they were supplied in; list pages rely on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Catalog {
    pub announcements: Vec<Announcement>,
    pub courses: Vec<Course>,
    pub timetable: Vec<TimetableEntry>,
    pub forum_posts: Vec<ForumPost>,
    pub scholarships: Vec<Scholarship>,
    pub faqs: Vec<FaqItem>,
    /// The signed-in student, if any.
    pub user: Option<User>,
}

impl Catalog {
    /// The demo data bundled with the portal.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self, CatalogError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Reads a catalog file, choosing the parser from its extension.
    ///
    /// Collections missing from the file are empty.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let format = DataFormat::from_path(path)
            .ok_or_else(|| CatalogError::UnsupportedFormat(path.to_path_buf()))?;

        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?format, "parsing catalog");

        let catalog = match format {
            DataFormat::Json => Self::from_json(&content)?,
            DataFormat::Yaml => Self::from_yaml(&content)?,
        };
        info!(
            path = %path.display(),
            courses = catalog.courses.len(),
            posts = catalog.forum_posts.len(),
            scholarships = catalog.scholarships.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Loads `path` when given, the bundled data otherwise.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Looks up a course by id.
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }
}
