//! Editing the student profile.
//!
//! A [`ProfileUpdate`] carries only the fields being changed. It is checked
//! like the other forms, then applied to a copy of the [`User`]. A CV is
//! referenced by its file name under `uploads/`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::User;
use crate::validation::{is_valid_email, FormErrors, EMAIL_INVALID, NAME_REQUIRED};

pub const CV_INVALID: &str = "Fichier CV invalide.";
pub const SIGN_IN_REQUIRED: &str = "Veuillez vous connecter pour accéder à votre profil.";

/// Directory uploaded CVs are referenced from.
pub const UPLOAD_DIR: &str = "uploads";

/// Changes to the profile. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub major: Option<String>,
    /// Path of the CV to attach; only its file name is kept.
    pub cv_file: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.major.is_none() && self.cv_file.is_none()
    }

    /// Checks the fields that are being changed.
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        if let Some(name) = &self.name {
            errors.check(!name.trim().is_empty(), "name", NAME_REQUIRED);
        }
        if let Some(email) = &self.email {
            errors.check(is_valid_email(email), "email", EMAIL_INVALID);
        }
        if let Some(file) = &self.cv_file {
            errors.check(cv_url(file).is_some(), "cv", CV_INVALID);
        }
        errors
    }

    /// Returns `user` with the changes applied, or the invalid fields.
    pub fn apply(&self, user: &User) -> Result<User, FormErrors> {
        let errors = self.validate();
        if !errors.is_valid() {
            return Err(errors);
        }

        let mut updated = user.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(email) = &self.email {
            updated.email = email.clone();
        }
        if let Some(major) = &self.major {
            updated.major = major.clone();
        }
        if let Some(url) = self.cv_file.as_deref().and_then(cv_url) {
            updated.cv_url = Some(url);
        }
        debug!(user = %updated.id, cv = ?updated.cv_url, "profile updated");
        Ok(updated)
    }
}

/// The stored location of a CV file: `uploads/<file name>`.
///
/// `None` when the path has no file name.
pub fn cv_url(file: &str) -> Option<String> {
    let name = Path::new(file).file_name()?.to_str()?;
    Some(format!("{UPLOAD_DIR}/{name}"))
}
