//! Form validation.
//!
//! Validation never fails with an error: it returns [`FormErrors`], the
//! messages to show next to each invalid field. An empty set means the form
//! can be submitted.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NAME_REQUIRED: &str = "Le nom est requis.";
pub const EMAIL_INVALID: &str = "Adresse email invalide.";
pub const PASSWORD_TOO_SHORT: &str = "Le mot de passe doit contenir au moins 6 caractères.";
pub const PASSWORDS_DIFFER: &str = "Les mots de passe ne correspondent pas.";
pub const MESSAGE_REQUIRED: &str = "Le message est requis.";

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

/// Loose email check: something, `@`, something, `.`, something.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Field name to message, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<&'static str, &'static str>);

impl FormErrors {
    pub fn new() -> Self {
        FormErrors::default()
    }

    pub(crate) fn add(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }

    pub(crate) fn check(&mut self, ok: bool, field: &'static str, message: &'static str) {
        if !ok {
            self.add(field, message);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The message for a field, if it is invalid.
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

/// Sign-in form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

impl SignIn {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.check(is_valid_email(&self.email), "email", EMAIL_INVALID);
        errors.check(
            self.password.chars().count() >= MIN_PASSWORD_LEN,
            "password",
            PASSWORD_TOO_SHORT,
        );
        errors
    }
}

/// Sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignUp {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUp {
    pub fn validate(&self) -> FormErrors {
        let mut errors = SignIn {
            email: self.email.clone(),
            password: self.password.clone(),
        }
        .validate();
        errors.check(!self.name.trim().is_empty(), "name", NAME_REQUIRED);
        errors.check(
            self.password == self.confirm_password,
            "confirm_password",
            PASSWORDS_DIFFER,
        );
        errors
    }
}

/// Contact / support form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.check(!self.name.trim().is_empty(), "name", NAME_REQUIRED);
        errors.check(is_valid_email(&self.email), "email", EMAIL_INVALID);
        errors.check(!self.message.trim().is_empty(), "message", MESSAGE_REQUIRED);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("alice@univ.fr"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("alice@univ"));
        assert!(!is_valid_email("alice univ.fr"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn sign_in_valid() {
        let form = SignIn {
            email: "alice@univ.fr".into(),
            password: "secret".into(),
        };
        assert!(form.validate().is_valid());
    }

    #[test]
    fn sign_in_does_not_need_a_name() {
        let errors = SignIn {
            email: "bad".into(),
            password: "12345".into(),
        }
        .validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some(EMAIL_INVALID));
        assert_eq!(errors.get("password"), Some(PASSWORD_TOO_SHORT));
        assert_eq!(errors.get("name"), None);
    }

    #[test]
    fn password_length_counts_characters() {
        let form = SignIn {
            email: "a@b.c".into(),
            password: "éééééé".into(),
        };
        assert!(form.validate().is_valid());
    }

    #[test]
    fn sign_up_checks_every_field() {
        let errors = SignUp {
            name: "   ".into(),
            email: "alice@univ".into(),
            password: "abc".into(),
            confirm_password: "abd".into(),
        }
        .validate();
        let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, ["confirm_password", "email", "name", "password"]);
        assert_eq!(errors.get("confirm_password"), Some(PASSWORDS_DIFFER));
    }

    #[test]
    fn sign_up_valid() {
        let form = SignUp {
            name: "Alice".into(),
            email: "alice@univ.fr".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        };
        assert!(form.validate().is_valid());
    }

    #[test]
    fn contact_requires_message() {
        let errors = ContactForm {
            name: "Alice".into(),
            email: "alice@univ.fr".into(),
            message: "\n".into(),
        }
        .validate();
        assert_eq!(errors.iter().collect::<Vec<_>>(), [("message", MESSAGE_REQUIRED)]);
    }

    #[test]
    fn errors_serialize_as_a_map() {
        let errors = ContactForm::default().validate();
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["name"], NAME_REQUIRED);
        assert_eq!(json["message"], MESSAGE_REQUIRED);
    }
}
