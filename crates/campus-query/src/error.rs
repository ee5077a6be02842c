//! Error types for the query crate.
//!
//! Filtering and sorting are total and never fail. Errors only arise when
//! criteria are parsed from user-supplied text.

use thiserror::Error;

/// Errors that can occur when parsing query criteria.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A field filter was not of the form `field=value`.
    #[error("invalid field filter '{0}': expected field=value")]
    InvalidFilter(String),

    /// A field filter named no field.
    #[error("field filter '{0}' has an empty field name")]
    EmptyField(String),

    /// Unrecognized sort direction.
    #[error("unknown sort direction '{0}': expected asc or desc")]
    InvalidDirection(String),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
