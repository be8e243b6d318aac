//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic failures live here (input validation, malformed
/// identifiers, broken result invariants). Model and transport failures
/// belong to `moodlens-ai`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Submitted text was empty or whitespace only.
    #[error("input is empty")]
    EmptyInput,

    /// Submitted text exceeds the configured character bound.
    #[error("input too long: {actual} characters (max {max})")]
    InputTooLong { actual: usize, max: usize },

    /// A value failed validation (e.g. malformed form field).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A result set had no entries, so no primary result exists.
    #[error("classifier returned no results")]
    EmptyResultSet,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
