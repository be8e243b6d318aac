//! Validated analysis input.

use crate::error::{DomainError, DomainResult};

/// Default upper bound on the number of characters sent to the classifier.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 5_000;

/// Text that passed the pre-classification checks.
///
/// The submitted text is kept verbatim (including surrounding whitespace);
/// validation only decides whether the classifier may be invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisInput(String);

impl AnalysisInput {
    /// Validate raw form text.
    ///
    /// Empty or whitespace-only text is rejected before any length check so
    /// that a blank submission always produces the same warning.
    pub fn parse(raw: impl Into<String>, max_chars: usize) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::EmptyInput);
        }

        let actual = raw.chars().count();
        if actual > max_chars {
            return Err(DomainError::InputTooLong {
                actual,
                max: max_chars,
            });
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Character count (not bytes).
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}
