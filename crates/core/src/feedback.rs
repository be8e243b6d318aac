//! Feedback about a rendered result.
//!
//! A [`FeedbackRecord`] is built when the user submits the feedback form,
//! handed to whatever sink the host wires in, and then dropped.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::id::{FeedbackId, SessionId};

/// Message shown after any feedback submission.
pub const FEEDBACK_ACKNOWLEDGMENT: &str =
    "🙏 Thank you! Your feedback will help improve the model’s accuracy.";

/// The user's verdict on the primary result. Defaults to `Correct`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackChoice {
    #[default]
    Correct,
    Incorrect,
}

impl FeedbackChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
        }
    }

    /// Radio button caption.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::Correct => "✅ Correct",
            Self::Incorrect => "❌ Incorrect",
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct)
    }
}

impl FromStr for FeedbackChoice {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "correct" => Ok(Self::Correct),
            "incorrect" => Ok(Self::Incorrect),
            other => Err(DomainError::validation(format!(
                "feedback choice must be 'correct' or 'incorrect', got {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackRecord {
    pub id: FeedbackId,
    pub session_id: SessionId,
    /// Primary label the feedback refers to, if a result was on screen.
    pub primary_label: Option<String>,
    pub correct: bool,
    pub corrected_label: Option<String>,
    pub comment: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Build a record from raw form values. Blank optional fields become `None`.
    pub fn new(
        session_id: SessionId,
        primary_label: Option<String>,
        choice: FeedbackChoice,
        corrected_label: Option<&str>,
        comment: Option<&str>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: FeedbackId::new(),
            session_id,
            primary_label,
            correct: choice.is_correct(),
            corrected_label: non_blank(corrected_label),
            comment: non_blank(comment),
            submitted_at,
        }
    }

    pub fn acknowledgment(&self) -> &'static str {
        FEEDBACK_ACKNOWLEDGMENT
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
