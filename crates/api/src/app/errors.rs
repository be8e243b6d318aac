use axum::http::StatusCode;

use moodlens_ai::ClassifierError;
use moodlens_core::DomainError;

/// User-facing text for an input that was rejected before classification.
pub fn input_warning(err: &DomainError) -> String {
    match err {
        DomainError::EmptyInput => "⚠ Please enter some text before analyzing.".to_string(),
        DomainError::InputTooLong { actual, max } => format!(
            "⚠ Your text is {actual} characters long; the limit is {max}. Please shorten it and try again."
        ),
        other => format!("⚠ {other}"),
    }
}

/// Status code and user-facing text for a classifier failure.
///
/// Details stay in the logs; the page only says what the user can do.
pub fn classifier_failure(err: &ClassifierError) -> (StatusCode, String) {
    match err {
        ClassifierError::ModelLoad { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            "❌ The analysis model is not available right now. Please try again later.".to_string(),
        ),
        ClassifierError::Endpoint { status: 413, .. } => (
            StatusCode::BAD_GATEWAY,
            "❌ The model could not process text of this length. Please shorten it and try again."
                .to_string(),
        ),
        _ => (
            StatusCode::BAD_GATEWAY,
            "❌ The model could not analyze this text. Please try again in a moment.".to_string(),
        ),
    }
}
