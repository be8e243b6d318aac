use serde::Deserialize;

// -------------------------
// Form DTOs
// -------------------------

/// Body of `POST /analyze`. A missing field is treated as empty text.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub text: String,
}

/// Body of `POST /feedback`.
#[derive(Debug, Default, Deserialize)]
pub struct FeedbackForm {
    /// `correct` / `incorrect`; absent means the default choice.
    #[serde(default)]
    pub choice: Option<String>,
    #[serde(default)]
    pub corrected_label: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}
