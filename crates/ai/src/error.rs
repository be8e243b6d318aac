use moodlens_core::DomainError;
use thiserror::Error;

pub type ClassifierResult<T> = Result<T, ClassifierError>;

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The classifier could not be constructed. Fatal at startup.
    #[error("failed to load model '{model}': {reason}")]
    ModelLoad { model: String, reason: String },

    /// The inference endpoint answered with a non-success status.
    #[error("inference endpoint returned {status}: {message}")]
    Endpoint { status: u16, message: String },

    /// Transport failure while talking to the endpoint.
    #[error("inference request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The model answered, but the answer is not a usable result set.
    #[error("invalid classifier output: {0}")]
    InvalidOutput(#[from] DomainError),
}

impl ClassifierError {
    pub fn model_load(model: impl Into<String>, reason: impl ToString) -> Self {
        Self::ModelLoad {
            model: model.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_model_load(&self) -> bool {
        matches!(self, Self::ModelLoad { .. })
    }
}
