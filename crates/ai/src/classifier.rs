use std::sync::Arc;

use async_trait::async_trait;
use moodlens_core::ResultSet;

use crate::error::ClassifierResult;

/// A text classification capability bound to one model.
///
/// `classify` returns a score for **every** label the model supports, not just
/// the top prediction, already sorted into a [`ResultSet`].
#[async_trait]
pub trait TextClassifier: Send + Sync + 'static {
    /// Name of the model the classifier is bound to.
    fn model_id(&self) -> &str;

    async fn classify(&self, text: &str) -> ClassifierResult<ResultSet>;
}

/// Constructs a classifier. May do network or disk IO.
#[async_trait]
pub trait ClassifierFactory: Send + Sync + 'static {
    /// Model the factory will load (for logs and error messages).
    fn model(&self) -> &str;

    async fn load(&self) -> ClassifierResult<Arc<dyn TextClassifier>>;
}
