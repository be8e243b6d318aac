use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use moodlens_core::{ClassificationResult, ResultSet};

use crate::classifier::{ClassifierFactory, TextClassifier};
use crate::error::ClassifierResult;

/// Classifier that ignores its input and returns a fixed distribution.
///
/// The distribution is kept in the order it was given, so it behaves like an
/// unordered producer: sorting happens in [`ResultSet::from_unsorted`].
#[derive(Debug)]
pub struct FixedClassifier {
    model_id: String,
    results: Vec<ClassificationResult>,
    calls: AtomicUsize,
}

impl FixedClassifier {
    pub fn new(model_id: impl Into<String>, results: Vec<ClassificationResult>) -> Self {
        Self {
            model_id: model_id.into(),
            results,
            calls: AtomicUsize::new(0),
        }
    }

    /// A plausible distribution over the mental-health label set.
    pub fn mental_health_demo() -> Self {
        Self::new(
            "fixed/mental-health-demo",
            vec![
                ClassificationResult::new("Neutral", 0.08),
                ClassificationResult::new("Depression", 0.61),
                ClassificationResult::new("Anxiety", 0.22),
                ClassificationResult::new("Suicidal Ideation", 0.05),
                ClassificationResult::new("Positive", 0.04),
            ],
        )
    }

    /// Number of `classify` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextClassifier for FixedClassifier {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn classify(&self, _text: &str) -> ClassifierResult<ResultSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ResultSet::from_unsorted(self.results.clone())?)
    }
}

/// Serves as its own factory: loading hands out a fresh copy.
#[async_trait]
impl ClassifierFactory for FixedClassifier {
    fn model(&self) -> &str {
        &self.model_id
    }

    async fn load(&self) -> ClassifierResult<Arc<dyn TextClassifier>> {
        Ok(Arc::new(FixedClassifier::new(
            self.model_id.clone(),
            self.results.clone(),
        )))
    }
}
