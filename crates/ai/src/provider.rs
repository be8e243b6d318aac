//! Single-construction owner of the process-wide classifier.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::classifier::{ClassifierFactory, TextClassifier};
use crate::error::ClassifierResult;

/// Owns the classifier for the lifetime of the application context.
///
/// Lifecycle:
/// - Built once at startup from a [`ClassifierFactory`].
/// - The first [`get`](Self::get) runs the factory; concurrent first callers
///   wait on the same construction.
/// - Every later call returns a clone of the same `Arc`.
/// - A failed construction is not cached, so a later `get` tries again. The
///   binary treats the first failure as fatal and never gets there.
pub struct ClassifierProvider {
    factory: Box<dyn ClassifierFactory>,
    cell: OnceCell<Arc<dyn TextClassifier>>,
    loads: AtomicUsize,
}

impl ClassifierProvider {
    pub fn new(factory: impl ClassifierFactory) -> Self {
        Self {
            factory: Box::new(factory),
            cell: OnceCell::new(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Provider around an already constructed classifier (tests/dev).
    pub fn ready(classifier: Arc<dyn TextClassifier>) -> Self {
        let model = classifier.model_id().to_string();
        Self {
            factory: Box::new(Prebuilt(model, classifier.clone())),
            cell: OnceCell::new_with(Some(classifier)),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn model_id(&self) -> &str {
        self.factory.model()
    }

    /// Return the classifier, constructing it on first use.
    pub async fn get(&self) -> ClassifierResult<Arc<dyn TextClassifier>> {
        let classifier = self
            .cell
            .get_or_try_init(|| async {
                let model = self.factory.model();
                info!(model, "loading classifier");
                let started = Instant::now();
                self.loads.fetch_add(1, Ordering::SeqCst);

                match self.factory.load().await {
                    Ok(c) => {
                        info!(
                            model,
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "classifier ready"
                        );
                        Ok(c)
                    }
                    Err(e) => {
                        error!(model, error = %e, "classifier load failed");
                        Err(e)
                    }
                }
            })
            .await?;

        Ok(classifier.clone())
    }

    /// Whether construction already succeeded.
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// How many times the factory has been invoked.
    pub fn load_attempts(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

struct Prebuilt(String, Arc<dyn TextClassifier>);

#[async_trait::async_trait]
impl ClassifierFactory for Prebuilt {
    fn model(&self) -> &str {
        &self.0
    }

    async fn load(&self) -> ClassifierResult<Arc<dyn TextClassifier>> {
        Ok(self.1.clone())
    }
}
