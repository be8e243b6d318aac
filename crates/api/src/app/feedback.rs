use std::sync::Mutex;

use tracing::info;

use moodlens_core::FeedbackRecord;

/// Destination for submitted feedback.
///
/// This is the storage extension point. The shipped sinks do not persist
/// anything; a spreadsheet or database sink plugs in here.
pub trait FeedbackSink: Send + Sync + 'static {
    fn submit(&self, record: &FeedbackRecord);
}

/// Logs each record as a structured event and forgets it.
#[derive(Debug, Default)]
pub struct TracingFeedbackSink;

impl FeedbackSink for TracingFeedbackSink {
    fn submit(&self, record: &FeedbackRecord) {
        info!(
            feedback = %record.id,
            session = %record.session_id,
            primary_label = record.primary_label.as_deref().unwrap_or("-"),
            correct = record.correct,
            corrected_label = record.corrected_label.as_deref().unwrap_or("-"),
            has_comment = record.comment.is_some(),
            "feedback received"
        );
    }
}

/// In-memory sink for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryFeedbackSink {
    inner: Mutex<Vec<FeedbackRecord>>,
}

impl InMemoryFeedbackSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<FeedbackRecord> {
        self.inner.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl FeedbackSink for InMemoryFeedbackSink {
    fn submit(&self, record: &FeedbackRecord) {
        if let Ok(mut v) = self.inner.lock() {
            v.push(record.clone());
        }
    }
}
