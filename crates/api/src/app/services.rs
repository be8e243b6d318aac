//! Application context: everything request handlers need, built once at startup.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use moodlens_ai::{ClassifierError, ClassifierProvider};
use moodlens_core::{
    AnalysisSession, DEFAULT_MAX_INPUT_CHARS, DomainError, FeedbackChoice, FeedbackRecord,
    LabelCatalog, ResultSet, SessionId,
};

use crate::app::feedback::{FeedbackSink, TracingFeedbackSink};
use crate::app::session_store::{InMemorySessionStore, SessionStore};

/// Process-wide application context.
///
/// Owns the classifier provider (and through it the single classifier
/// instance), the immutable label tables, the session store and the feedback
/// sink. Shared across handlers behind an `Arc`.
pub struct AppContext {
    provider: Arc<ClassifierProvider>,
    catalog: LabelCatalog,
    sessions: Arc<dyn SessionStore>,
    feedback: Arc<dyn FeedbackSink>,
    max_input_chars: usize,
    session_ttl: Duration,
}

/// Default idle time after which a session is forgotten.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// What happened to one "Analyze" action.
#[derive(Debug)]
pub enum AnalyzeOutcome {
    /// The session is still on the landing view; nothing ran.
    NotStarted,
    /// Input was rejected before the classifier was called.
    Rejected(DomainError),
    /// The classifier answered.
    Classified(ResultSet),
    /// The classifier could not be constructed or failed on this input.
    Failed(ClassifierError),
}

/// What happened to one feedback submission.
#[derive(Debug)]
pub enum FeedbackOutcome {
    NotStarted,
    Accepted(FeedbackRecord),
}

impl AppContext {
    pub fn new(provider: Arc<ClassifierProvider>) -> Self {
        Self {
            provider,
            catalog: LabelCatalog::mental_health(),
            sessions: Arc::new(InMemorySessionStore::new()),
            feedback: Arc::new(TracingFeedbackSink),
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }

    pub fn with_session_store(mut self, sessions: Arc<dyn SessionStore>) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn with_feedback_sink(mut self, feedback: Arc<dyn FeedbackSink>) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }

    pub fn with_session_ttl(mut self, session_ttl: Duration) -> Self {
        self.session_ttl = session_ttl;
        self
    }

    pub fn provider(&self) -> &ClassifierProvider {
        &self.provider
    }

    pub fn catalog(&self) -> &LabelCatalog {
        &self.catalog
    }

    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }

    /// Current state of a session (a fresh landing session if unknown or idle
    /// for longer than the session TTL).
    pub fn session(&self, id: SessionId) -> AnalysisSession {
        let now = Utc::now();
        self.sessions.get_or_create(id, now, self.idle_cutoff(now))
    }

    /// Sessions last seen before this instant are expired. `None` when the TTL
    /// is too large to subtract.
    fn idle_cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        chrono::Duration::from_std(self.session_ttl)
            .ok()
            .and_then(|ttl| now.checked_sub_signed(ttl))
    }

    /// "Get Started": move the session to the analysis view.
    ///
    /// This is the only path that stores a new session, so idle sessions are
    /// swept here.
    pub fn start(&self, id: SessionId) -> AnalysisSession {
        if let Some(cutoff) = self.idle_cutoff(Utc::now()) {
            let evicted = self.sessions.evict_idle(cutoff);
            if evicted > 0 {
                info!(evicted, remaining = self.sessions.len(), "expired idle sessions");
            }
        }

        let mut session = self.session(id);
        if session.start() {
            info!(session = %id, "session started");
        }
        self.sessions.upsert(session.clone());
        session
    }

    /// "Analyze": validate, classify, remember.
    ///
    /// Returns the session as it stands after the action together with the
    /// outcome. Only this session's state is touched.
    ///
    /// The session is read before classification and written back whole
    /// afterwards, so for concurrent requests from the same browser the last
    /// write wins. Rejected input clears the previous results; a failed
    /// inference keeps them.
    pub async fn analyze(&self, id: SessionId, raw: &str) -> (AnalysisSession, AnalyzeOutcome) {
        let mut session = self.session(id);
        if !session.view().shows_form() {
            return (session, AnalyzeOutcome::NotStarted);
        }

        session.record_input(raw);
        let input = match session.validated_input(self.max_input_chars) {
            Ok(input) => input,
            Err(e) => {
                info!(session = %id, reason = %e, "input rejected");
                session.clear_results();
                self.sessions.upsert(session.clone());
                return (session, AnalyzeOutcome::Rejected(e));
            }
        };

        let outcome = match self.classify(id, input.as_str(), input.char_count()).await {
            Ok(results) => {
                session.record_results(results.clone());
                AnalyzeOutcome::Classified(results)
            }
            Err(e) => AnalyzeOutcome::Failed(e),
        };

        self.sessions.upsert(session.clone());
        (session, outcome)
    }

    async fn classify(&self, id: SessionId, text: &str, chars: usize) -> Result<ResultSet, ClassifierError> {
        let classifier = self.provider.get().await?;
        let started = Instant::now();

        match classifier.classify(text).await {
            Ok(results) => {
                info!(
                    session = %id,
                    chars,
                    labels = results.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "text analyzed"
                );
                Ok(results)
            }
            Err(e) => {
                warn!(session = %id, chars, error = %e, "inference failed");
                Err(e)
            }
        }
    }

    /// "Submit Feedback": build the record and hand it to the sink.
    pub fn submit_feedback(
        &self,
        id: SessionId,
        choice: FeedbackChoice,
        corrected_label: Option<&str>,
        comment: Option<&str>,
    ) -> (AnalysisSession, FeedbackOutcome) {
        let session = self.session(id);
        if !session.view().shows_form() {
            return (session, FeedbackOutcome::NotStarted);
        }

        let primary_label = session.last_results().map(|r| r.primary().label.clone());
        let record = FeedbackRecord::new(
            id,
            primary_label,
            choice,
            corrected_label,
            comment,
            Utc::now(),
        );
        self.feedback.submit(&record);
        self.sessions.upsert(session.clone());

        (session, FeedbackOutcome::Accepted(record))
    }
}
