//! Per-session state object.

use chrono::{DateTime, Utc};

use crate::error::DomainResult;
use crate::id::SessionId;
use crate::input::AnalysisInput;
use crate::result::ResultSet;
use crate::view::ViewState;

/// Everything one browser session remembers between interactions.
///
/// Sessions are independent values: nothing in here is shared with other
/// sessions, and the request path owns a copy while it works on it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSession {
    id: SessionId,
    view: ViewState,
    last_input: String,
    last_results: Option<ResultSet>,
    created_at: DateTime<Utc>,
    last_seen: DateTime<Utc>,
}

impl AnalysisSession {
    pub fn new(id: SessionId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            view: ViewState::Landing,
            last_input: String::new(),
            last_results: None,
            created_at: now,
            last_seen: now,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.id
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn last_input(&self) -> &str {
        &self.last_input
    }

    pub fn last_results(&self) -> Option<&ResultSet> {
        self.last_results.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }

    /// Whether the session was last seen before `cutoff`.
    pub fn is_idle_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_seen < cutoff
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.last_seen {
            self.last_seen = now;
        }
    }

    /// "Get Started". Returns `true` if the view changed.
    pub fn start(&mut self) -> bool {
        let (view, changed) = self.view.start();
        self.view = view;
        changed
    }

    /// Remember what the user typed, whether or not it validates, so the
    /// form can be re-rendered with it.
    pub fn record_input(&mut self, raw: &str) {
        self.last_input = raw.to_string();
    }

    /// Validate the last recorded input against `max_chars`.
    pub fn validated_input(&self, max_chars: usize) -> DomainResult<AnalysisInput> {
        AnalysisInput::parse(self.last_input.clone(), max_chars)
    }

    pub fn record_results(&mut self, results: ResultSet) {
        self.last_results = Some(results);
    }

    /// Forget the shown results, e.g. when the text they belong to was replaced
    /// by input that never reached the classifier.
    pub fn clear_results(&mut self) {
        self.last_results = None;
    }
}
