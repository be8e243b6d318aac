use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use moodlens_core::{AnalysisSession, SessionId};

/// Session-isolated state store.
///
/// Callers work on a **copy** of the session and write it back with
/// [`upsert`](SessionStore::upsert); nothing is shared between sessions.
pub trait SessionStore: Send + Sync {
    fn get(&self, id: SessionId) -> Option<AnalysisSession>;
    fn upsert(&self, session: AnalysisSession);
    fn len(&self) -> usize;

    /// Drop every session last seen before `cutoff`; returns how many went.
    fn evict_idle(&self, cutoff: DateTime<Utc>) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Existing session for `id`, or a fresh one on the landing view.
    ///
    /// A stored session idle since before `idle_cutoff` counts as gone.
    fn get_or_create(
        &self,
        id: SessionId,
        now: DateTime<Utc>,
        idle_cutoff: Option<DateTime<Utc>>,
    ) -> AnalysisSession {
        let mut session = self
            .get(id)
            .filter(|s| idle_cutoff.is_none_or(|cutoff| !s.is_idle_since(cutoff)))
            .unwrap_or_else(|| AnalysisSession::new(id, now));
        session.touch(now);
        session
    }
}

/// In-memory store; sessions live as long as the process.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: RwLock<HashMap<SessionId, AnalysisSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, id: SessionId) -> Option<AnalysisSession> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    fn upsert(&self, session: AnalysisSession) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(session.session_id(), session);
        }
    }

    fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    fn evict_idle(&self, cutoff: DateTime<Utc>) -> usize {
        let Ok(mut map) = self.inner.write() else {
            return 0;
        };
        let before = map.len();
        map.retain(|_, s| !s.is_idle_since(cutoff));
        before - map.len()
    }
}
