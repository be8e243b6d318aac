use moodlens_core::SessionId;

/// Session context for a request.
///
/// Inserted by the session middleware; immutable for the rest of the request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionContext {
    session_id: SessionId,
    is_new: bool,
}

impl SessionContext {
    pub fn new(session_id: SessionId, is_new: bool) -> Self {
        Self { session_id, is_new }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Whether the browser arrived without a usable session cookie.
    pub fn is_new(&self) -> bool {
        self.is_new
    }
}
