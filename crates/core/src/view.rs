//! Two-state view toggle for a session.

use serde::{Deserialize, Serialize};

/// Which page a session sees.
///
/// `Landing` is the initial state. `Analysis` is terminal: there is no
/// transition back.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Landing,
    Analysis,
}

impl ViewState {
    /// Apply the "Get Started" action.
    ///
    /// Returns the new state and whether a transition actually happened.
    /// Starting an already started session is a no-op.
    pub fn start(self) -> (Self, bool) {
        match self {
            Self::Landing => (Self::Analysis, true),
            Self::Analysis => (Self::Analysis, false),
        }
    }

    /// Whether the input form and analysis controls may be shown.
    pub fn shows_form(&self) -> bool {
        matches!(self, Self::Analysis)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Analysis => "analysis",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_landing_without_form() {
        let view = ViewState::default();
        assert_eq!(view, ViewState::Landing);
        assert!(!view.shows_form());
    }

    #[test]
    fn start_moves_to_analysis_once() {
        let (view, changed) = ViewState::Landing.start();
        assert_eq!(view, ViewState::Analysis);
        assert!(changed);

        let (again, changed) = view.start();
        assert_eq!(again, ViewState::Analysis);
        assert!(!changed);
        assert!(again.shows_form());
    }
}
