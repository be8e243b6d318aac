//! `moodlens-core` — domain building blocks for the text analysis front-end.
//!
//! This crate is **pure** (no HTTP or other IO). It owns the
//! result ordering rules, the label lookup tables, the per-session state
//! object and the feedback record.

pub mod error;
pub mod feedback;
pub mod id;
pub mod input;
pub mod labels;
pub mod result;
pub mod session;
pub mod view;

pub use error::{DomainError, DomainResult};
pub use feedback::{FEEDBACK_ACKNOWLEDGMENT, FeedbackChoice, FeedbackRecord};
pub use id::{FeedbackId, SessionId};
pub use input::{AnalysisInput, DEFAULT_MAX_INPUT_CHARS};
pub use labels::{FALLBACK_EXPLANATION, LabelCatalog, SeverityBand};
pub use result::{ClassificationResult, PrimaryResult, ResultSet};
pub use session::AnalysisSession;
pub use view::ViewState;
