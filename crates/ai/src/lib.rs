//! `moodlens-ai`
//!
//! **Responsibility:** the boundary to the text-classification model.
//!
//! - `TextClassifier` is the capability request handlers call.
//! - `ClassifierProvider` owns construction of that capability and runs it at
//!   most once per process.
//! - `HubClassifier` talks to a Hugging Face style inference endpoint;
//!   `FixedClassifier` returns a canned distribution for tests and offline dev.
//!
//! Nothing in here knows about HTTP sessions or HTML.

pub mod classifier;
pub mod error;
pub mod fixed;
pub mod hub;
pub mod provider;

pub use classifier::{ClassifierFactory, TextClassifier};
pub use error::{ClassifierError, ClassifierResult};
pub use fixed::FixedClassifier;
pub use hub::{DEFAULT_MODEL_ID, HubClassifier, HubConfig};
pub use provider::ClassifierProvider;
