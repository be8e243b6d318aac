//! Process configuration, read once from the environment at startup.

use std::time::Duration;

use moodlens_ai::HubConfig;
use moodlens_ai::hub::{DEFAULT_HUB_URL, DEFAULT_INFERENCE_URL, DEFAULT_MODEL_ID};
use moodlens_core::DEFAULT_MAX_INPUT_CHARS;
use tracing::warn;

use crate::app::services::DEFAULT_SESSION_TTL;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Which classifier backend the process loads.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Backend {
    /// Hosted inference endpoint.
    #[default]
    Hub,
    /// Canned distribution, no network (offline development).
    Fixed,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub backend: Backend,
    pub hub: HubConfig,
    pub max_input_chars: usize,
    /// Idle time after which a session is forgotten.
    pub session_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            backend: Backend::Hub,
            hub: HubConfig::default(),
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup (the environment in production).
    ///
    /// Unparseable numbers and unknown backends fall back to their defaults
    /// with a warning; nothing here is fatal.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend = match get("MOODLENS_BACKEND").as_deref() {
            None | Some("hub") => Backend::Hub,
            Some("fixed") => Backend::Fixed,
            Some(other) => {
                warn!(value = other, "unknown MOODLENS_BACKEND; using hub");
                Backend::Hub
            }
        };

        let number = |key: &str, default| parse_or(key, get(key), default);
        let timeout_secs = number("MOODLENS_REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);
        let session_ttl_secs = number("MOODLENS_SESSION_TTL_SECS", DEFAULT_SESSION_TTL.as_secs());
        let max_input_chars =
            parse_or("MOODLENS_MAX_INPUT_CHARS", get("MOODLENS_MAX_INPUT_CHARS"), DEFAULT_MAX_INPUT_CHARS);

        Self {
            bind_addr: get("MOODLENS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            backend,
            hub: HubConfig {
                model_id: get("MOODLENS_MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
                inference_url: get("MOODLENS_INFERENCE_URL")
                    .unwrap_or_else(|| DEFAULT_INFERENCE_URL.to_string()),
                hub_url: get("MOODLENS_HUB_URL").unwrap_or_else(|| DEFAULT_HUB_URL.to_string()),
                token: get("HF_TOKEN"),
                timeout: Duration::from_secs(timeout_secs),
                verify_model: true,
            },
            max_input_chars,
            session_ttl: Duration::from_secs(session_ttl_secs),
        }
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> T
where
    T: std::str::FromStr + Copy + PartialOrd + Default,
{
    match value {
        None => default,
        Some(raw) => match raw.parse::<T>() {
            Ok(v) if v > T::default() => v,
            _ => {
                warn!(key, value = %raw, "invalid value; using default");
                default
            }
        },
    }
}
