//! HTTP application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: the application context (classifier provider, sessions, feedback sink)
//! - `routes/`: HTTP routes + handlers
//! - `render.rs`: HTML for the landing and analysis views
//! - `dto.rs`: form bodies
//! - `errors.rs`: user-facing messages for rejected input and model failures
//! - `session_store.rs` / `feedback.rs`: the two storage seams

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tracing::{error, info};

use moodlens_ai::{ClassifierProvider, FixedClassifier};

use crate::config::{AppConfig, Backend};
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod feedback;
pub mod render;
pub mod routes;
pub mod services;
pub mod session_store;

use services::AppContext;

/// Build the application context from configuration.
///
/// The classifier is constructed here, eagerly, exactly once. A load failure
/// is returned to the caller, which treats it as fatal.
pub async fn bootstrap(config: &AppConfig) -> anyhow::Result<Arc<AppContext>> {
    let provider = match config.backend {
        Backend::Hub => ClassifierProvider::new(config.hub.clone()),
        Backend::Fixed => ClassifierProvider::new(FixedClassifier::mental_health_demo()),
    };

    info!(model = provider.model_id(), backend = ?config.backend, "starting classifier");
    if let Err(e) = provider.get().await {
        error!(error = %e, "cannot start without a classifier");
        return Err(e.into());
    }

    let ctx = AppContext::new(Arc::new(provider))
        .with_max_input_chars(config.max_input_chars)
        .with_session_ttl(config.session_ttl);
    Ok(Arc::new(ctx))
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(ctx: Arc<AppContext>) -> Router {
    let sessions = routes::router()
        .layer(Extension(ctx))
        .layer(axum::middleware::from_fn(middleware::session_middleware));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(sessions)
        .layer(ServiceBuilder::new())
}
