use axum::{
    Router,
    routing::{get, post},
};

pub mod feedback;
pub mod pages;
pub mod system;

/// Router for all session-scoped endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/start", post(pages::start))
        .route("/analyze", post(pages::analyze))
        .route("/feedback", post(feedback::submit))
}
