use std::sync::Arc;

use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::{Html, IntoResponse},
};

use moodlens_core::FeedbackChoice;

use crate::app::dto::FeedbackForm;
use crate::app::render::{self, Notice};
use crate::app::routes::pages::render_session;
use crate::app::services::{AppContext, FeedbackOutcome};
use crate::context::SessionContext;

pub async fn submit(
    Extension(ctx): Extension<Arc<AppContext>>,
    Extension(session): Extension<SessionContext>,
    Form(form): Form<FeedbackForm>,
) -> axum::response::Response {
    let choice = match form.choice.as_deref() {
        None | Some("") => FeedbackChoice::default(),
        Some(raw) => match raw.parse::<FeedbackChoice>() {
            Ok(c) => c,
            Err(e) => {
                let state = ctx.session(session.session_id());
                if !state.view().shows_form() {
                    return Html(render::landing_page()).into_response();
                }
                let notice = Notice::Warning(format!("⚠ {e}"));
                return (
                    StatusCode::BAD_REQUEST,
                    Html(render_session(&ctx, &state, Some(notice))),
                )
                    .into_response();
            }
        },
    };

    let (state, outcome) = ctx.submit_feedback(
        session.session_id(),
        choice,
        form.corrected_label.as_deref(),
        form.comment.as_deref(),
    );

    match outcome {
        FeedbackOutcome::NotStarted => Html(render::landing_page()).into_response(),
        FeedbackOutcome::Accepted(record) => {
            let notice = Notice::Success(record.acknowledgment().to_string());
            Html(render_session(&ctx, &state, Some(notice))).into_response()
        }
    }
}
