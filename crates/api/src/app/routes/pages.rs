use std::sync::Arc;

use axum::{
    extract::{Extension, Form},
    response::{Html, IntoResponse, Redirect},
};

use moodlens_core::{AnalysisSession, ViewState};

use crate::app::dto::AnalyzeForm;
use crate::app::errors;
use crate::app::render::{self, AnalysisView, Notice};
use crate::app::services::{AnalyzeOutcome, AppContext};
use crate::context::SessionContext;

pub async fn index(
    Extension(ctx): Extension<Arc<AppContext>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    let state = ctx.session(session.session_id());
    match state.view() {
        ViewState::Landing => Html(render::landing_page()).into_response(),
        ViewState::Analysis => Html(render_session(&ctx, &state, None)).into_response(),
    }
}

pub async fn start(
    Extension(ctx): Extension<Arc<AppContext>>,
    Extension(session): Extension<SessionContext>,
) -> Redirect {
    ctx.start(session.session_id());
    Redirect::to("/")
}

pub async fn analyze(
    Extension(ctx): Extension<Arc<AppContext>>,
    Extension(session): Extension<SessionContext>,
    Form(form): Form<AnalyzeForm>,
) -> axum::response::Response {
    let (state, outcome) = ctx.analyze(session.session_id(), &form.text).await;

    match outcome {
        AnalyzeOutcome::NotStarted => Html(render::landing_page()).into_response(),
        AnalyzeOutcome::Rejected(e) => {
            let notice = Notice::Warning(errors::input_warning(&e));
            let view = AnalysisView {
                input: state.last_input(),
                notice: Some(notice),
                results: None,
                max_input_chars: ctx.max_input_chars(),
            };
            Html(render::analysis_page(&view, ctx.catalog())).into_response()
        }
        AnalyzeOutcome::Classified(_) => Html(render_session(&ctx, &state, None)).into_response(),
        AnalyzeOutcome::Failed(e) => {
            let (status, message) = errors::classifier_failure(&e);
            let view = AnalysisView {
                input: state.last_input(),
                notice: Some(Notice::Error(message)),
                results: None,
                max_input_chars: ctx.max_input_chars(),
            };
            (status, Html(render::analysis_page(&view, ctx.catalog()))).into_response()
        }
    }
}

/// Analysis view for the session's remembered input and results.
pub(crate) fn render_session(
    ctx: &AppContext,
    state: &AnalysisSession,
    notice: Option<Notice>,
) -> String {
    let view = AnalysisView {
        input: state.last_input(),
        notice,
        results: state.last_results(),
        max_input_chars: ctx.max_input_chars(),
    };
    render::analysis_page(&view, ctx.catalog())
}

