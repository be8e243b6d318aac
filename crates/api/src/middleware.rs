use axum::{
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use moodlens_core::SessionId;

use crate::context::SessionContext;

pub const SESSION_COOKIE: &str = "moodlens_session";

/// Attach a [`SessionContext`] to every request.
///
/// A browser without a valid session cookie gets a fresh id, and the
/// response carries the cookie that pins it to that id.
pub async fn session_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let ctx = match extract_session(req.headers()) {
        Some(id) => SessionContext::new(id, false),
        None => {
            let id = SessionId::new();
            debug!(session = %id, "issuing new session");
            SessionContext::new(id, true)
        }
    };

    req.extensions_mut().insert(ctx);
    let mut res = next.run(req).await;

    if ctx.is_new() {
        let cookie = format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            ctx.session_id()
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            res.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    res
}

fn extract_session(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        h
    }

    #[test]
    fn finds_session_among_other_cookies() {
        let id = SessionId::new();
        let h = headers(&format!("theme=dark; {SESSION_COOKIE}={id}; lang=en"));
        assert_eq!(extract_session(&h), Some(id));
    }

    #[test]
    fn missing_or_malformed_cookie_yields_none() {
        assert_eq!(extract_session(&HeaderMap::new()), None);
        assert_eq!(extract_session(&headers("theme=dark")), None);
        assert_eq!(extract_session(&headers(&format!("{SESSION_COOKIE}=garbage"))), None);
    }
}
