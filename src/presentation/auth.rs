use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::domain::SessionProvider;
use crate::infrastructure::SESSION_TTL_DAYS;

pub const SESSION_COOKIE: &str = "lens_session";

/// The caller's session token, attached to the request once it has been verified.
#[derive(Clone, Debug)]
pub struct SessionToken(pub String);

pub type SharedSessions = Arc<dyn SessionProvider>;

/// Extract the session token from the `lens_session` cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    cookie_header.split(';').find_map(|part| {
        part.trim()
            .strip_prefix("lens_session=")
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    })
}

pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}",
        SESSION_COOKIE,
        token,
        60 * 60 * 24 * SESSION_TTL_DAYS
    )
}

pub fn cleared_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0", SESSION_COOKIE)
}

/// Axum middleware that checks for a valid session cookie.
/// Returns 401 if not authenticated.
pub async fn require_session(mut req: Request, next: Next) -> Response {
    // The provider is stored as an extension on the request by the layer
    let sessions = req.extensions().get::<SharedSessions>().cloned();

    if let (Some(sessions), Some(token)) = (sessions, extract_token(req.headers())) {
        if sessions.is_authenticated(&token) {
            req.extensions_mut().insert(SessionToken(token));
            return next.run(req).await;
        }
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Login required" })),
    )
        .into_response()
}
