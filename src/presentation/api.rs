use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

use crate::application::{AlbumUseCase, CreateProfileUseCase, GalleryStatsUseCase, ListTravellersUseCase};
use crate::domain::{DomainError, PhotoId, ProfileDraft};
use crate::presentation::auth::{self, SessionToken, SharedSessions};

// App State
#[derive(Clone)]
pub struct AppState {
    pub album_use_case: Arc<AlbumUseCase>,
    pub travellers_use_case: Arc<ListTravellersUseCase>,
    pub stats_use_case: Arc<GalleryStatsUseCase>,
    pub profile_use_case: Arc<CreateProfileUseCase>,
    pub sessions: SharedSessions,
}

// Error handling
impl IntoResponse for DomainError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            DomainError::Network(e) => error!("Upstream Error: {}", e),
            DomainError::Malformed(e) => error!("Malformed Upstream Response: {}", e),
            DomainError::Unauthorized(e) => warn!("Rejected: {}", e),
            DomainError::NotFound | DomainError::Busy | DomainError::Validation(_) => {}
        }

        let (status, message) = match self {
            DomainError::Network(_) | DomainError::Malformed(_) => {
                (StatusCode::BAD_GATEWAY, "Failed to reach the photo directory".to_string())
            }
            DomainError::NotFound => (StatusCode::NOT_FOUND, "Photo not found".to_string()),
            DomainError::Busy => (StatusCode::CONFLICT, "Photos are still loading".to_string()),
            DomainError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

pub const TRAVELLERS_ERROR_MESSAGE: &str = "Failed to load travellers. Please try again later.";
pub const STATS_ERROR_MESSAGE: &str = "Failed to fetch data for statistics.";
pub const PROFILE_ERROR_MESSAGE: &str = "Failed to create profile. Please try again.";

/// Upstream failures get the page's own message; anything else keeps its
/// usual response.
fn page_error(err: DomainError, message: &str) -> Response {
    match err {
        DomainError::Network(e) | DomainError::Malformed(e) => {
            error!("Upstream Error: {}", e);
            (StatusCode::BAD_GATEWAY, Json(json!({ "error": message }))).into_response()
        }
        other => other.into_response(),
    }
}

pub fn app_router(state: AppState) -> Router {
    // Always accessible
    let public_routes = Router::new()
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/auth-check", get(auth_check_handler))
        .route("/travellers", get(travellers_handler))
        .route("/profiles", post(create_profile_handler))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/album", get(album_handler))
        .route("/album/reload", post(reload_handler))
        .route("/album/search", post(search_handler))
        .route("/album/photos/{id}/like", post(like_handler))
        .route("/stats", get(stats_handler))
        .layer(axum::middleware::from_fn(auth::require_session))
        .layer(Extension(state.sessions.clone()))
        .with_state(state);

    Router::new().merge(public_routes).merge(protected_routes)
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let session = state.sessions.login(&body.email, &body.password)?;
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, auth::session_cookie(&session.token))],
        Json(json!({ "ok": true, "email": session.email })),
    ))
}

async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = auth::extract_token(&headers) {
        state.album_use_case.close(&token);
        state.sessions.logout(&token);
    }
    (
        StatusCode::OK,
        [(header::SET_COOKIE, auth::cleared_cookie())],
        Json(json!({ "ok": true })),
    )
}

async fn auth_check_handler(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let authenticated = auth::extract_token(&headers)
        .map(|token| state.sessions.is_authenticated(&token))
        .unwrap_or(false);
    let status = if authenticated { StatusCode::OK } else { StatusCode::UNAUTHORIZED };
    (status, Json(json!({ "authenticated": authenticated })))
}

async fn travellers_handler(State(state): State<AppState>) -> Result<impl IntoResponse, Response> {
    let travellers = state
        .travellers_use_case
        .execute()
        .await
        .map_err(|e| page_error(e, TRAVELLERS_ERROR_MESSAGE))?;
    Ok(Json(travellers))
}

async fn create_profile_handler(
    State(state): State<AppState>,
    Json(draft): Json<ProfileDraft>,
) -> Result<impl IntoResponse, Response> {
    let profile = state
        .profile_use_case
        .execute(draft)
        .await
        .map_err(|e| page_error(e, PROFILE_ERROR_MESSAGE))?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn album_handler(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> impl IntoResponse {
    Json(state.album_use_case.open(&token).await)
}

async fn reload_handler(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> impl IntoResponse {
    Json(state.album_use_case.reload(&token).await)
}

#[derive(Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

async fn search_handler(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Json(body): Json<SearchRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let snapshot = state.album_use_case.search(&token, &body.query).await?;
    Ok(Json(snapshot))
}

async fn like_handler(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
    Path(id): Path<PhotoId>,
) -> Result<impl IntoResponse, DomainError> {
    let result = state.album_use_case.toggle_like(&token, id).await?;
    Ok(Json(result))
}

async fn stats_handler(State(state): State<AppState>) -> Result<impl IntoResponse, Response> {
    let overview = state
        .stats_use_case
        .execute()
        .await
        .map_err(|e| page_error(e, STATS_ERROR_MESSAGE))?;
    Ok(Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "stats": overview.stats,
        "topPhotographers": overview.top_photographers,
    })))
}
