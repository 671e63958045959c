//! Request handlers for the auth, session and save endpoints.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use letterbox_common::{Error, Result, SessionId};
use letterbox_drive::fetch_identity;
use letterbox_session::Session;

use crate::cookie;
use crate::state::AppState;

/// Query parameters the provider sends to the OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Body of a save-to-drive request.
#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub content: String,
}

/// Handles GET /auth/google: redirect the browser to the provider consent
/// screen.
pub async fn begin_auth(State(state): State<AppState>) -> Response {
    let (url, _csrf) = state.auth.authorization_url();
    found(&url)
}

/// Handles GET /auth/google/callback: complete the code exchange and
/// establish a session. Success redirects to the editor view; any failure
/// returns the user to the login view with no structured body.
pub async fn auth_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Response {
    match complete_auth(&state, params).await {
        Ok(session_id) => (
            StatusCode::FOUND,
            [
                (
                    header::SET_COOKIE,
                    cookie::session_cookie(session_id.as_str(), state.config.cookie_secure),
                ),
                (header::LOCATION, state.config.editor_url.clone()),
            ],
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Sign-in failed");
            found(&state.config.login_url)
        }
    }
}

/// A plain 302 redirect, matching the browser-facing contract.
fn found(url: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response()
}

async fn complete_auth(state: &AppState, params: CallbackParams) -> Result<SessionId> {
    if let Some(error) = params.error {
        return Err(Error::ProviderAuth(format!("Consent denied: {}", error)));
    }
    let code = params
        .code
        .ok_or_else(|| Error::ProviderAuth("Missing authorization code".to_string()))?;

    let token = state.auth.exchange_code(&code).await?;
    let identity = fetch_identity(&state.http, &token).await?;

    tracing::info!(subject = %identity.subject, "Session established");

    let session = Session::new(identity, token);
    let session_id = session.id.clone();
    state.sessions.insert(session).await?;

    Ok(session_id)
}

/// Handles GET /auth/user: the caller's identity, never the delegated
/// token.
pub async fn current_user(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match current_session(&state, &headers).await {
        Some(session) => Json(json!({ "profile": session.identity })).into_response(),
        None => unauthorized(),
    }
}

/// Handles GET /auth/logout: destroy the session (best-effort) and clear
/// the cookie. Absent sessions still get a 200; only a genuine store
/// failure yields a 500.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(id) = cookie::session_id(&headers) {
        if let Err(e) = state.sessions.remove(&id).await {
            tracing::error!(error = %e, "Session destroy failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Failed to destroy session: {}", e) })),
            )
                .into_response();
        }
    }

    (
        [(
            header::SET_COOKIE,
            cookie::clear_cookie(state.config.cookie_secure),
        )],
        Json(json!({ "message": "Logged out successfully" })),
    )
        .into_response()
}

/// Handles POST /save-to-drive: run the two-step upload for the caller's
/// session and relay the provider's response verbatim.
pub async fn save_to_drive(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SaveRequest>,
) -> Response {
    let Some(session) = current_session(&state, &headers).await else {
        return unauthorized();
    };

    match state.gateway.save_letter(&session, &request.content).await {
        Ok(file) => Json(file).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Save to drive failed");
            error_response(e)
        }
    }
}

/// Resolve the caller's session from the cookie. A store read failure is
/// treated as no session.
async fn current_session(state: &AppState, headers: &HeaderMap) -> Option<Session> {
    let id = cookie::session_id(headers)?;
    state.sessions.get(&id).await.ok().flatten()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized" })),
    )
        .into_response()
}

/// Map an error to its HTTP shape: 401 for missing auth, 500 with an
/// `{error}` body for everything else. Upstream 4xx and 5xx are not
/// distinguished.
fn error_response(err: Error) -> Response {
    let status = match err {
        Error::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
