//! HTTP surface for Letterbox.
//!
//! Exposes the auth routes (consent redirect, OAuth callback), the session
//! API (current user, logout) and the save-to-drive endpoint over axum,
//! with a cookie-carried session and a fixed CORS origin allow-list.

pub mod config;
pub mod cookie;
pub mod handlers;
pub mod state;

pub use config::ServerConfig;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// Build the application router with CORS applied.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/auth/google", get(handlers::begin_auth))
        .route("/auth/google/callback", get(handlers::auth_callback))
        .route("/auth/user", get(handlers::current_user))
        .route("/auth/logout", get(handlers::logout))
        .route("/save-to-drive", post(handlers::save_to_drive))
        .layer(cors)
        .with_state(state)
}

/// CORS restricted to the configured origins, with credentials enabled and
/// explicit methods and headers.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Skipping unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}
