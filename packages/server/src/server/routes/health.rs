use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    browser: BrowserHealth,
}

#[derive(Serialize)]
pub struct BrowserHealth {
    /// Whether a connected browser session currently exists. False is
    /// normal before the first lookup; the session launches lazily.
    session_active: bool,
}

/// Health check endpoint
///
/// Reports process liveness and browser-session state. Never launches a
/// browser itself.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let session_active = state.sessions.has_live_session().await;

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            browser: BrowserHealth { session_active },
        }),
    )
}
