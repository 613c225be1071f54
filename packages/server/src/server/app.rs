//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use resolver::SessionManager;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::routes::{extract_property_handler, extract_riding_handler, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Process-wide browser session, shared by both extraction routes
    pub sessions: Arc<SessionManager>,
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/extract-riding", post(extract_riding_handler))
        .route("/extract-property", post(extract_property_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
