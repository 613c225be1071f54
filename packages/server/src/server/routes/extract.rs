//! Extraction endpoints consumed by the volunteer-management UI.

use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::server::app::AppState;
use resolver::workflows;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Serialize)]
pub struct RidingResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    riding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    success: bool,
}

#[derive(Serialize)]
pub struct PropertyResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    success: bool,
}

fn required_address(req: &ExtractRequest) -> Option<String> {
    req.address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from)
}

/// Resolve a riding by driving the electoral-lookup site.
///
/// 400 when the address is missing, 500 on any automation failure.
pub async fn extract_riding_handler(
    Extension(state): Extension<AppState>,
    Json(req): Json<ExtractRequest>,
) -> (StatusCode, Json<RidingResponse>) {
    let address = match required_address(&req) {
        Some(address) => address,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(RidingResponse {
                    riding: None,
                    error: Some("address is required".to_string()),
                    success: false,
                }),
            )
        }
    };

    let result = state
        .sessions
        .with_page(move |driver| async move { workflows::extract_riding(&driver, &address).await })
        .await;

    match result {
        Ok(riding) => (
            StatusCode::OK,
            Json(RidingResponse {
                riding: Some(riding),
                error: None,
                success: true,
            }),
        ),
        Err(e) => {
            error!(error = %e, "riding extraction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RidingResponse {
                    riding: None,
                    error: Some(e.to_string()),
                    success: false,
                }),
            )
        }
    }
}

/// Resolve an assessed value by driving the property-assessment site.
///
/// 400 when the address is missing, 404 when the site had no value for
/// it, 500 on any other automation failure.
pub async fn extract_property_handler(
    Extension(state): Extension<AppState>,
    Json(req): Json<ExtractRequest>,
) -> (StatusCode, Json<PropertyResponse>) {
    let address = match required_address(&req) {
        Some(address) => address,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(PropertyResponse {
                    value: None,
                    error: Some("address is required".to_string()),
                    success: false,
                }),
            )
        }
    };

    let result = state
        .sessions
        .with_page(move |driver| async move {
            workflows::extract_assessed_value(&driver, &address).await
        })
        .await;

    match result {
        Ok(value) => (
            StatusCode::OK,
            Json(PropertyResponse {
                value: Some(value),
                error: None,
                success: true,
            }),
        ),
        Err(e) => {
            let status = if e.is_not_found() {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            error!(error = %e, status = %status, "property extraction failed");
            (
                status,
                Json(PropertyResponse {
                    value: None,
                    error: Some(e.to_string()),
                    success: false,
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resolver::SessionManager;
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState {
            sessions: Arc::new(SessionManager::new(true)),
        }
    }

    #[tokio::test]
    async fn test_riding_requires_address() {
        let (status, Json(body)) = extract_riding_handler(
            Extension(test_state()),
            Json(ExtractRequest { address: None }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert!(body.error.is_some());
        assert!(body.riding.is_none());
    }

    #[tokio::test]
    async fn test_riding_rejects_blank_address() {
        let (status, Json(body)) = extract_riding_handler(
            Extension(test_state()),
            Json(ExtractRequest {
                address: Some("   ".to_string()),
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
    }

    #[tokio::test]
    async fn test_property_requires_address() {
        let (status, Json(body)) = extract_property_handler(
            Extension(test_state()),
            Json(ExtractRequest { address: None }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert!(body.value.is_none());
    }
}
