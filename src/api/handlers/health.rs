//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthResponse};
use crate::state::AppState;

/// Returns service health with a storage round-trip check.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Storage answered
/// - **503 Service Unavailable**: Storage failed or timed out
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "storage": { "status": "ok", "engine": "mongodb" }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let engine = state.redirect_service.engine().to_string();

    let (healthy, storage) = match state.redirect_service.health_check().await {
        Ok(()) => (
            true,
            CheckStatus {
                status: "ok".to_string(),
                engine,
                message: None,
            },
        ),
        Err(e) => (
            false,
            CheckStatus {
                status: "error".to_string(),
                engine,
                message: Some(e.to_string()),
            },
        ),
    };

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage,
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
