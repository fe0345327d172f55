//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`       - Health check with storage round-trip (public)
//! - `GET  /{key}`        - Follow a redirect (public)
//! - `{API_PATH}/v1/*`    - Redirect management API (Bearer token when configured)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token on API routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the routes with shared state and middleware applied.
///
/// `api_path` must start with `/` and must not end with one.
pub fn router(state: AppState, api_path: &str) -> Router {
    let api_router = api::routes::api_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/health", get(health_handler))
        .route("/{key}", get(redirect_handler))
        .nest(api_path, api_router)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] with trailing slashes trimmed.
pub fn app_router(state: AppState, api_path: &str) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, api_path))
}
