//! API route configuration.
//!
//! Routes are mounted under the configured API path and guarded by
//! [`crate::api::middleware::auth`] when a token is configured.

use crate::api::handlers::{
    create_handler, create_with_key_handler, delete_handler, key_handler, lookup_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Redirect management routes.
///
/// # Endpoints
///
/// - `POST   /v1/create`        - Create a redirect (key generated or taken from the body)
/// - `POST   /v1/create/{key}`  - Create a redirect under the given key
/// - `DELETE /v1/delete/{key}`  - Delete a redirect
/// - `GET    /v1/lookup/{key}`  - Show a redirect without following it
/// - `GET    /v1/key`           - Suggest a random key
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/create", post(create_handler))
        .route("/v1/create/{key}", post(create_with_key_handler))
        .route("/v1/delete/{key}", delete(delete_handler))
        .route("/v1/lookup/{key}", get(lookup_handler))
        .route("/v1/key", get(key_handler))
}
