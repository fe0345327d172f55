//! Handlers for redirect creation.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::redirect::{CreateRedirectRequest, CreateRedirectResponse, RedirectView};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a redirect, generating a key unless the body names one.
///
/// # Endpoint
///
/// `POST {API_PATH}/v1/create`
///
/// # Request Body
///
/// ```json
/// {
///   "location": "https://example.com/page",
///   "instant": true,   // optional, default false
///   "key": "abc123"    // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "redirect": { "key": "abc123", "location": "https://example.com/page", "instant": true }
/// }
/// ```
///
/// # Errors
///
/// - 400 if the location or key is invalid
/// - 409 if the key is already taken
/// - 503 if storage is unreachable
pub async fn create_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateRedirectRequest>,
) -> Result<Json<CreateRedirectResponse>, AppError> {
    create(&state, None, payload).await
}

/// Creates a redirect under the key given in the path.
///
/// # Endpoint
///
/// `POST {API_PATH}/v1/create/{key}`
///
/// The path key takes precedence over `key` in the body.
pub async fn create_with_key_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(payload): Json<CreateRedirectRequest>,
) -> Result<Json<CreateRedirectResponse>, AppError> {
    create(&state, Some(key), payload).await
}

async fn create(
    state: &AppState,
    path_key: Option<String>,
    payload: CreateRedirectRequest,
) -> Result<Json<CreateRedirectResponse>, AppError> {
    payload.validate()?;

    let key = path_key.or(payload.key);

    let redirect = state
        .redirect_service
        .create(
            &payload.location,
            key.as_deref(),
            payload.instant.unwrap_or(false),
        )
        .await?;

    Ok(Json(CreateRedirectResponse {
        success: true,
        redirect: RedirectView::from(&redirect),
    }))
}
