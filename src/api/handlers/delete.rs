//! Handler for redirect removal.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::redirect::DeleteRedirectResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes the redirect stored under `key`.
///
/// # Endpoint
///
/// `DELETE {API_PATH}/v1/delete/{key}`
///
/// # Errors
///
/// Returns 404 Not Found if no redirect uses the key.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteRedirectResponse>, AppError> {
    state.redirect_service.delete(&key).await?;

    Ok(Json(DeleteRedirectResponse { success: true }))
}
