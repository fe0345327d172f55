//! Handler for redirect lookup.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::redirect::RedirectView;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the redirect stored under `key` without following it.
///
/// # Endpoint
///
/// `GET {API_PATH}/v1/lookup/{key}`
///
/// # Response
///
/// ```json
/// { "key": "abc123", "location": "https://example.com/page", "instant": false }
/// ```
pub async fn lookup_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<RedirectView>, AppError> {
    let redirect = state.redirect_service.resolve(&key).await?;

    Ok(Json(RedirectView::from(&redirect)))
}
