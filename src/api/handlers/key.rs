//! Handler for key suggestions.

use axum::{Json, extract::State};

use crate::api::dto::redirect::KeySuggestionResponse;
use crate::state::AppState;

/// Suggests a random key matching the configured pattern.
///
/// # Endpoint
///
/// `GET {API_PATH}/v1/key`
///
/// The key is not reserved.
pub async fn key_handler(State(state): State<AppState>) -> Json<KeySuggestionResponse> {
    Json(KeySuggestionResponse {
        pattern: state.redirect_service.key_pattern().to_string(),
        key: state.redirect_service.suggest_key(),
    })
}
