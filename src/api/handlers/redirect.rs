//! Handler for following a short key.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Interstitial page shown for non-instant redirects.
///
/// Renders `templates/redirect.html`.
#[derive(Template, WebTemplate)]
#[template(path = "redirect.html")]
struct RedirectTemplate {
    key: String,
    /// Encoded form, safe for `href` and the refresh header.
    target: String,
    /// Decoded form, for display.
    location: String,
}

/// Follows the redirect stored under `key`.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// Instant redirects answer with the configured redirect status and a
/// `Location` header. Others render an interstitial page linking to the
/// target.
///
/// # Errors
///
/// Returns 404 Not Found if the key is unknown.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let redirect = state.redirect_service.resolve(&key).await?;

    if redirect.instant() {
        debug!(key = %key, "Instant redirect");

        let location = HeaderValue::from_str(redirect.encoded_location()).map_err(|e| {
            AppError::internal(
                "Stored location is not a valid header value",
                json!({ "key": key, "reason": e.to_string() }),
            )
        })?;

        return Ok((state.redirect_status, [(header::LOCATION, location)]).into_response());
    }

    debug!(key = %key, "Interstitial redirect");

    Ok(RedirectTemplate {
        target: redirect.encoded_location().to_string(),
        location: redirect.location(),
        key,
    }
    .into_response())
}
