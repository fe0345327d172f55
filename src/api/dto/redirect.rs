//! DTOs for redirect management endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Redirect;

/// Request to create a redirect.
///
/// A key given in the URL path takes precedence over `key` in the body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRedirectRequest {
    /// Target URL; must be absolute.
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: String,

    /// Redirect at the HTTP level instead of rendering the interstitial page.
    #[serde(default)]
    pub instant: Option<bool>,

    /// Optional custom key, checked against the configured pattern.
    #[validate(length(min = 1, max = 256))]
    pub key: Option<String>,
}

/// JSON representation of a stored redirect.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RedirectView {
    pub key: String,
    pub location: String,
    pub instant: bool,
}

impl From<&Redirect> for RedirectView {
    fn from(redirect: &Redirect) -> Self {
        Self {
            key: redirect.key().to_string(),
            location: redirect.location(),
            instant: redirect.instant(),
        }
    }
}

/// Response to a successful creation.
#[derive(Debug, Serialize)]
pub struct CreateRedirectResponse {
    pub success: bool,
    pub redirect: RedirectView,
}

/// Response to a successful deletion.
#[derive(Debug, Serialize)]
pub struct DeleteRedirectResponse {
    pub success: bool,
}

/// A random key suggestion.
#[derive(Debug, Serialize)]
pub struct KeySuggestionResponse {
    pub pattern: String,
    pub key: String,
}
