use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::services::RedirectService;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService>,
    /// Status of instant redirects.
    pub redirect_status: StatusCode,
    /// Bearer token required by API routes; `None` disables authentication.
    pub api_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(
        redirect_service: Arc<RedirectService>,
        redirect_status: StatusCode,
        api_token: Option<String>,
    ) -> Self {
        Self {
            redirect_service,
            redirect_status,
            api_token: api_token.map(Arc::from),
        }
    }
}
