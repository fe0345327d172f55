//! HTTP server initialization and runtime setup.
//!
//! Builds the key codec, connects the configured storage engine, serves
//! until a shutdown signal arrives, then closes the engine.

use crate::application::services::RedirectService;
use crate::config::Config;
use crate::domain::key_codec::KeyCodec;
use crate::infrastructure::persistence::EngineRegistry;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use axum::http::StatusCode;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Key codec from `KEY_PATTERN`
/// - Storage engine through [`EngineRegistry`]
/// - Axum HTTP server with graceful shutdown
///
/// The storage engine is closed once the server has stopped, whether it
/// stopped cleanly or not.
///
/// # Errors
///
/// Returns an error if:
/// - The key pattern is unusable
/// - The storage engine is unknown or cannot be reached
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let codec = KeyCodec::new(&config.key_pattern).context("Invalid KEY_PATTERN")?;

    let repository = EngineRegistry::with_defaults()
        .select(&config.storage, config.debug)
        .await
        .context("Failed to initialize storage")?;

    let service = Arc::new(RedirectService::new(repository, Arc::new(codec)));

    let redirect_status =
        StatusCode::from_u16(config.redirect_status).context("Invalid REDIRECT_STATUS")?;
    let api_token = config
        .is_auth_enabled()
        .then(|| config.api_token.clone())
        .flatten();

    let state = AppState::new(service.clone(), redirect_status, api_token);
    let app = app_router(state, &config.api_path);

    let served = serve(app, &config.listen_addr).await;

    service.close().await;
    tracing::info!("Storage closed, shutdown complete");

    served
}

async fn serve(
    app: tower_http::normalize_path::NormalizePath<axum::Router>,
    listen_addr: &str,
) -> Result<()> {
    let addr: SocketAddr = listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received, stopping server...");
}
