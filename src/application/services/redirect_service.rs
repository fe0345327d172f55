//! Redirect creation, resolution and removal service.

use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::entities::Redirect;
use crate::domain::key_codec::KeyCodec;
use crate::domain::repositories::{RedirectRepository, StorageError};
use crate::error::AppError;

/// Attempts made with fresh generated keys before giving up on collisions.
const MAX_ATTEMPTS: usize = 10;

const HEALTH_PROBE_KEY: &str = "__health_probe__";

/// Service for creating and resolving redirects.
///
/// Combines the configured [`KeyCodec`] with the selected storage engine.
pub struct RedirectService<R: RedirectRepository + ?Sized = dyn RedirectRepository> {
    repository: Arc<R>,
    codec: Arc<KeyCodec>,
}

impl<R: RedirectRepository + ?Sized> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(repository: Arc<R>, codec: Arc<KeyCodec>) -> Self {
        Self { repository, codec }
    }

    /// Creates and stores a redirect.
    ///
    /// # Key Generation
    ///
    /// - If `key` is provided it is validated and used as is; a collision is
    ///   reported as a conflict
    /// - Otherwise a key is generated from the pattern, and regenerated on
    ///   collision up to 10 times
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the key or location is invalid.
    /// Returns [`AppError::Conflict`] if the explicit key already exists.
    /// Returns [`AppError::Internal`] if no free generated key was found.
    /// Returns [`AppError::Unavailable`] if storage cannot be reached.
    pub async fn create(
        &self,
        location: &str,
        key: Option<&str>,
        instant: bool,
    ) -> Result<Redirect, AppError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let redirect = Redirect::new(location, key, instant, &self.codec)?;

            match self.repository.insert(&redirect).await {
                Ok(()) => {
                    info!(key = redirect.key(), instant, "Redirect created");
                    return Ok(redirect);
                }
                Err(StorageError::DuplicateKey { key: taken }) if key.is_none() => {
                    debug!(key = %taken, attempt, "Generated key collided, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique key",
            json!({ "reason": "Too many collisions", "attempts": MAX_ATTEMPTS }),
        ))
    }

    /// Looks up the redirect stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no redirect matches.
    pub async fn resolve(&self, key: &str) -> Result<Redirect, AppError> {
        Ok(self.repository.find(key).await?)
    }

    /// Removes the redirect stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no redirect matches.
    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.repository.delete(key).await?;
        info!(key, "Redirect deleted");
        Ok(())
    }

    /// A fresh key from the pattern. Not reserved: a later create may still collide.
    pub fn suggest_key(&self) -> String {
        self.codec.generate()
    }

    pub fn key_pattern(&self) -> &str {
        self.codec.pattern()
    }

    /// Name of the storage engine in use.
    pub fn engine(&self) -> &'static str {
        self.repository.engine()
    }

    /// Round-trips a lookup to storage.
    ///
    /// A missing probe record counts as healthy; only transport and decoding
    /// failures are reported.
    pub async fn health_check(&self) -> Result<(), StorageError> {
        match self.repository.find(HEALTH_PROBE_KEY).await {
            Ok(_) | Err(StorageError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Releases the storage engine.
    pub async fn close(&self) {
        self.repository.close().await;
    }
}
