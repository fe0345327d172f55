//! Storage contract every redirect engine implements.

use crate::domain::entities::{Redirect, ValidationError};
use async_trait::async_trait;

/// Errors surfaced by storage engines and the engine registry.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("No entry found for key '{key}'")]
    NotFound { key: String },

    #[error("Redirect '{key}' already exists")]
    DuplicateKey { key: String },

    #[error("Storage connection error: {0}")]
    Connection(String),

    #[error("Unknown storage engine '{name}' (known: {known})")]
    UnknownEngine { name: String, known: String },

    #[error("Stored record is invalid: {0}")]
    InvalidRecord(#[from] ValidationError),
}

impl StorageError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn duplicate(key: impl Into<String>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    pub fn connection(message: impl std::fmt::Display) -> Self {
        Self::Connection(message.to_string())
    }
}

/// Repository interface for redirects.
///
/// One connected instance is shared by every in-flight request, so
/// implementations must tolerate concurrent calls.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryRedirectRepository`] - process-local map
/// - [`crate::infrastructure::persistence::MongoRedirectRepository`] - MongoDB collection
/// - [`crate::infrastructure::persistence::PgRedirectRepository`] - PostgreSQL table
/// - [`crate::infrastructure::persistence::RedisRedirectRepository`] - Redis keyspace
/// - Test mocks available with `cfg(test)`
///
/// Engines are constructed and connected through
/// [`crate::infrastructure::persistence::EngineRegistry`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectRepository: Send + Sync {
    /// Looks up a redirect by key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no record matches.
    /// Returns [`StorageError::InvalidRecord`] if the stored record cannot be decoded.
    /// Returns [`StorageError::Connection`] on I/O failures and timeouts.
    async fn find(&self, key: &str) -> Result<Redirect, StorageError>;

    /// Persists a new redirect.
    ///
    /// Of several concurrent inserts carrying the same key exactly one succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DuplicateKey`] if the key already exists; the
    /// stored record is left unchanged.
    /// Returns [`StorageError::Connection`] on I/O failures and timeouts.
    async fn insert(&self, redirect: &Redirect) -> Result<(), StorageError>;

    /// Removes the redirect stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if nothing was removed.
    /// Returns [`StorageError::Connection`] on I/O failures and timeouts.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Releases engine resources.
    ///
    /// Called once during shutdown. Never fails: problems are logged.
    async fn close(&self);

    /// Canonical name of the engine, e.g. `"mongodb"`.
    fn engine(&self) -> &'static str;
}
