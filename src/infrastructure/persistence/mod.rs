//! Storage engine implementations and engine selection.
//!
//! Concrete implementations of [`crate::domain::repositories::RedirectRepository`]:
//!
//! - [`MemoryRedirectRepository`] - process-local map (debug mode, tests)
//! - [`MongoRedirectRepository`] - MongoDB collection with a unique index on `key`
//! - [`PgRedirectRepository`] - PostgreSQL table keyed by `key`
//! - [`RedisRedirectRepository`] - Redis keys written with `SET NX`
//!
//! Engines are chosen at startup by name through [`EngineRegistry`].

pub mod memory_redirect_repository;
pub mod mongo_redirect_repository;
pub mod pg_redirect_repository;
pub mod redis_redirect_repository;
pub mod registry;

pub use memory_redirect_repository::MemoryRedirectRepository;
pub use mongo_redirect_repository::MongoRedirectRepository;
pub use pg_redirect_repository::PgRedirectRepository;
pub use redis_redirect_repository::RedisRedirectRepository;
pub use registry::{EngineFactory, EngineRegistry};

use crate::domain::repositories::StorageError;
use std::future::Future;
use std::time::Duration;

/// Collection used when none is configured.
pub const DEFAULT_COLLECTION: &str = "redirects";

/// Engine options from configuration.
///
/// Each engine interprets `database` in its own way and supplies its own
/// default; `collection` names the table, collection or key prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageOptions {
    pub database: Option<String>,
    pub collection: Option<String>,
}

impl StorageOptions {
    /// The configured database, or `default` when unset or blank.
    pub fn database_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.database
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(default)
    }

    /// The configured collection, or [`DEFAULT_COLLECTION`].
    pub fn collection(&self) -> &str {
        self.collection
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_COLLECTION)
    }
}

/// Runs a storage future with an upper time bound.
///
/// An elapsed bound is reported as [`StorageError::Connection`]; the call is
/// not retried.
pub(crate) async fn with_timeout<T, F>(
    limit: Duration,
    operation: &str,
    future: F,
) -> Result<T, StorageError>
where
    F: Future<Output = Result<T, StorageError>>,
{
    tokio::time::timeout(limit, future).await.unwrap_or_else(|_| {
        Err(StorageError::connection(format!(
            "{} timed out after {}ms",
            operation,
            limit.as_millis()
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let options = StorageOptions::default();

        assert_eq!(options.collection(), "redirects");
        assert_eq!(options.database_or("redirector"), "redirector");
    }

    #[test]
    fn test_options_configured() {
        let options = StorageOptions {
            database: Some("shortlinks".to_string()),
            collection: Some("links".to_string()),
        };

        assert_eq!(options.collection(), "links");
        assert_eq!(options.database_or("redirector"), "shortlinks");
    }

    #[test]
    fn test_options_blank_values_use_defaults() {
        let options = StorageOptions {
            database: Some("  ".to_string()),
            collection: Some(String::new()),
        };

        assert_eq!(options.collection(), "redirects");
        assert_eq!(options.database_or("admin"), "admin");
    }

    #[tokio::test]
    async fn test_with_timeout_passes_result_through() {
        let result = with_timeout(Duration::from_secs(1), "find", async { Ok::<_, StorageError>(7) })
            .await
            .unwrap();
        assert_eq!(result, 7);
    }

    #[tokio::test]
    async fn test_with_timeout_reports_connection_error() {
        let result: Result<(), StorageError> =
            with_timeout(Duration::from_millis(10), "insert", async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
            .await;

        match result {
            Err(StorageError::Connection(message)) => assert!(message.contains("insert timed out")),
            other => panic!("expected connection error, got {:?}", other),
        }
    }
}
