//! Redis implementation of the redirect repository.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::time::Duration;
use tracing::{debug, info};

use super::{StorageOptions, with_timeout};
use crate::domain::entities::{Redirect, RedirectRecord, ValidationError};
use crate::domain::repositories::{RedirectRepository, StorageError};

/// Redis repository storing each redirect as a JSON string.
///
/// Keys are `<collection>:<redirect key>`. Inserts use `SET NX`, so the
/// server decides which of several concurrent writers wins.
pub struct RedisRedirectRepository {
    conn: ConnectionManager,
    prefix: String,
    timeout: Duration,
}

impl RedisRedirectRepository {
    /// Connects to `uri` and verifies the server answers `PING`.
    ///
    /// The database index is taken from the URI (`redis://host/2`); the
    /// `database` option is unused.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Connection`] if the URI is malformed or the
    /// server does not answer within `timeout`.
    pub async fn connect(
        uri: &str,
        options: &StorageOptions,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let client = redis::Client::open(uri).map_err(StorageError::connection)?;

        let conn = with_timeout(timeout, "connect", async {
            let mut conn = ConnectionManager::new(client)
                .await
                .map_err(StorageError::connection)?;
            redis::cmd("PING")
                .query_async::<String>(&mut conn)
                .await
                .map_err(StorageError::connection)?;
            Ok::<_, StorageError>(conn)
        })
        .await?;

        info!(prefix = options.collection(), "Connected to Redis");

        Ok(Self {
            conn,
            prefix: options.collection().to_string(),
            timeout,
        })
    }

    fn storage_key(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }
}

#[async_trait]
impl RedirectRepository for RedisRedirectRepository {
    async fn find(&self, key: &str) -> Result<Redirect, StorageError> {
        let mut conn = self.conn.clone();
        let storage_key = self.storage_key(key);

        let payload: Option<String> = with_timeout(self.timeout, "find", async {
            conn.get(&storage_key).await.map_err(StorageError::connection)
        })
        .await?;

        let payload = payload.ok_or_else(|| StorageError::not_found(key))?;
        let record: RedirectRecord = serde_json::from_str(&payload)
            .map_err(|e| ValidationError::MalformedRecord(e.to_string()))?;

        Ok(Redirect::from_record(record)?)
    }

    async fn insert(&self, redirect: &Redirect) -> Result<(), StorageError> {
        let mut conn = self.conn.clone();
        let storage_key = self.storage_key(redirect.key());
        let payload = serde_json::to_string(&redirect.to_record())
            .map_err(|e| ValidationError::MalformedRecord(e.to_string()))?;

        // SET NX replies OK when written and nil when the key already exists
        let reply: Option<String> = with_timeout(self.timeout, "insert", async {
            redis::cmd("SET")
                .arg(&storage_key)
                .arg(&payload)
                .arg("NX")
                .query_async(&mut conn)
                .await
                .map_err(StorageError::connection)
        })
        .await?;

        if reply.is_none() {
            return Err(StorageError::duplicate(redirect.key()));
        }

        debug!(key = redirect.key(), "Stored redirect in Redis");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.conn.clone();
        let storage_key = self.storage_key(key);

        let removed: u64 = with_timeout(self.timeout, "delete", async {
            conn.del(&storage_key).await.map_err(StorageError::connection)
        })
        .await?;

        if removed == 0 {
            return Err(StorageError::not_found(key));
        }

        Ok(())
    }

    async fn close(&self) {
        // the connection manager closes its socket when the last clone drops
        debug!("Redis engine closed");
    }

    fn engine(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_malformed_uri() {
        let result = RedisRedirectRepository::connect(
            "not a redis uri",
            &StorageOptions::default(),
            Duration::from_secs(1),
        )
        .await;

        assert!(matches!(result, Err(StorageError::Connection(_))));
    }
}
