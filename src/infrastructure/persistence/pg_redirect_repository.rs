//! PostgreSQL implementation of the redirect repository.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use tracing::{debug, info};

use super::{StorageOptions, with_timeout};
use crate::domain::entities::{Redirect, RedirectRecord};
use crate::domain::repositories::{RedirectRepository, StorageError};
use crate::utils::db_error::is_unique_violation;

const MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL repository storing one row per redirect.
///
/// The table is named after the configured collection and created on
/// connect. `key` is the primary key, so duplicate inserts are rejected by
/// the database.
pub struct PgRedirectRepository {
    pool: PgPool,
    table: String,
    timeout: Duration,
}

impl PgRedirectRepository {
    /// Opens a pool on `uri` and creates the redirect table if missing.
    ///
    /// The database is taken from the URI; the `database` option is unused.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Connection`] if the collection is not a plain
    /// identifier, or the server is unreachable within `timeout`.
    pub async fn connect(
        uri: &str,
        options: &StorageOptions,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let table = options.collection();
        if !is_identifier(table) {
            return Err(StorageError::connection(format!(
                "'{}' is not a valid table name",
                table
            )));
        }

        let pool = with_timeout(timeout, "connect", async {
            PgPoolOptions::new()
                .max_connections(MAX_CONNECTIONS)
                .acquire_timeout(timeout)
                .connect(uri)
                .await
                .map_err(StorageError::connection)
        })
        .await?;

        let ddl = format!(
            r#"CREATE TABLE IF NOT EXISTS {table} (
                "key" TEXT PRIMARY KEY,
                location TEXT NOT NULL,
                instant BOOLEAN NOT NULL DEFAULT FALSE
            )"#
        );
        with_timeout(timeout, "create table", async {
            sqlx::query(&ddl)
                .execute(&pool)
                .await
                .map_err(StorageError::connection)
        })
        .await?;

        info!(table, "Connected to PostgreSQL");

        Ok(Self {
            pool,
            table: table.to_string(),
            timeout,
        })
    }
}

/// ASCII letters, digits and underscores, not starting with a digit.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[async_trait]
impl RedirectRepository for PgRedirectRepository {
    async fn find(&self, key: &str) -> Result<Redirect, StorageError> {
        let sql = format!(
            r#"SELECT "key", location, instant FROM {} WHERE "key" = $1"#,
            self.table
        );

        let row = with_timeout(self.timeout, "find", async {
            sqlx::query(&sql)
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(StorageError::connection)
        })
        .await?
        .ok_or_else(|| StorageError::not_found(key))?;

        let record = RedirectRecord {
            key: row.try_get("key").map_err(StorageError::connection)?,
            location: row.try_get("location").map_err(StorageError::connection)?,
            instant: row.try_get("instant").map_err(StorageError::connection)?,
        };

        Ok(Redirect::from_record(record)?)
    }

    async fn insert(&self, redirect: &Redirect) -> Result<(), StorageError> {
        let sql = format!(
            r#"INSERT INTO {} ("key", location, instant) VALUES ($1, $2, $3)"#,
            self.table
        );

        with_timeout(self.timeout, "insert", async {
            match sqlx::query(&sql)
                .bind(redirect.key())
                .bind(redirect.encoded_location())
                .bind(redirect.instant())
                .execute(&self.pool)
                .await
            {
                Ok(_) => Ok(()),
                Err(e) if is_unique_violation(&e) => Err(StorageError::duplicate(redirect.key())),
                Err(e) => Err(StorageError::connection(e)),
            }
        })
        .await?;

        debug!(key = redirect.key(), "Inserted redirect row");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let sql = format!(r#"DELETE FROM {} WHERE "key" = $1"#, self.table);

        let result = with_timeout(self.timeout, "delete", async {
            sqlx::query(&sql)
                .bind(key)
                .execute(&self.pool)
                .await
                .map_err(StorageError::connection)
        })
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found(key));
        }

        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL pool closed");
    }

    fn engine(&self) -> &'static str {
        "postgres"
    }
}
