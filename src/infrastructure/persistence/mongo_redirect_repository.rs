//! MongoDB implementation of the redirect repository.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::error::ErrorKind;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{StorageOptions, with_timeout};
use crate::domain::entities::{Redirect, RedirectRecord, ValidationError};
use crate::domain::repositories::{RedirectRepository, StorageError};
use crate::utils::db_error::is_duplicate_key;

/// Database used when none is configured.
pub const DEFAULT_DATABASE: &str = "redirector";

/// MongoDB repository storing one document per redirect.
///
/// A unique index on `key` is created on connect; the server enforces key
/// uniqueness, so concurrent inserts of the same key resolve to one winner.
pub struct MongoRedirectRepository {
    client: Client,
    collection: Collection<RedirectRecord>,
    timeout: Duration,
}

impl MongoRedirectRepository {
    /// Connects to `uri`, ensures the unique key index and pings the server.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Connection`] if the URI is malformed, the
    /// server is unreachable or does not answer within `timeout`.
    pub async fn connect(
        uri: &str,
        options: &StorageOptions,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let mut client_options = ClientOptions::parse(uri)
            .await
            .map_err(StorageError::connection)?;
        client_options.connect_timeout = Some(timeout);
        client_options.server_selection_timeout = Some(timeout);
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(client_options).map_err(StorageError::connection)?;

        let database = client.database(options.database_or(DEFAULT_DATABASE));
        let collection = database.collection::<RedirectRecord>(options.collection());

        with_timeout(timeout, "connect", async {
            database
                .run_command(doc! { "ping": 1 })
                .await
                .map_err(StorageError::connection)?;

            let index = IndexModel::builder()
                .keys(doc! { "key": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build();
            collection
                .create_index(index)
                .await
                .map_err(StorageError::connection)?;

            Ok::<(), StorageError>(())
        })
        .await?;

        info!(
            database = database.name(),
            collection = collection.name(),
            "Connected to MongoDB"
        );

        Ok(Self {
            client,
            collection,
            timeout,
        })
    }
}

fn map_mongo_error(e: mongodb::error::Error) -> StorageError {
    match e.kind.as_ref() {
        ErrorKind::BsonDeserialization(inner) => {
            ValidationError::MalformedRecord(inner.to_string()).into()
        }
        _ => StorageError::connection(e),
    }
}

#[async_trait]
impl RedirectRepository for MongoRedirectRepository {
    async fn find(&self, key: &str) -> Result<Redirect, StorageError> {
        let record = with_timeout(self.timeout, "find", async {
            self.collection
                .find_one(doc! { "key": key })
                .await
                .map_err(map_mongo_error)
        })
        .await?
        .ok_or_else(|| StorageError::not_found(key))?;

        Ok(Redirect::from_record(record)?)
    }

    async fn insert(&self, redirect: &Redirect) -> Result<(), StorageError> {
        let record = redirect.to_record();

        with_timeout(self.timeout, "insert", async {
            match self.collection.insert_one(&record).await {
                Ok(_) => Ok(()),
                Err(e) if is_duplicate_key(&e) => Err(StorageError::duplicate(redirect.key())),
                Err(e) => Err(map_mongo_error(e)),
            }
        })
        .await?;

        debug!(key = redirect.key(), "Inserted redirect document");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let result = with_timeout(self.timeout, "delete", async {
            self.collection
                .delete_one(doc! { "key": key })
                .await
                .map_err(map_mongo_error)
        })
        .await?;

        if result.deleted_count == 0 {
            return Err(StorageError::not_found(key));
        }

        Ok(())
    }

    async fn close(&self) {
        match tokio::time::timeout(self.timeout, self.client.clone().shutdown()).await {
            Ok(()) => info!("MongoDB client shut down"),
            Err(_) => warn!(
                "MongoDB client did not shut down within {}ms",
                self.timeout.as_millis()
            ),
        }
    }

    fn engine(&self) -> &'static str {
        "mongodb"
    }
}
