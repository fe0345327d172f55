//! Engine selection by configured type name.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::{
    MemoryRedirectRepository, MongoRedirectRepository, PgRedirectRepository,
    RedisRedirectRepository, StorageOptions, with_timeout,
};
use crate::config::StorageConfig;
use crate::domain::repositories::{RedirectRepository, StorageError};

/// Builds a connected engine from configuration.
#[async_trait]
pub trait EngineFactory: Send + Sync {
    async fn connect(
        &self,
        uri: &str,
        options: &StorageOptions,
        timeout: Duration,
    ) -> Result<Arc<dyn RedirectRepository>, StorageError>;
}

struct MemoryEngine;
struct MongoEngine;
struct PostgresEngine;
struct RedisEngine;

#[async_trait]
impl EngineFactory for MemoryEngine {
    async fn connect(
        &self,
        _uri: &str,
        _options: &StorageOptions,
        _timeout: Duration,
    ) -> Result<Arc<dyn RedirectRepository>, StorageError> {
        Ok(Arc::new(MemoryRedirectRepository::new()))
    }
}

#[async_trait]
impl EngineFactory for MongoEngine {
    async fn connect(
        &self,
        uri: &str,
        options: &StorageOptions,
        timeout: Duration,
    ) -> Result<Arc<dyn RedirectRepository>, StorageError> {
        Ok(Arc::new(
            MongoRedirectRepository::connect(uri, options, timeout).await?,
        ))
    }
}

#[async_trait]
impl EngineFactory for PostgresEngine {
    async fn connect(
        &self,
        uri: &str,
        options: &StorageOptions,
        timeout: Duration,
    ) -> Result<Arc<dyn RedirectRepository>, StorageError> {
        Ok(Arc::new(
            PgRedirectRepository::connect(uri, options, timeout).await?,
        ))
    }
}

#[async_trait]
impl EngineFactory for RedisEngine {
    async fn connect(
        &self,
        uri: &str,
        options: &StorageOptions,
        timeout: Duration,
    ) -> Result<Arc<dyn RedirectRepository>, StorageError> {
        Ok(Arc::new(
            RedisRedirectRepository::connect(uri, options, timeout).await?,
        ))
    }
}

/// Name of the engine forced in debug mode.
pub const MEMORY_ENGINE: &str = "memory";

/// Maps lower-cased engine names to factories.
///
/// # Examples
///
/// ```ignore
/// let registry = EngineRegistry::with_defaults();
/// let repository = registry.select(&config.storage, config.debug).await?;
/// ```
#[derive(Clone, Default)]
pub struct EngineRegistry {
    factories: HashMap<String, Arc<dyn EngineFactory>>,
}

impl EngineRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in engines and their aliases.
    pub fn with_defaults() -> Self {
        let memory: Arc<dyn EngineFactory> = Arc::new(MemoryEngine);
        let mongo: Arc<dyn EngineFactory> = Arc::new(MongoEngine);
        let postgres: Arc<dyn EngineFactory> = Arc::new(PostgresEngine);

        let mut registry = Self::new();
        registry.register(MEMORY_ENGINE, memory.clone());
        registry.register("debug", memory);
        registry.register("mongodb", mongo.clone());
        registry.register("mongo", mongo);
        registry.register("postgres", postgres.clone());
        registry.register("postgresql", postgres);
        registry.register("redis", Arc::new(RedisEngine));
        registry
    }

    /// Adds or replaces the factory for `name` (case-insensitive).
    pub fn register(&mut self, name: &str, factory: Arc<dyn EngineFactory>) {
        self.factories.insert(name.to_lowercase(), factory);
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Connects the engine named by `config`.
    ///
    /// With `debug` set the in-memory engine is used regardless of the
    /// configured name, URI and options.
    ///
    /// # Errors
    ///
    /// - [`StorageError::UnknownEngine`] if the name is not registered; no
    ///   connection is attempted
    /// - [`StorageError::Connection`] if connecting fails or exceeds the
    ///   configured timeout
    pub async fn select(
        &self,
        config: &StorageConfig,
        debug: bool,
    ) -> Result<Arc<dyn RedirectRepository>, StorageError> {
        let name = if debug {
            MEMORY_ENGINE.to_string()
        } else {
            config.engine.to_lowercase()
        };

        let factory = self
            .factories
            .get(&name)
            .ok_or_else(|| StorageError::UnknownEngine {
                name: config.engine.clone(),
                known: self.names().join(", "),
            })?;

        let repository = with_timeout(
            config.timeout,
            "connect",
            factory.connect(&config.uri, &config.options, config.timeout),
        )
        .await?;

        let forced_memory = debug;
        info!(
            engine = repository.engine(),
            debug = forced_memory,
            "Storage engine ready"
        );

        Ok(repository)
    }
}
