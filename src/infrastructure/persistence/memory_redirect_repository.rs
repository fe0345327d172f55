//! In-memory implementation of the redirect repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::domain::entities::Redirect;
use crate::domain::repositories::{RedirectRepository, StorageError};

/// Process-local redirect store.
///
/// Volatile: everything is lost on shutdown. Used in debug mode and tests.
/// All access goes through one mutex, which makes check-and-insert atomic.
#[derive(Default)]
pub struct MemoryRedirectRepository {
    redirects: Mutex<HashMap<String, Redirect>>,
}

impl MemoryRedirectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored redirects.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Redirect>> {
        // the map is never left half-updated, so a poisoned guard is still usable
        self.redirects.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl RedirectRepository for MemoryRedirectRepository {
    async fn find(&self, key: &str) -> Result<Redirect, StorageError> {
        self.lock()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(key))
    }

    async fn insert(&self, redirect: &Redirect) -> Result<(), StorageError> {
        match self.lock().entry(redirect.key().to_string()) {
            Entry::Occupied(_) => Err(StorageError::duplicate(redirect.key())),
            Entry::Vacant(slot) => {
                slot.insert(redirect.clone());
                debug!(key = redirect.key(), "Stored redirect in memory");
                Ok(())
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.lock()
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found(key))
    }

    async fn close(&self) {
        debug!("Memory engine closed ({} redirects discarded)", self.len());
    }

    fn engine(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::key_codec::KeyCodec;

    fn redirect(key: &str, location: &str) -> Redirect {
        let codec = KeyCodec::new("^[a-z0-9]{6}$").unwrap();
        Redirect::new(location, Some(key), false, &codec).unwrap()
    }

    #[tokio::test]
    async fn test_memory_insert_find() {
        let repo = MemoryRedirectRepository::new();
        let r = redirect("abc123", "https://example.com/page");

        repo.insert(&r).await.unwrap();

        let found = repo.find("abc123").await.unwrap();
        assert_eq!(found, r);
        assert_eq!(found.location(), "https://example.com/page");
    }

    #[tokio::test]
    async fn test_memory_duplicate_keeps_original() {
        let repo = MemoryRedirectRepository::new();
        repo.insert(&redirect("abc123", "https://example.com/first"))
            .await
            .unwrap();

        let result = repo
            .insert(&redirect("abc123", "https://example.com/second"))
            .await;

        assert!(matches!(result, Err(StorageError::DuplicateKey { key }) if key == "abc123"));
        assert_eq!(
            repo.find("abc123").await.unwrap().location(),
            "https://example.com/first"
        );
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_memory_delete() {
        let repo = MemoryRedirectRepository::new();
        repo.insert(&redirect("abc123", "https://example.com"))
            .await
            .unwrap();

        repo.delete("abc123").await.unwrap();

        assert!(matches!(
            repo.find("abc123").await,
            Err(StorageError::NotFound { .. })
        ));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_memory_absent_key() {
        let repo = MemoryRedirectRepository::new();

        assert!(matches!(
            repo.find("nothere").await,
            Err(StorageError::NotFound { key }) if key == "nothere"
        ));
        assert!(matches!(
            repo.delete("nothere").await,
            Err(StorageError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_memory_reinsert_after_delete() {
        let repo = MemoryRedirectRepository::new();
        repo.insert(&redirect("abc123", "https://example.com/old"))
            .await
            .unwrap();
        repo.delete("abc123").await.unwrap();

        repo.insert(&redirect("abc123", "https://example.com/new"))
            .await
            .unwrap();

        assert_eq!(
            repo.find("abc123").await.unwrap().location(),
            "https://example.com/new"
        );
    }
}
