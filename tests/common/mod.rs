#![allow(dead_code)]

use axum::http::StatusCode;
use axum_test::TestServer;
use redirector::application::services::RedirectService;
use redirector::domain::entities::Redirect;
use redirector::domain::key_codec::KeyCodec;
use redirector::domain::repositories::{RedirectRepository, StorageError};
use redirector::infrastructure::persistence::MemoryRedirectRepository;
use redirector::routes::router;
use redirector::state::AppState;
use std::sync::Arc;

pub const TEST_PATTERN: &str = "^[a-z0-9]{6}$";
pub const TEST_TOKEN: &str = "test-api-token";

pub fn codec() -> Arc<KeyCodec> {
    Arc::new(KeyCodec::new(TEST_PATTERN).unwrap())
}

/// State backed by a fresh in-memory engine.
pub fn create_test_state(api_token: Option<&str>) -> (AppState, Arc<MemoryRedirectRepository>) {
    let repository = Arc::new(MemoryRedirectRepository::new());
    let service = Arc::new(RedirectService::new(
        repository.clone() as Arc<dyn RedirectRepository>,
        codec(),
    ));

    let state = AppState::new(
        service,
        StatusCode::TEMPORARY_REDIRECT,
        api_token.map(str::to_string),
    );

    (state, repository)
}

pub fn create_test_server(api_token: Option<&str>) -> (TestServer, Arc<MemoryRedirectRepository>) {
    let (state, repository) = create_test_state(api_token);
    let server = TestServer::new(router(state, "/api")).unwrap();
    (server, repository)
}

pub async fn insert_redirect(
    repository: &MemoryRedirectRepository,
    key: &str,
    location: &str,
    instant: bool,
) {
    let redirect = Redirect::new(location, Some(key), instant, &codec()).unwrap();
    repository.insert(&redirect).await.unwrap();
}

/// Keys long enough that parallel runs against a shared server never collide.
pub fn unique_codec() -> KeyCodec {
    KeyCodec::new("^t[a-z0-9]{15}$").unwrap()
}

/// Exercises insert, find, duplicate, delete and absent-key behaviour.
pub async fn assert_storage_contract(repository: &dyn RedirectRepository) {
    let codec = unique_codec();
    let redirect = Redirect::new("https://example.com/a b?q=ü", None, true, &codec).unwrap();
    let key = redirect.key().to_string();

    repository.insert(&redirect).await.unwrap();

    let found = repository.find(&key).await.unwrap();
    assert_eq!(found, redirect);
    assert_eq!(found.location(), "https://example.com/a b?q=ü");
    assert!(found.instant());

    let other = Redirect::new("https://example.com/other", Some(&key), false, &codec).unwrap();
    assert!(matches!(
        repository.insert(&other).await,
        Err(StorageError::DuplicateKey { .. })
    ));
    assert_eq!(
        repository.find(&key).await.unwrap().location(),
        "https://example.com/a b?q=ü"
    );

    repository.delete(&key).await.unwrap();
    assert!(matches!(
        repository.find(&key).await,
        Err(StorageError::NotFound { .. })
    ));
    assert!(matches!(
        repository.delete(&key).await,
        Err(StorageError::NotFound { .. })
    ));
}

/// Races `n` inserts of one key; exactly one must win.
pub async fn assert_single_winner(repository: Arc<dyn RedirectRepository>, n: usize) {
    let codec = unique_codec();
    let key = codec.generate();

    let mut handles = Vec::with_capacity(n);
    for i in 0..n {
        let repository = repository.clone();
        let redirect = Redirect::new(
            &format!("https://example.com/{}", i),
            Some(&key),
            false,
            &codec,
        )
        .unwrap();

        handles.push(tokio::spawn(async move { repository.insert(&redirect).await }));
    }

    let mut won = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => won += 1,
            Err(StorageError::DuplicateKey { .. }) => duplicates += 1,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(won, 1);
    assert_eq!(duplicates, n - 1);

    repository.delete(&key).await.unwrap();
}
