mod common;

use axum::http::StatusCode;
use redirector::domain::repositories::RedirectRepository;
use serde_json::json;

#[tokio::test]
async fn test_create_with_generated_key() {
    let (server, repository) = common::create_test_server(None);

    let response = server
        .post("/api/v1/create")
        .json(&json!({ "location": "https://example.com/page" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["redirect"]["location"], "https://example.com/page");
    assert_eq!(json["redirect"]["instant"], false);

    let key = json["redirect"]["key"].as_str().unwrap();
    assert!(common::codec().validate(key));
    assert_eq!(
        repository.find(key).await.unwrap().location(),
        "https://example.com/page"
    );
}

#[tokio::test]
async fn test_create_with_body_key() {
    let (server, _repository) = common::create_test_server(None);

    let response = server
        .post("/api/v1/create")
        .json(&json!({
            "location": "https://example.com",
            "key": "abc123",
            "instant": true
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["redirect"]["key"], "abc123");
    assert_eq!(json["redirect"]["instant"], true);
}

#[tokio::test]
async fn test_create_path_key_wins_over_body_key() {
    let (server, repository) = common::create_test_server(None);

    let response = server
        .post("/api/v1/create/path01")
        .json(&json!({ "location": "https://example.com", "key": "body01" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["redirect"]["key"], "path01");
    assert!(repository.find("path01").await.is_ok());
    assert!(repository.find("body01").await.is_err());
}

#[tokio::test]
async fn test_create_duplicate_key_conflict() {
    let (server, repository) = common::create_test_server(None);
    common::insert_redirect(&repository, "abc123", "https://example.com/first", false).await;

    let response = server
        .post("/api/v1/create/abc123")
        .json(&json!({ "location": "https://example.com/second" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "conflict");
    assert_eq!(
        repository.find("abc123").await.unwrap().location(),
        "https://example.com/first"
    );
}

#[tokio::test]
async fn test_create_invalid_location() {
    let (server, repository) = common::create_test_server(None);

    let response = server
        .post("/api/v1/create/abc123")
        .json(&json!({ "location": "not-a-url" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["details"]["location"], "not-a-url");
    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_create_rejects_script_location() {
    let (server, repository) = common::create_test_server(None);

    for location in [
        "javascript:alert(document.cookie)",
        "data:text/html,<script>alert(1)</script>",
    ] {
        let response = server
            .post("/api/v1/create/xss001")
            .json(&json!({ "location": location }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["code"], "validation_error");
        assert_eq!(json["error"]["details"]["location"], location);
    }

    assert!(repository.is_empty());
    server
        .get("/xss001")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_invalid_key() {
    let (server, repository) = common::create_test_server(None);

    let response = server
        .post("/api/v1/create")
        .json(&json!({ "location": "https://example.com", "key": "AB!" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["details"]["key"], "AB!");
    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_create_empty_location_rejected() {
    let (server, _repository) = common::create_test_server(None);

    let response = server
        .post("/api/v1/create")
        .json(&json!({ "location": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_requires_token_when_configured() {
    let (server, repository) = common::create_test_server(Some(common::TEST_TOKEN));

    let response = server
        .post("/api/v1/create")
        .json(&json!({ "location": "https://example.com" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .post("/api/v1/create")
        .authorization_bearer("wrong-token")
        .json(&json!({ "location": "https://example.com" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(repository.is_empty());

    let response = server
        .post("/api/v1/create")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({ "location": "https://example.com" }))
        .await;
    response.assert_status_ok();
    assert_eq!(repository.len(), 1);
}
