mod common;

#[tokio::test]
async fn test_health_reports_engine() {
    let (server, _repository) = common::create_test_server(Some(common::TEST_TOKEN));

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["storage"]["status"], "ok");
    assert_eq!(json["storage"]["engine"], "memory");
    assert!(json["version"].is_string());
}
