//! # Liveness Endpoint Tests

use crate::common::{test_config, TestServer};
use reqwest::StatusCode;
use serde_json::Value;
use service_status::InMemoryServiceRegistry;
use std::sync::Arc;

#[tokio::test]
async fn test_health_reports_up_with_identity() {
    let server = TestServer::start().await;

    let response = server.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-request-id").is_some());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "UP");
    assert_eq!(body["application"], "service-status-backend");
    assert_eq!(body["version"], "1.0.0");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());

    server.shutdown().await;
}

#[tokio::test]
async fn test_root_and_ping_are_liveness_aliases() {
    let server = TestServer::start().await;

    for path in ["/", "/ping"] {
        let body: Value = server.get(path).await.json().await.unwrap();
        assert_eq!(body["status"], "UP", "path {path}");
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_health_uses_configured_identity() {
    let mut config = test_config();
    config.server.application_name = "status-page".to_string();
    config.server.version = "2.3.4".to_string();
    let server = TestServer::start_with(config, Arc::new(InMemoryServiceRegistry::new())).await;

    let body: Value = server.get("/health").await.json().await.unwrap();
    assert_eq!(body["application"], "status-page");
    assert_eq!(body["version"], "2.3.4");

    server.shutdown().await;
}

#[tokio::test]
async fn test_checker_status_when_disabled() {
    let server = TestServer::start().await;

    let body: Value = server.get("/health/checker").await.json().await.unwrap();
    assert_eq!(body["enabled"], false);
    assert_eq!(body["cyclesRun"], 0);
    assert!(body["lastCycle"].is_null());

    server.shutdown().await;
}
