//! # Service Query API Tests

use crate::common::TestServer;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde_json::{json, Value};
use service_status::{NewMonitoredService, ServiceRegistry, ServiceStatus};

#[tokio::test]
async fn test_empty_registry_lists_one_operational_group() {
    let server = TestServer::start().await;

    let response = server.get("/api/services").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!([{ "title": "All Services", "checks": [], "status": "Operational" }])
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_listing_reports_every_service_with_camel_case_fields() {
    let server = TestServer::start().await;
    let github = server
        .registry
        .register(NewMonitoredService::new("GitHub", "https://github.com"))
        .await
        .unwrap();
    server
        .registry
        .register(NewMonitoredService::new("Google", "https://google.com"))
        .await
        .unwrap();

    let body: Value = server.get("/api/services").await.json().await.unwrap();

    let group = &body[0];
    assert_eq!(group["title"], "All Services");
    let checks = group["checks"].as_array().unwrap();
    assert_eq!(checks.len(), 2);
    assert_eq!(checks[0]["id"], github.id);
    assert_eq!(checks[0]["name"], "GitHub");
    assert_eq!(checks[0]["url"], "https://github.com");
    assert_eq!(checks[0]["checkType"], "HTTP");
    assert_eq!(checks[0]["currentStatus"], "Unknown");
    assert!(checks[0]["lastCheckedAt"].is_null());
    // Never-checked services read as Operational in the rollup.
    assert_eq!(group["status"], "Operational");

    server.shutdown().await;
}

#[tokio::test]
async fn test_group_status_is_worst_case() {
    let server = TestServer::start().await;
    for (name, status) in [
        ("A", ServiceStatus::Operational),
        ("B", ServiceStatus::Degraded),
        ("C", ServiceStatus::Down),
    ] {
        let mut service = server
            .registry
            .register(NewMonitoredService::new(name, format!("https://{name}.test")))
            .await
            .unwrap();
        service.record_check(status, Utc::now());
        server.registry.update(&service).await.unwrap();
    }

    let body: Value = server.get("/api/services").await.json().await.unwrap();
    assert_eq!(body[0]["status"], "Down");

    server.shutdown().await;
}

#[tokio::test]
async fn test_get_service_by_id() {
    let server = TestServer::start().await;
    let mut github = server
        .registry
        .register(NewMonitoredService::new("GitHub", "https://github.com"))
        .await
        .unwrap();
    let checked_at = Utc::now();
    github.record_check(ServiceStatus::Operational, checked_at);
    server.registry.update(&github).await.unwrap();

    let response = server.get(&format!("/api/services/{}", github.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], github.id);
    assert_eq!(body["currentStatus"], "Operational");
    let last_checked: DateTime<Utc> = body["lastCheckedAt"].as_str().unwrap().parse().unwrap();
    assert_eq!(last_checked, checked_at);

    server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_id_is_404_with_not_found_message() {
    let server = TestServer::start().await;

    let response = server.get("/api/services/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Not Found");
    assert!(body["message"].as_str().unwrap().contains("not found"));
    assert!(body["timestamp"].is_string());

    server.shutdown().await;
}

#[tokio::test]
async fn test_non_numeric_id_is_400() {
    let server = TestServer::start().await;

    let response = server.get("/api/services/github").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], 400);

    server.shutdown().await;
}

#[tokio::test]
async fn test_cors_preflight_for_dashboard_origin() {
    let server = TestServer::start().await;

    let response = server
        .client()
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/api/services", server.base_url()),
        )
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "GET")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
    assert!(response.headers().get("access-control-allow-methods").is_some());

    server.shutdown().await;
}

#[tokio::test]
async fn test_cors_rejects_unlisted_origin() {
    let server = TestServer::start().await;

    let response = server
        .client()
        .get(format!("{}/api/services", server.base_url()))
        .header("Origin", "http://evil.test")
        .send()
        .await
        .unwrap();

    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());

    server.shutdown().await;
}
