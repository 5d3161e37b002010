//! Shared helpers for integration tests.
#![allow(dead_code)]

pub mod strategies;

use reqwest::{Client, Response};
use service_status::bootstrap::{self, ServiceStatusHandle};
use service_status::{InMemoryServiceRegistry, ServiceRegistry, StatusConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Configuration for a loopback test server: ephemeral port, no seeds,
/// checker off unless a test turns it on
pub fn test_config() -> StatusConfig {
    let mut config = StatusConfig::default();
    config.server.bind_address = "127.0.0.1:0".to_string();
    config.checker.enabled = false;
    config.seed_services.clear();
    config
}

/// Running service-status server backed by an in-memory registry
pub struct TestServer {
    handle: ServiceStatusHandle,
    pub registry: Arc<InMemoryServiceRegistry>,
    client: Client,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(test_config(), Arc::new(InMemoryServiceRegistry::new())).await
    }

    pub async fn start_with(config: StatusConfig, registry: Arc<InMemoryServiceRegistry>) -> Self {
        let shared: Arc<dyn ServiceRegistry> = registry.clone();
        let handle = bootstrap::start(config, shared)
            .await
            .expect("Failed to start test server");
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .no_proxy()
            .build()
            .expect("Failed to build test client");

        Self {
            handle,
            registry,
            client,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.handle.local_addr)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn handle(&self) -> &ServiceStatusHandle {
        &self.handle
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{path}", self.base_url()))
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn shutdown(self) {
        self.handle
            .stop()
            .await
            .expect("Failed to shutdown test server");
    }
}

/// Loopback endpoint that answers every GET
pub async fn reachable_endpoint() -> String {
    let app = axum::Router::new().route("/", axum::routing::get(|| async { "ok" }));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

/// Loopback address with nothing listening
pub async fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}
