//! # Probe Executor
//!
//! One bounded-time reachability check against a single endpoint.
//!
//! A probe never fails: every transport problem is folded into a `Down`
//! outcome that carries the classified [`ProbeFailure`]. Any response at all,
//! whatever its status code, counts as `Operational`.

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

use crate::error::{StatusError, StatusResult};
use crate::models::ServiceStatus;

/// Maximum wait for a single probe
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Why a probe classified its endpoint as `Down`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    #[error("no response within {}ms", .after.as_millis())]
    Timeout { after: Duration },
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Classified result of one probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Always `Operational` or `Down`
    pub status: ServiceStatus,
    pub elapsed: Duration,
    pub failure: Option<ProbeFailure>,
}

impl ProbeOutcome {
    pub fn operational(elapsed: Duration) -> Self {
        Self {
            status: ServiceStatus::Operational,
            elapsed,
            failure: None,
        }
    }

    pub fn down(failure: ProbeFailure, elapsed: Duration) -> Self {
        Self {
            status: ServiceStatus::Down,
            elapsed,
            failure: Some(failure),
        }
    }

    pub fn is_operational(&self) -> bool {
        self.status == ServiceStatus::Operational
    }
}

/// Reachability check seam used by the checker
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, endpoint: &str) -> ProbeOutcome;
}

/// HTTP GET probe with a hard deadline
#[derive(Clone)]
pub struct HttpProbe {
    client: Client,
    timeout: Duration,
}

impl std::fmt::Debug for HttpProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProbe")
            .field("timeout_ms", &self.timeout.as_millis())
            .finish_non_exhaustive()
    }
}

impl HttpProbe {
    /// Build a probe whose requests are abandoned after `timeout`
    pub fn new(timeout: Duration) -> StatusResult<Self> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(concat!("service-status/", env!("CARGO_PKG_VERSION")))
            .no_proxy()
            .build()
            .map_err(|e| StatusError::Internal(format!("Failed to build probe client: {e}")))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, err: &reqwest::Error) -> ProbeFailure {
        if err.is_timeout() {
            ProbeFailure::Timeout {
                after: self.timeout,
            }
        } else if err.is_connect() {
            ProbeFailure::Connect(err.to_string())
        } else if err.is_builder() {
            ProbeFailure::InvalidEndpoint(err.to_string())
        } else {
            ProbeFailure::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, endpoint: &str) -> ProbeOutcome {
        let start = Instant::now();

        let url = match Url::parse(endpoint.trim()) {
            Ok(url) => url,
            Err(e) => {
                return ProbeOutcome::down(
                    ProbeFailure::InvalidEndpoint(format!("{endpoint}: {e}")),
                    start.elapsed(),
                )
            }
        };

        // The client timeout covers the transport; the outer deadline bounds
        // the whole future even if the transport never yields.
        let outcome = match tokio::time::timeout(self.timeout, self.client.get(url).send()).await {
            Ok(Ok(_response)) => ProbeOutcome::operational(start.elapsed()),
            Ok(Err(e)) => ProbeOutcome::down(self.classify(&e), start.elapsed()),
            Err(_) => ProbeOutcome::down(
                ProbeFailure::Timeout {
                    after: self.timeout,
                },
                start.elapsed(),
            ),
        };

        debug!(
            endpoint = %endpoint,
            status = %outcome.status,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            failure = ?outcome.failure,
            "Probe finished"
        );

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    async fn serve(router: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    async fn closed_port() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        addr
    }

    #[tokio::test]
    async fn test_any_response_is_operational() {
        let addr = serve(Router::new().route("/", get(|| async { "ok" }))).await;
        let probe = HttpProbe::new(Duration::from_secs(2)).unwrap();

        let outcome = probe.probe(&format!("http://{addr}/")).await;

        assert!(outcome.is_operational());
        assert!(outcome.failure.is_none());
    }

    #[tokio::test]
    async fn test_error_status_code_is_still_operational() {
        let addr = serve(Router::new().route(
            "/broken",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        ))
        .await;
        let probe = HttpProbe::new(Duration::from_secs(2)).unwrap();

        let outcome = probe.probe(&format!("http://{addr}/broken")).await;

        assert_eq!(outcome.status, ServiceStatus::Operational);
    }

    #[tokio::test]
    async fn test_refused_connection_is_down() {
        let addr = closed_port().await;
        let probe = HttpProbe::new(Duration::from_secs(2)).unwrap();

        let outcome = probe.probe(&format!("http://{addr}/")).await;

        assert_eq!(outcome.status, ServiceStatus::Down);
        assert!(outcome.failure.is_some());
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out_as_down() {
        let addr = serve(Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        ))
        .await;
        let probe = HttpProbe::new(Duration::from_millis(200)).unwrap();

        let outcome = probe.probe(&format!("http://{addr}/slow")).await;

        assert_eq!(outcome.status, ServiceStatus::Down);
        assert!(matches!(outcome.failure, Some(ProbeFailure::Timeout { .. })));
        assert!(outcome.elapsed < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_unparseable_endpoint_is_down() {
        let probe = HttpProbe::new(DEFAULT_PROBE_TIMEOUT).unwrap();

        let outcome = probe.probe("definitely not a url").await;

        assert_eq!(outcome.status, ServiceStatus::Down);
        assert!(matches!(
            outcome.failure,
            Some(ProbeFailure::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_timeout_failure_message() {
        let failure = ProbeFailure::Timeout {
            after: Duration::from_secs(5),
        };
        assert_eq!(failure.to_string(), "no response within 5000ms");
    }
}
