//! # Health Checker
//!
//! Background task that probes every registered service and persists the
//! classified status.
//!
//! Cycles run with a fixed delay: the next cycle starts `interval` after the
//! previous one finished, so cycles never overlap. A failed registry listing
//! abandons only the current cycle. A failed update affects only its own
//! service. A panic while checking one service is caught at that service; a
//! panic anywhere else in a cycle abandons that cycle and the loop goes on.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::probe::Probe;
use super::snapshot::CheckerSnapshotCache;
use crate::config::CheckerConfig;
use crate::models::{MonitoredService, ServiceStatus};
use crate::registry::ServiceRegistry;

/// Result of checking one service within a cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCheckOutcome {
    Updated {
        service_id: i64,
        name: String,
        status: ServiceStatus,
    },
    /// Probe finished but the registry rejected the write
    PersistFailed {
        service_id: i64,
        name: String,
        status: ServiceStatus,
        error: String,
    },
    /// Probe or update panicked; no status was classified
    Failed {
        service_id: i64,
        name: String,
        error: String,
    },
}

impl ServiceCheckOutcome {
    pub fn service_id(&self) -> i64 {
        match self {
            Self::Updated { service_id, .. }
            | Self::PersistFailed { service_id, .. }
            | Self::Failed { service_id, .. } => *service_id,
        }
    }

    /// Classified status, `None` when the check itself failed
    pub fn status(&self) -> Option<ServiceStatus> {
        match self {
            Self::Updated { status, .. } | Self::PersistFailed { status, .. } => Some(*status),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The registry could not be listed; nothing was probed or written
    Abandoned { error: String },
    /// One entry per listed service, in listing order
    Completed { results: Vec<ServiceCheckOutcome> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcome: CycleOutcome,
}

impl CycleReport {
    pub fn is_abandoned(&self) -> bool {
        matches!(self.outcome, CycleOutcome::Abandoned { .. })
    }

    pub fn results(&self) -> &[ServiceCheckOutcome] {
        match &self.outcome {
            CycleOutcome::Completed { results } => results,
            CycleOutcome::Abandoned { .. } => &[],
        }
    }

    pub fn services_checked(&self) -> usize {
        self.results().len()
    }

    pub fn count_with_status(&self, status: ServiceStatus) -> usize {
        self.results()
            .iter()
            .filter(|r| r.status() == Some(status))
            .count()
    }

    pub fn persist_failures(&self) -> usize {
        self.results()
            .iter()
            .filter(|r| matches!(r, ServiceCheckOutcome::PersistFailed { .. }))
            .count()
    }

    pub fn check_failures(&self) -> usize {
        self.results()
            .iter()
            .filter(|r| matches!(r, ServiceCheckOutcome::Failed { .. }))
            .count()
    }
}

pub struct HealthChecker {
    registry: Arc<dyn ServiceRegistry>,
    probe: Arc<dyn Probe>,
    interval: Duration,
    max_concurrent_probes: usize,
    snapshot: CheckerSnapshotCache,
}

impl std::fmt::Debug for HealthChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthChecker")
            .field("interval_secs", &self.interval.as_secs())
            .field("max_concurrent_probes", &self.max_concurrent_probes)
            .finish_non_exhaustive()
    }
}

impl HealthChecker {
    pub fn new(
        registry: Arc<dyn ServiceRegistry>,
        probe: Arc<dyn Probe>,
        config: &CheckerConfig,
        snapshot: CheckerSnapshotCache,
    ) -> Self {
        Self {
            registry,
            probe,
            interval: config.interval(),
            max_concurrent_probes: config.max_concurrent_probes.max(1),
            snapshot,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn snapshot(&self) -> &CheckerSnapshotCache {
        &self.snapshot
    }

    /// Spawn the check loop
    ///
    /// The first cycle starts immediately. Abort the returned handle to stop;
    /// an in-flight probe is simply dropped.
    pub fn spawn(self) -> JoinHandle<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            max_concurrent_probes = self.max_concurrent_probes,
            "Starting health checker"
        );

        tokio::spawn(async move {
            loop {
                let report = self.run_cycle_guarded().await;
                self.snapshot.record(&report).await;
                tokio::time::sleep(self.interval).await;
            }
        })
    }

    /// [`Self::run_cycle`], with a panic turned into an abandoned cycle
    async fn run_cycle_guarded(&self) -> CycleReport {
        let started_at = Utc::now();
        match AssertUnwindSafe(self.run_cycle()).catch_unwind().await {
            Ok(report) => report,
            Err(panic) => {
                let error = format!("check cycle panicked: {}", panic_message(panic.as_ref()));
                error!(error = %error, "Abandoning check cycle");
                CycleReport {
                    started_at,
                    finished_at: Utc::now(),
                    outcome: CycleOutcome::Abandoned { error },
                }
            }
        }
    }

    /// Run one check cycle over every registered service
    pub async fn run_cycle(&self) -> CycleReport {
        let started_at = Utc::now();

        let services = match self.registry.list_all().await {
            Ok(services) => services,
            Err(e) => {
                error!(error = %e, "Could not list services, abandoning check cycle");
                return CycleReport {
                    started_at,
                    finished_at: Utc::now(),
                    outcome: CycleOutcome::Abandoned {
                        error: e.to_string(),
                    },
                };
            }
        };

        // `buffered` keeps results in listing order; with a limit of 1 the
        // probes run strictly one after another.
        let results: Vec<ServiceCheckOutcome> = stream::iter(services)
            .map(|service| self.check_service(service))
            .buffered(self.max_concurrent_probes)
            .collect()
            .await;

        let report = CycleReport {
            started_at,
            finished_at: Utc::now(),
            outcome: CycleOutcome::Completed { results },
        };

        info!(
            services_checked = report.services_checked(),
            operational = report.count_with_status(ServiceStatus::Operational),
            down = report.count_with_status(ServiceStatus::Down),
            persist_failures = report.persist_failures(),
            check_failures = report.check_failures(),
            duration_ms = (report.finished_at - report.started_at).num_milliseconds(),
            "Check cycle completed"
        );

        report
    }

    async fn check_service(&self, service: MonitoredService) -> ServiceCheckOutcome {
        let service_id = service.id;
        let name = service.name.clone();

        match AssertUnwindSafe(self.probe_and_persist(service))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(panic) => {
                let error = format!("check panicked: {}", panic_message(panic.as_ref()));
                error!(service_id, name = %name, error = %error, "Service check failed");
                ServiceCheckOutcome::Failed {
                    service_id,
                    name,
                    error,
                }
            }
        }
    }

    async fn probe_and_persist(&self, mut service: MonitoredService) -> ServiceCheckOutcome {
        let outcome = self.probe.probe(&service.url).await;
        service.record_check(outcome.status, Utc::now());

        match self.registry.update(&service).await {
            Ok(updated) => {
                info!(
                    service_id = updated.id,
                    name = %updated.name,
                    status = %updated.current_status,
                    duration_ms = outcome.elapsed.as_millis() as u64,
                    "Service checked"
                );
                ServiceCheckOutcome::Updated {
                    service_id: updated.id,
                    name: updated.name,
                    status: updated.current_status,
                }
            }
            Err(e) => {
                warn!(
                    service_id = service.id,
                    name = %service.name,
                    status = %outcome.status,
                    error = %e,
                    "Failed to persist service status"
                );
                ServiceCheckOutcome::PersistFailed {
                    service_id: service.id,
                    name: service.name,
                    status: outcome.status,
                    error: e.to_string(),
                }
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
