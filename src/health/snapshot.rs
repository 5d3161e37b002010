//! # Checker Snapshot
//!
//! Shared, read-mostly view of the checker's recent activity. Only the
//! background checker writes it; the `/health/checker` handler reads it
//! without touching the registry.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::checker::{CycleOutcome, CycleReport};
use crate::models::ServiceStatus;

/// Summary of the most recent completed or abandoned cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastCycleSummary {
    pub abandoned: bool,
    pub error: Option<String>,
    pub services_checked: usize,
    pub services_operational: usize,
    pub services_down: usize,
    pub persist_failures: usize,
    pub check_failures: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckerSnapshot {
    pub enabled: bool,
    pub interval_seconds: u64,
    pub cycles_run: u64,
    pub cycles_abandoned: u64,
    pub last_cycle_started_at: Option<DateTime<Utc>>,
    pub last_cycle_finished_at: Option<DateTime<Utc>>,
    pub last_cycle: Option<LastCycleSummary>,
}

impl CheckerSnapshot {
    /// Fold one cycle report into the running totals
    pub fn record(&mut self, report: &CycleReport) {
        self.cycles_run += 1;
        self.last_cycle_started_at = Some(report.started_at);
        self.last_cycle_finished_at = Some(report.finished_at);

        let summary = match &report.outcome {
            CycleOutcome::Abandoned { error } => {
                self.cycles_abandoned += 1;
                LastCycleSummary {
                    abandoned: true,
                    error: Some(error.clone()),
                    ..LastCycleSummary::default()
                }
            }
            CycleOutcome::Completed { .. } => LastCycleSummary {
                abandoned: false,
                error: None,
                services_checked: report.services_checked(),
                services_operational: report.count_with_status(ServiceStatus::Operational),
                services_down: report.count_with_status(ServiceStatus::Down),
                persist_failures: report.persist_failures(),
                check_failures: report.check_failures(),
            },
        };
        self.last_cycle = Some(summary);
    }
}

/// Cloneable handle to the shared snapshot
#[derive(Debug, Clone, Default)]
pub struct CheckerSnapshotCache {
    inner: Arc<RwLock<CheckerSnapshot>>,
}

impl CheckerSnapshotCache {
    #[must_use]
    pub fn new(enabled: bool, interval_seconds: u64) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CheckerSnapshot {
                enabled,
                interval_seconds,
                ..CheckerSnapshot::default()
            })),
        }
    }

    pub async fn get(&self) -> CheckerSnapshot {
        self.inner.read().await.clone()
    }

    pub async fn record(&self, report: &CycleReport) {
        self.inner.write().await.record(report);
    }
}
