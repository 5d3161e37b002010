//! # Health Checking
//!
//! Probe execution, the periodic checker, status rollup, and the shared
//! checker snapshot read by the web layer.

pub mod aggregator;
pub mod checker;
pub mod probe;
pub mod snapshot;

pub use aggregator::aggregate;
pub use checker::{CycleOutcome, CycleReport, HealthChecker, ServiceCheckOutcome};
pub use probe::{HttpProbe, Probe, ProbeFailure, ProbeOutcome, DEFAULT_PROBE_TIMEOUT};
pub use snapshot::{CheckerSnapshot, CheckerSnapshotCache, LastCycleSummary};
