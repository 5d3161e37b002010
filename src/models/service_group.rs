use serde::Serialize;

use super::monitored_service::MonitoredService;
use super::status::ServiceStatus;
use crate::health::aggregator::aggregate;

/// Title of the single group returned by the services listing
pub const ALL_SERVICES_TITLE: &str = "All Services";

/// A labelled set of service snapshots with their rollup status
///
/// Computed on read, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceGroup {
    pub title: String,
    pub checks: Vec<MonitoredService>,
    pub status: ServiceStatus,
}

impl ServiceGroup {
    /// Group `services` under `title`, keeping their order
    pub fn new(title: impl Into<String>, services: Vec<MonitoredService>) -> Self {
        let status = aggregate(services.iter().map(|s| s.current_status));
        Self {
            title: title.into(),
            checks: services,
            status,
        }
    }

    pub fn all_services(services: Vec<MonitoredService>) -> Self {
        Self::new(ALL_SERVICES_TITLE, services)
    }
}
