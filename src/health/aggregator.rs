//! # Status Aggregator
//!
//! Pure rollup of individual service statuses into one group status.

use crate::models::ServiceStatus;

/// Derive the worst-case status of a set of services
///
/// Priority order: any `Down` wins, then any `Degraded`, otherwise
/// `Operational`. An empty input is `Operational`.
///
/// `Unknown` counts toward the `Operational` branch, so a group whose services
/// have never been checked reads as `Operational`.
pub fn aggregate<I>(statuses: I) -> ServiceStatus
where
    I: IntoIterator<Item = ServiceStatus>,
{
    let mut degraded = false;
    for status in statuses {
        match status {
            ServiceStatus::Down => return ServiceStatus::Down,
            ServiceStatus::Degraded => degraded = true,
            ServiceStatus::Operational | ServiceStatus::Unknown => {}
        }
    }

    if degraded {
        ServiceStatus::Degraded
    } else {
        ServiceStatus::Operational
    }
}
