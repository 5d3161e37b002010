//! Proptest strategies for service statuses.

use proptest::prelude::*;
use service_status::ServiceStatus;

pub fn any_status() -> impl Strategy<Value = ServiceStatus> {
    prop_oneof![
        Just(ServiceStatus::Operational),
        Just(ServiceStatus::Degraded),
        Just(ServiceStatus::Down),
        Just(ServiceStatus::Unknown),
    ]
}

/// Statuses that never reach the `Degraded` or `Down` branches
pub fn benign_status() -> impl Strategy<Value = ServiceStatus> {
    prop_oneof![Just(ServiceStatus::Operational), Just(ServiceStatus::Unknown)]
}

/// Everything except `Down`
pub fn non_down_status() -> impl Strategy<Value = ServiceStatus> {
    prop_oneof![
        Just(ServiceStatus::Operational),
        Just(ServiceStatus::Degraded),
        Just(ServiceStatus::Unknown),
    ]
}

pub fn status_list() -> impl Strategy<Value = Vec<ServiceStatus>> {
    prop::collection::vec(any_status(), 0..32)
}
