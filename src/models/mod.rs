//! # Data Model
//!
//! Monitored service records, their status enumeration, and the computed
//! service group returned by the query API.

pub mod monitored_service;
pub mod service_group;
pub mod status;

pub use monitored_service::{MonitoredService, NewMonitoredService};
pub use service_group::{ServiceGroup, ALL_SERVICES_TITLE};
pub use status::{CheckType, ServiceStatus};
