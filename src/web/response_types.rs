//! JSON shapes returned by the query API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CheckType, MonitoredService, ServiceGroup, ServiceStatus};

/// One service as the dashboard sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub check_type: CheckType,
    pub current_status: ServiceStatus,
    pub last_checked_at: Option<DateTime<Utc>>,
}

impl From<MonitoredService> for ServiceResponse {
    fn from(service: MonitoredService) -> Self {
        Self {
            id: service.id,
            name: service.name,
            url: service.url,
            check_type: service.check_type,
            current_status: service.current_status,
            last_checked_at: service.last_checked_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceGroupResponse {
    pub title: String,
    pub checks: Vec<ServiceResponse>,
    pub status: ServiceStatus,
}

impl From<ServiceGroup> for ServiceGroupResponse {
    fn from(group: ServiceGroup) -> Self {
        Self {
            title: group.title,
            checks: group.checks.into_iter().map(ServiceResponse::from).collect(),
            status: group.status,
        }
    }
}

/// Liveness body; independent of checker health
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
    pub timestamp: String,
    pub application: String,
    pub version: String,
}
