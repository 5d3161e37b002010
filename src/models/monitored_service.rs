use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::{CheckType, ServiceStatus};
use crate::error::{StatusError, StatusResult};

/// A registered external endpoint whose reachability is tracked
///
/// Maps to the `services` table. `id` is assigned by the registry at creation
/// and never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoredService {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub check_type: CheckType,
    pub current_status: ServiceStatus,
    pub last_checked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MonitoredService {
    /// Build the initial record for a freshly registered service
    pub fn from_new(id: i64, new_service: NewMonitoredService, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new_service.name,
            url: new_service.url,
            check_type: new_service.check_type,
            current_status: ServiceStatus::Unknown,
            last_checked_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the result of one check
    ///
    /// `last_checked_at` never moves backwards; an older `checked_at` keeps the
    /// stored timestamp.
    pub fn record_check(&mut self, status: ServiceStatus, checked_at: DateTime<Utc>) {
        self.current_status = status;
        self.last_checked_at = Some(match self.last_checked_at {
            Some(previous) if previous > checked_at => previous,
            _ => checked_at,
        });
        self.updated_at = checked_at.max(self.updated_at);
    }
}

/// New service registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMonitoredService {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub check_type: CheckType,
}

impl NewMonitoredService {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            check_type: CheckType::Http,
        }
    }

    /// Reject blank names and endpoints that are not absolute URLs
    pub fn validate(&self) -> StatusResult<()> {
        if self.name.trim().is_empty() {
            return Err(StatusError::validation("Service name cannot be empty"));
        }
        if self.url.trim().is_empty() {
            return Err(StatusError::validation("Service url cannot be empty"));
        }
        reqwest::Url::parse(self.url.trim()).map_err(|e| {
            StatusError::validation(format!("Invalid service url '{}': {e}", self.url))
        })?;
        Ok(())
    }
}
