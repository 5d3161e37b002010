//! In-process registry used when no database is configured, and by tests.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::ServiceRegistry;
use crate::error::{StatusError, StatusResult};
use crate::models::{MonitoredService, NewMonitoredService};

#[derive(Debug, Default)]
struct RegistryState {
    services: BTreeMap<i64, MonitoredService>,
    last_id: i64,
}

/// `BTreeMap` keyed by id, so listing order is ascending id like the SQL store
#[derive(Debug, Clone, Default)]
pub struct InMemoryServiceRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl InMemoryServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.read().services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().services.is_empty()
    }
}

#[async_trait]
impl ServiceRegistry for InMemoryServiceRegistry {
    async fn list_all(&self) -> StatusResult<Vec<MonitoredService>> {
        Ok(self.state.read().services.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> StatusResult<MonitoredService> {
        self.state
            .read()
            .services
            .get(&id)
            .cloned()
            .ok_or(StatusError::NotFound { id })
    }

    async fn update(&self, service: &MonitoredService) -> StatusResult<MonitoredService> {
        let mut state = self.state.write();
        let stored = state
            .services
            .get_mut(&service.id)
            .ok_or(StatusError::NotFound { id: service.id })?;

        // Build the replacement first so readers never observe a half-applied record.
        let mut next = stored.clone();
        next.current_status = service.current_status;
        next.last_checked_at = match (stored.last_checked_at, service.last_checked_at) {
            (Some(previous), Some(incoming)) => Some(previous.max(incoming)),
            (previous, incoming) => incoming.or(previous),
        };
        next.updated_at = Utc::now().max(stored.updated_at);
        *stored = next.clone();

        Ok(next)
    }

    async fn register(&self, new_service: NewMonitoredService) -> StatusResult<MonitoredService> {
        new_service.validate()?;

        let mut state = self.state.write();
        state.last_id += 1;
        let service = MonitoredService::from_new(state.last_id, new_service, Utc::now());
        state.services.insert(service.id, service.clone());

        Ok(service)
    }

    async fn find_by_name(&self, name: &str) -> StatusResult<Option<MonitoredService>> {
        Ok(self
            .state
            .read()
            .services
            .values()
            .find(|s| s.name == name)
            .cloned())
    }
}
