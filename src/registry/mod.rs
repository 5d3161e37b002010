//! # Service Registry
//!
//! Durable store of monitored-service records. The checker reads and writes it
//! on every cycle; query handlers only read.
//!
//! Implementations must make a single-record `update` atomic with respect to
//! concurrent readers: a reader sees either the whole previous record or the
//! whole new one.

use async_trait::async_trait;

use crate::error::StatusResult;
use crate::models::{MonitoredService, NewMonitoredService};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryServiceRegistry;
pub use postgres::PgServiceRegistry;

#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// All registered services ordered by id
    ///
    /// Fails with `StorageUnavailable` when the backing store cannot be reached.
    async fn list_all(&self) -> StatusResult<Vec<MonitoredService>>;

    /// One service, or `NotFound`
    async fn get_by_id(&self, id: i64) -> StatusResult<MonitoredService>;

    /// Overwrite status, last-checked-at and updated-at for `service.id`
    ///
    /// A stored `last_checked_at` later than the incoming one is kept.
    async fn update(&self, service: &MonitoredService) -> StatusResult<MonitoredService>;

    /// Create a record with status `Unknown` and no check timestamp
    async fn register(&self, new_service: NewMonitoredService) -> StatusResult<MonitoredService>;

    async fn find_by_name(&self, name: &str) -> StatusResult<Option<MonitoredService>>;
}

/// Register `new_service` unless a service with the same name already exists
pub async fn register_if_absent(
    registry: &dyn ServiceRegistry,
    new_service: NewMonitoredService,
) -> StatusResult<MonitoredService> {
    if let Some(existing) = registry.find_by_name(&new_service.name).await? {
        return Ok(existing);
    }
    registry.register(new_service).await
}
