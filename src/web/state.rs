//! Shared state handed to every handler.

use std::sync::Arc;

use crate::config::{ServerConfig, StatusConfig};
use crate::health::CheckerSnapshotCache;
use crate::registry::ServiceRegistry;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<dyn ServiceRegistry>,
    pub config: Arc<StatusConfig>,
    pub checker_snapshot: CheckerSnapshotCache,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("bind_address", &self.config.server.bind_address)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        registry: Arc<dyn ServiceRegistry>,
        config: StatusConfig,
        checker_snapshot: CheckerSnapshotCache,
    ) -> Self {
        Self {
            registry,
            config: Arc::new(config),
            checker_snapshot,
        }
    }

    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }
}
