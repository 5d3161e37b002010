//! # Bootstrap
//!
//! Wires configuration, registry, seed services, the background checker and
//! the HTTP server into one running system, and tears it down again.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::{DatabaseConfig, SeedService, StatusConfig};
use crate::error::{StatusError, StatusResult};
use crate::health::{CheckerSnapshotCache, HealthChecker, HttpProbe};
use crate::registry::{
    register_if_absent, InMemoryServiceRegistry, PgServiceRegistry, ServiceRegistry,
};
use crate::web::{create_app, state::AppState};

/// Running system; call [`ServiceStatusHandle::stop`] to shut down
#[derive(Debug)]
pub struct ServiceStatusHandle {
    pub local_addr: SocketAddr,
    pub state: AppState,
    checker: Option<JoinHandle<()>>,
    server: JoinHandle<std::io::Result<()>>,
    shutdown_tx: oneshot::Sender<()>,
}

impl ServiceStatusHandle {
    pub fn is_checker_running(&self) -> bool {
        self.checker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the checker, then drain the HTTP server
    pub async fn stop(self) -> StatusResult<()> {
        if let Some(checker) = self.checker {
            checker.abort();
            info!("Health checker stopped");
        }

        if self.shutdown_tx.send(()).is_err() {
            warn!("HTTP server already stopped");
        }

        match self.server.await {
            Ok(Ok(())) => {
                info!("HTTP server stopped");
                Ok(())
            }
            Ok(Err(e)) => Err(StatusError::Internal(format!("HTTP server failed: {e}"))),
            Err(e) => Err(StatusError::Internal(format!("HTTP server task failed: {e}"))),
        }
    }
}

/// Start everything described by `config`
pub async fn bootstrap(config: StatusConfig) -> StatusResult<ServiceStatusHandle> {
    let registry = build_registry(&config.database).await?;
    start(config, registry).await
}

/// Start with an already constructed registry
pub async fn start(
    config: StatusConfig,
    registry: Arc<dyn ServiceRegistry>,
) -> StatusResult<ServiceStatusHandle> {
    config.validate()?;

    let seeded = seed_services(registry.as_ref(), &config.seed_services).await?;
    if seeded > 0 {
        info!(count = seeded, "Seed services ensured");
    }

    let snapshot =
        CheckerSnapshotCache::new(config.checker.enabled, config.checker.interval_seconds);

    let listener = TcpListener::bind(&config.server.bind_address)
        .await
        .map_err(|e| {
            StatusError::Configuration(format!(
                "Cannot bind {}: {e}",
                config.server.bind_address
            ))
        })?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| StatusError::Internal(format!("Cannot read bound address: {e}")))?;

    // Spawned only once nothing else in startup can fail
    let checker = if config.checker.enabled {
        let probe = Arc::new(HttpProbe::new(config.checker.probe_timeout())?);
        let checker = HealthChecker::new(
            registry.clone(),
            probe,
            &config.checker,
            snapshot.clone(),
        );
        Some(checker.spawn())
    } else {
        warn!("Health checker disabled by configuration");
        None
    };

    let state = AppState::new(registry, config, snapshot);
    let app = create_app(state.clone());

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
            .inspect_err(|e| error!(error = %e, "HTTP server terminated"))
    });

    info!(address = %local_addr, "HTTP server listening");

    Ok(ServiceStatusHandle {
        local_addr,
        state,
        checker,
        server,
        shutdown_tx,
    })
}

/// PostgreSQL when a database URL is configured, memory otherwise
pub async fn build_registry(config: &DatabaseConfig) -> StatusResult<Arc<dyn ServiceRegistry>> {
    if config.url.is_none() {
        info!("No database configured, using in-memory service registry");
        return Ok(Arc::new(InMemoryServiceRegistry::new()));
    }

    let registry = PgServiceRegistry::connect(config).await?;
    if config.run_migrations {
        registry.migrate().await?;
    }
    Ok(Arc::new(registry))
}

/// Register each seed service whose name is not yet taken
///
/// Returns the number of seeds now present in the registry.
pub async fn seed_services(
    registry: &dyn ServiceRegistry,
    seeds: &[SeedService],
) -> StatusResult<usize> {
    for seed in seeds {
        let service = register_if_absent(registry, seed.into()).await?;
        info!(service_id = service.id, name = %service.name, "Seed service registered");
    }
    Ok(seeds.len())
}
