//! # Service Status Server
//!
//! ```bash
//! # Defaults plus config/service-status.toml when present
//! cargo run --bin service-status
//!
//! # PostgreSQL-backed, JSON logs
//! SERVICE_STATUS_ENV=production \
//! SERVICE_STATUS__DATABASE__URL=postgres://localhost/service_status \
//!   cargo run --bin service-status
//! ```

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};

use service_status::{bootstrap, logging, StatusConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting service status server");

    let config = StatusConfig::load().context("Failed to load configuration")?;
    let handle = bootstrap::bootstrap(config)
        .await
        .context("Failed to start service status server")?;

    info!(address = %handle.local_addr, "Service status server started");

    shutdown_signal().await;
    info!("Shutdown signal received, stopping");

    handle.stop().await.context("Failed to stop cleanly")?;
    info!("Service status server shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
