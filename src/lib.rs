#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Service Status
//!
//! Periodic reachability checker for externally registered network services,
//! with a read-only JSON API for a status dashboard.
//!
//! ## Overview
//!
//! A single background task probes every registered service on a fixed delay
//! (30 seconds by default). Each probe is an HTTP GET bounded to 5 seconds: any
//! response means `Operational`, anything else means `Down`. Results are
//! written to the registry one service at a time; one failing service never
//! stops the rest of the cycle, and one failing cycle never stops the next.
//!
//! Readers get the stored statuses plus a worst-case rollup
//! (`Down` > `Degraded` > `Operational`).
//!
//! ## Module Organization
//!
//! - [`models`] - service records, statuses and groups
//! - [`registry`] - storage seam with in-memory and PostgreSQL implementations
//! - [`health`] - probe executor, checker, aggregator and checker snapshot
//! - [`web`] - axum router, handlers and error responses
//! - [`config`] - layered configuration
//! - [`bootstrap`] - system wiring and shutdown
//! - [`error`] - error taxonomy
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use service_status::{bootstrap, StatusConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StatusConfig::load()?;
//! let handle = bootstrap::bootstrap(config).await?;
//! println!("listening on {}", handle.local_addr);
//! handle.stop().await?;
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod models;
pub mod registry;
pub mod web;

pub use config::StatusConfig;
pub use error::{StatusError, StatusResult};
pub use health::{aggregate, HealthChecker, HttpProbe, Probe};
pub use models::{CheckType, MonitoredService, NewMonitoredService, ServiceGroup, ServiceStatus};
pub use registry::{InMemoryServiceRegistry, PgServiceRegistry, ServiceRegistry};
