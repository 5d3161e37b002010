//! # Configuration
//!
//! Layered configuration: built-in defaults, then an optional TOML file, then
//! `SERVICE_STATUS__`-prefixed environment variables with `__` between nested
//! keys (for example `SERVICE_STATUS__CHECKER__INTERVAL_SECONDS=60`).

use config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::health::DEFAULT_PROBE_TIMEOUT;

use crate::error::{StatusError, StatusResult};
use crate::models::{CheckType, NewMonitoredService};

/// Environment variable naming the configuration file
pub const CONFIG_PATH_ENV: &str = "SERVICE_STATUS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/service-status.toml";
const ENV_PREFIX: &str = "SERVICE_STATUS";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StatusConfig {
    pub server: ServerConfig,
    pub checker: CheckerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub seed_services: Vec<SeedService>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub request_timeout_ms: u64,
    /// Reported by the liveness endpoint
    pub application_name: String,
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_ms: 30_000,
            application_name: "service-status-backend".to_string(),
            version: "1.0.0".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    pub enabled: bool,
    /// Delay between the end of one cycle and the start of the next
    pub interval_seconds: u64,
    pub probe_timeout_seconds: u64,
    /// 1 keeps probes strictly sequential within a cycle
    pub max_concurrent_probes: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 30,
            probe_timeout_seconds: DEFAULT_PROBE_TIMEOUT.as_secs(),
            max_concurrent_probes: 1,
        }
    }
}

impl CheckerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL URL; without one the registry lives in memory
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
            acquire_timeout_seconds: 5,
            run_migrations: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_any_origin: bool,
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
            allow_any_origin: false,
            max_age_seconds: 3600,
        }
    }
}

/// Service registered at startup when no service of the same name exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedService {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub check_type: CheckType,
}

impl From<&SeedService> for NewMonitoredService {
    fn from(seed: &SeedService) -> Self {
        Self {
            name: seed.name.clone(),
            url: seed.url.clone(),
            check_type: seed.check_type,
        }
    }
}

impl StatusConfig {
    /// Load from the file named by `SERVICE_STATUS_CONFIG` (or the default
    /// path) and the process environment
    pub fn load() -> StatusResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_with(Some(&path), environment_source())
    }

    /// Load from an explicit file and environment source
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_with(path: Option<&Path>, environment: Environment) -> StatusResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            debug!(path = %path.display(), "Reading configuration file");
            builder = builder.add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let config: StatusConfig = builder.add_source(environment).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> StatusResult<()> {
        if self.server.bind_address.trim().is_empty() {
            return Err(StatusError::Configuration(
                "server.bind_address cannot be empty".to_string(),
            ));
        }
        if self.server.request_timeout_ms == 0 {
            return Err(StatusError::Configuration(
                "server.request_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.checker.interval_seconds == 0 {
            return Err(StatusError::Configuration(
                "checker.interval_seconds must be greater than zero".to_string(),
            ));
        }
        if self.checker.probe_timeout_seconds == 0 {
            return Err(StatusError::Configuration(
                "checker.probe_timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.checker.max_concurrent_probes == 0 {
            return Err(StatusError::Configuration(
                "checker.max_concurrent_probes must be at least 1".to_string(),
            ));
        }
        for seed in &self.seed_services {
            NewMonitoredService::from(seed)
                .validate()
                .map_err(|e| StatusError::Configuration(format!("seed_services: {e}")))?;
        }
        Ok(())
    }
}

/// Environment source for `SERVICE_STATUS__*` variables
pub fn environment_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
}
