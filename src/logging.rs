//! # Tracing Module
//!
//! Environment-aware console logging for containerized deployment: logs go to
//! stdout, human-readable in development and JSON in production.
//!
//! The environment is read from `SERVICE_STATUS_ENV`, then `APP_ENV`, and
//! defaults to `development`. `RUST_LOG` overrides the environment's level.

use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize console logging once per process
///
/// Safe to call repeatedly; a subscriber installed elsewhere (tests) is kept.
pub fn init_tracing() {
    TRACING_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment, std::env::var("RUST_LOG").ok());
        let json = environment == "production";
        let use_ansi = !json && IsTerminal::is_terminal(&std::io::stdout());

        let json_layer = json.then(|| {
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
        });
        let console_layer = (!json).then(|| {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(use_ansi)
        });

        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(&log_level))
            .with(json_layer)
            .with(console_layer);

        if subscriber.try_init().is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        } else {
            tracing::info!(
                environment = %environment,
                log_level = %log_level,
                json,
                ansi_colors = use_ansi,
                "Console logging initialized"
            );
        }
    });
}

fn get_environment() -> String {
    std::env::var("SERVICE_STATUS_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

fn get_log_level(environment: &str, rust_log: Option<String>) -> String {
    if let Some(level) = rust_log.filter(|l| !l.trim().is_empty()) {
        return level.to_lowercase();
    }

    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}
