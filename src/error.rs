//! Error types for the service status system.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatusError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Service with id {id} not found")]
    NotFound { id: i64 },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StatusError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageUnavailable(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<sqlx::Error> for StatusError {
    fn from(err: sqlx::Error) -> Self {
        StatusError::StorageUnavailable(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StatusError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StatusError::StorageUnavailable(format!("migration failed: {err}"))
    }
}

impl From<config::ConfigError> for StatusError {
    fn from(err: config::ConfigError) -> Self {
        StatusError::Configuration(err.to_string())
    }
}

pub type StatusResult<T> = Result<T, StatusError>;
