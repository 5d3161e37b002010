//! # API Errors
//!
//! Every failed request answers with the same JSON body:
//! `{timestamp, status, error, message}` where `status` is the numeric HTTP code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::error::StatusError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    ServiceUnavailable { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StatusError> for ApiError {
    fn from(err: StatusError) -> Self {
        match err {
            StatusError::NotFound { .. } => Self::NotFound {
                message: err.to_string(),
            },
            StatusError::Validation(message) => Self::BadRequest { message },
            StatusError::StorageUnavailable(_) => Self::ServiceUnavailable {
                message: err.to_string(),
            },
            StatusError::Configuration(_) | StatusError::Internal(_) => Self::Internal {
                message: err.to_string(),
            },
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        }

        let body = ErrorBody {
            timestamp: Utc::now().to_rfc3339(),
            status: status.as_u16(),
            error: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
