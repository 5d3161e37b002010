//! # Route Definitions

use axum::routing::get;
use axum::Router;

use crate::web::handlers;
use crate::web::state::AppState;

/// Query API under `/api`
pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/services", get(handlers::services::list_services))
        .route("/services/{id}", get(handlers::services::get_service))
}

/// Liveness and checker status
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health::liveness))
        .route("/health", get(handlers::health::liveness))
        .route("/ping", get(handlers::health::liveness))
        .route("/health/checker", get(handlers::health::checker_status))
}
