//! # Web API Module
//!
//! Axum router for the dashboard-facing query API and the liveness endpoints.
//!
//! - [`routes`] - route groups
//! - [`handlers`] - request handlers
//! - [`middleware`] - request id propagation
//! - [`errors`] - error body shared by every failed request
//! - [`state`] - registry, configuration and checker snapshot shared by handlers

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod response_types;
pub mod routes;
pub mod state;

use axum::http::{HeaderValue, Method, StatusCode};
use axum::Router;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use crate::config::CorsConfig;
use state::AppState;

/// Build the application router with its middleware stack
pub fn create_app(app_state: AppState) -> Router {
    let request_timeout = app_state.server().request_timeout();
    let cors = cors_layer(&app_state.config.cors);

    Router::new()
        .merge(routes::health_routes())
        .nest("/api", routes::service_routes())
        .layer(axum::middleware::from_fn(
            middleware::request_id::add_request_id,
        ))
        .layer(tower_http::timeout::TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(cors)
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(middleware::request_id::request_span),
        )
        .with_state(app_state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age_seconds));

    if config.allow_any_origin {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
