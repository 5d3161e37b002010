//! # Health Check Handlers
//!
//! Liveness answers 200 while the process can serve requests, whatever the
//! checker or registry are doing.

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::health::CheckerSnapshot;
use crate::web::response_types::LivenessResponse;
use crate::web::state::AppState;

/// Liveness: GET /health (also / and /ping)
pub async fn liveness(State(state): State<AppState>) -> Json<LivenessResponse> {
    let server = state.server();
    Json(LivenessResponse {
        status: "UP".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        application: server.application_name.clone(),
        version: server.version.clone(),
    })
}

/// Latest checker activity: GET /health/checker
pub async fn checker_status(State(state): State<AppState>) -> Json<CheckerSnapshot> {
    Json(state.checker_snapshot.get().await)
}
