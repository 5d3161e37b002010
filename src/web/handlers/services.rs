//! # Service Query Handlers
//!
//! Read-only views over the registry. Statuses are whatever the last check
//! cycle stored; handlers never probe.

use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;

use crate::models::ServiceGroup;
use crate::web::errors::ApiError;
use crate::web::response_types::{ServiceGroupResponse, ServiceResponse};
use crate::web::state::AppState;

/// List all services as one group: GET /api/services
pub async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceGroupResponse>>, ApiError> {
    let services = state.registry.list_all().await?;
    debug!(count = services.len(), "Listing services");

    let group = ServiceGroup::all_services(services);
    Ok(Json(vec![group.into()]))
}

/// One service: GET /api/services/{id}
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ServiceResponse>, ApiError> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid service id '{id}'")))?;

    let service = state.registry.get_by_id(id).await?;
    Ok(Json(service.into()))
}
