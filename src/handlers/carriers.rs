// handlers/carriers.rs - /carriers

use axum::{
    body::Bytes,
    extract::{Path, State},
    Extension,
};
use tracing::info;

use super::{create_rejected, parse_id, store_failed};
use crate::auth::Claims;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Carrier, CarrierView, NewCarrier, Payload};
use crate::state::AppState;

/// GET /carriers
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<CarrierView>> {
    let carriers = state
        .store
        .list_carriers()
        .await
        .map_err(|e| store_failed(e, ApiError::server_error))?;

    if carriers.is_empty() {
        return Err(ApiError::not_found());
    }

    Ok(ApiResponse::new("carriers", carriers.iter().map(Carrier::view).collect()))
}

/// POST /carriers
pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: Bytes,
) -> ApiResult<CarrierView> {
    let payload = Payload::parse(&body).map_err(|_| ApiError::bad_request())?;
    let new = NewCarrier::from_payload(&payload).map_err(|e| create_rejected(e, ApiError::server_error))?;

    let carrier = state
        .store
        .insert_carrier(new)
        .await
        .map_err(|e| store_failed(e, ApiError::server_error))?;

    info!(id = carrier.id, by = ?claims.subject, "Created carrier");
    Ok(ApiResponse::new("carrier", carrier.view()))
}

/// PATCH /carriers/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<CarrierView> {
    let id = parse_id(&id)?;
    let existing = state
        .store
        .find_carrier(id)
        .await
        .map_err(|e| store_failed(e, ApiError::unprocessable))?
        .ok_or_else(ApiError::not_found)?;

    let payload = Payload::parse(&body).map_err(|_| ApiError::unprocessable())?;
    let merged = existing.merged(&payload).map_err(|e| {
        tracing::debug!("Rejected carrier {} update: {}", id, e);
        ApiError::unprocessable()
    })?;

    let carrier = state
        .store
        .update_carrier(&merged)
        .await
        .map_err(|e| store_failed(e, ApiError::unprocessable))?;

    info!(id, by = ?claims.subject, "Updated carrier");
    Ok(ApiResponse::new("carrier", carrier.view()))
}
