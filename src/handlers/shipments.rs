// handlers/shipments.rs - /shipments

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
use crate::models::{NewShipment, Payload, Shipment, ShipmentView};
use crate::state::AppState;

/// GET /shipments
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ShipmentView>> {
    let shipments = state
        .store
        .list_shipments()
        .await
        .map_err(|e| store_failed(e, ApiError::server_error))?;

    if shipments.is_empty() {
        return Err(ApiError::not_found());
    }

    Ok(ApiResponse::new("shipments", shipments.iter().map(Shipment::view).collect()))
}

/// POST /shipments
///
/// Missing fields are listed in the 422 message. Unknown carrier or packager ids
/// only surface when the store refuses the row, which answers 400.
pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: Bytes,
) -> ApiResult<ShipmentView> {
    let payload = Payload::parse(&body).map_err(|_| ApiError::bad_request())?;
    let new = NewShipment::from_payload(&payload).map_err(|e| create_rejected(e, ApiError::bad_request))?;

    let shipment = state
        .store
        .insert_shipment(new)
        .await
        .map_err(|e| store_failed(e, ApiError::bad_request))?;

    info!(id = shipment.id, by = ?claims.subject, "Created shipment");
    Ok(ApiResponse::new("shipment", shipment.view()))
}

/// PATCH /shipments/:id - typically fills in a missing tracking number
pub async fn update(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<ShipmentView> {
    let id = parse_id(&id)?;
    let existing = state
        .store
        .find_shipment(id)
        .await
        .map_err(|e| store_failed(e, ApiError::unprocessable))?
        .ok_or_else(ApiError::not_found)?;

    let payload = Payload::parse(&body).map_err(|_| ApiError::unprocessable())?;
    let merged = existing.merged(&payload).map_err(|e| {
        tracing::debug!("Rejected shipment {} update: {}", id, e);
        ApiError::unprocessable()
    })?;

    let shipment = state
        .store
        .update_shipment(&merged)
        .await
        .map_err(|e| store_failed(e, ApiError::unprocessable))?;

    info!(id, by = ?claims.subject, "Updated shipment");
    Ok(ApiResponse::new("shipment", shipment.view()))
}

/// DELETE /shipments/:id - answers with the record as it was
pub async fn delete(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> ApiResult<ShipmentView> {
    let id = parse_id(&id)?;
    let shipment = state
        .store
        .delete_shipment(id)
        .await
        .map_err(|e| store_failed(e, ApiError::unprocessable))?;

    info!(id, by = ?claims.subject, "Deleted shipment");
    Ok(ApiResponse::new("deleted", shipment.view()))
}
