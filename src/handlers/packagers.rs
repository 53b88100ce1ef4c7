// handlers/packagers.rs - /packagers

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
use crate::models::{NewPackager, Packager, PackagerView, Payload};
use crate::state::AppState;

/// GET /packagers - an empty table answers 404
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<PackagerView>> {
    let packagers = state
        .store
        .list_packagers()
        .await
        .map_err(|e| store_failed(e, ApiError::server_error))?;

    if packagers.is_empty() {
        return Err(ApiError::not_found());
    }

    Ok(ApiResponse::new("packagers", packagers.iter().map(Packager::view).collect()))
}

/// POST /packagers - requires first_name and initials
pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: Bytes,
) -> ApiResult<PackagerView> {
    let payload = Payload::parse(&body).map_err(|_| ApiError::bad_request())?;
    let new = NewPackager::from_payload(&payload)
        .map_err(|e| create_rejected(e, ApiError::server_error))?;

    let packager = state
        .store
        .insert_packager(new)
        .await
        .map_err(|e| store_failed(e, ApiError::server_error))?;

    info!(id = packager.id, by = ?claims.subject, "Created packager");
    Ok(ApiResponse::new("packager", packager.view()))
}

/// PATCH /packagers/:id - merges only the keys sent
pub async fn update(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<PackagerView> {
    let id = parse_id(&id)?;
    let existing = state
        .store
        .find_packager(id)
        .await
        .map_err(|e| store_failed(e, ApiError::unprocessable))?
        .ok_or_else(ApiError::not_found)?;

    let payload = Payload::parse(&body).map_err(|_| ApiError::unprocessable())?;
    let merged = existing.merged(&payload).map_err(|e| {
        tracing::debug!("Rejected packager {} update: {}", id, e);
        ApiError::unprocessable()
    })?;

    let packager = state
        .store
        .update_packager(&merged)
        .await
        .map_err(|e| store_failed(e, ApiError::unprocessable))?;

    info!(id, by = ?claims.subject, "Updated packager");
    Ok(ApiResponse::new("packager", packager.view()))
}
