// handlers/mod.rs - request handlers, one module per resource
//
// Public (no auth): root, health, routing fallbacks
// Guarded (permission per route, see routes.rs): packagers, carriers, shipments

pub mod carriers;
pub mod packagers;
pub mod public;
pub mod shipments;

use crate::database::StoreError;
use crate::error::ApiError;
use crate::models::CreateError;

/// `{id}` segments that are not integers cannot name a row
pub(crate) fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::not_found())
}

/// Missing fields are always 422; a rejected field value is answered the way
/// the endpoint answers a store rejection
pub(crate) fn create_rejected(err: CreateError, on_rejection: fn() -> ApiError) -> ApiError {
    match err {
        CreateError::Missing(failure) => ApiError::unprocessable_with(failure.to_string()),
        CreateError::Field(field) => {
            tracing::debug!("Rejected field on create: {}", field);
            on_rejection()
        }
    }
}

/// Store failures: not found → 404, constraint → endpoint's choice, outage → 500
pub(crate) fn store_failed(err: StoreError, on_constraint: fn() -> ApiError) -> ApiError {
    match err {
        StoreError::NotFound(_) => ApiError::not_found(),
        StoreError::Constraint(msg) => {
            tracing::info!("Store rejected write: {}", msg);
            on_constraint()
        }
        StoreError::Backend(e) => {
            // Log the real error but return generic message
            tracing::error!("Store error: {}", e);
            ApiError::server_error()
        }
    }
}
