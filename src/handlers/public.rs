// handlers/public.rs - Public handlers (no authentication required)
//
// Home greeting, store health probe and the JSON routing fallbacks.

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

pub const GREETING: &str = "Welcome to the Daily Shipping App!";
pub const EXCITED_GREETING: &str = "Hurrah! You got to the home of the Daily Shipping App!";

/// GET /
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let message = if state.excited { EXCITED_GREETING } else { GREETING };

    Json(json!({
        "success": true,
        "message": message,
    }))
}

/// GET /health - 503 when the store cannot be reached
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.store.health_check().await {
        Ok(()) => Ok(Json(json!({
            "success": true,
            "status": "ok",
        }))),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("database unavailable"))
        }
    }
}

/// Router fallback for unknown paths
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}

/// Method fallback for known paths
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
