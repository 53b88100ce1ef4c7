// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthFailure;

pub const BAD_REQUEST: &str = "bad request";
pub const NOT_FOUND: &str = "resource not found";
pub const METHOD_NOT_ALLOWED: &str = "method not allowed";
pub const UNPROCESSABLE: &str = "unprocessable";
pub const SERVER_ERROR: &str = "Server Error. We crashed.";

/// HTTP API error rendered as `{ success: false, error: <status>, message }`
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized; the envelope carries the failure's own status
    Unauthorized(AuthFailure),

    // 404 Not Found
    NotFound(String),

    // 405 Method Not Allowed
    MethodNotAllowed,

    // 422 Unprocessable Entity
    UnprocessableEntity(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Value of the envelope's `error` field
    pub fn error_code(&self) -> u16 {
        match self {
            ApiError::Unauthorized(failure) => failure.status,
            other => other.status_code().as_u16(),
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(failure) => &failure.description,
            ApiError::NotFound(msg) => msg,
            ApiError::MethodNotAllowed => METHOD_NOT_ALLOWED,
            ApiError::UnprocessableEntity(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.error_code(),
            "message": self.message()
        })
    }
}

// Static constructor methods carrying the default client messages
impl ApiError {
    pub fn bad_request() -> Self {
        ApiError::BadRequest(BAD_REQUEST.to_string())
    }

    pub fn not_found() -> Self {
        ApiError::NotFound(NOT_FOUND.to_string())
    }

    pub fn unprocessable() -> Self {
        ApiError::UnprocessableEntity(UNPROCESSABLE.to_string())
    }

    pub fn unprocessable_with(message: impl Into<String>) -> Self {
        ApiError::UnprocessableEntity(message.into())
    }

    pub fn server_error() -> Self {
        ApiError::InternalServerError(SERVER_ERROR.to_string())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<AuthFailure> for ApiError {
    fn from(failure: AuthFailure) -> Self {
        ApiError::Unauthorized(failure)
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_rejections_answer_401_but_report_their_own_status() {
        let err = ApiError::from(AuthFailure::permission_denied("delete:shipments"));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_json()["error"], 403);
        assert_eq!(err.to_json()["message"], "Permission 'delete:shipments' not found.");
    }

    #[test]
    fn envelope_shape() {
        assert_eq!(
            ApiError::not_found().to_json(),
            json!({"success": false, "error": 404, "message": "resource not found"})
        );
        assert_eq!(ApiError::MethodNotAllowed.to_json()["error"], 405);
    }
}
