//! Bearer-token authentication and permission checks.
//!
//! A request flows through [`extract_bearer`] → [`TokenVerifier::verify`] →
//! [`authorize`]; every failure on that path is an [`AuthFailure`].

pub mod gate;
pub mod permissions;
pub mod token;
pub mod verifier;

use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

pub use gate::authorize;
pub use permissions::Role;
pub use token::{sign_hs256, TokenClaims, TokenError};
pub use verifier::{extract_bearer, KeySetError, TokenVerifier};

/// Verified token payload handed to handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claims {
    pub subject: Option<String>,
    pub permissions: BTreeSet<String>,
    pub expires_at: i64,
}

impl Claims {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

/// Rejection raised anywhere between the Authorization header and the permission check.
///
/// `status` is the failure's own classification (400 malformed, 401 invalid, 403 denied);
/// the HTTP layer always answers 401 and reports `status` inside the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {description}")]
pub struct AuthFailure {
    pub code: &'static str,
    pub status: u16,
    pub description: String,
}

impl AuthFailure {
    fn new(code: &'static str, status: u16, description: impl Into<String>) -> Self {
        Self {
            code,
            status,
            description: description.into(),
        }
    }

    pub fn header_missing() -> Self {
        Self::new("authorization_header_missing", 400, "Authorization header is expected.")
    }

    pub fn invalid_header(description: impl Into<String>) -> Self {
        Self::new("invalid_header", 400, description)
    }

    pub fn token_expired() -> Self {
        Self::new("token_expired", 401, "Token expired.")
    }

    pub fn invalid_claims(description: impl Into<String>) -> Self {
        Self::new("invalid_claims", 401, description)
    }

    pub fn invalid_token(description: impl Into<String>) -> Self {
        Self::new("invalid_token", 401, description)
    }

    pub fn permissions_missing() -> Self {
        Self::new("invalid_claims", 400, "Permissions not included in JWT.")
    }

    pub fn key_set_unavailable(description: impl Into<String>) -> Self {
        Self::new("key_set_unavailable", 401, description)
    }

    pub fn permission_denied(permission: &str) -> Self {
        Self::new("unauthorized", 403, format!("Permission '{}' not found.", permission))
    }
}
