use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{authorize, extract_bearer, AuthFailure, Claims, TokenVerifier};
use crate::error::ApiError;

/// Per-route guard: the verifier plus the one permission the route requires
#[derive(Clone)]
pub struct PermissionGate {
    verifier: Arc<TokenVerifier>,
    permission: &'static str,
}

impl PermissionGate {
    pub fn new(verifier: Arc<TokenVerifier>, permission: &'static str) -> Self {
        Self { verifier, permission }
    }

    async fn admit(&self, headers: &HeaderMap) -> Result<Claims, AuthFailure> {
        let token = extract_bearer(headers)?.to_owned();
        let claims = self.verifier.verify(&token).await?;
        authorize(&claims, self.permission)?;
        Ok(claims)
    }
}

/// Rejects before the handler runs; on success the verified claims ride along
/// as a request extension
pub async fn require_permission(
    State(gate): State<PermissionGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = gate.admit(request.headers()).await.map_err(|failure| {
        tracing::warn!(
            code = failure.code,
            permission = gate.permission,
            "Rejected {} {}: {}",
            request.method(),
            request.uri().path(),
            failure.description
        );
        ApiError::from(failure)
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
