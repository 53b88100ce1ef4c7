use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire claims of a shipping token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    pub iat: i64,
    pub exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl TokenClaims {
    pub fn new(
        subject: impl Into<String>,
        issuer: Option<&str>,
        audience: &str,
        permissions: &[&str],
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: Some(subject.into()),
            iss: issuer.map(str::to_string),
            aud: Some(audience.to_string()),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            permissions: Some(permissions.iter().map(|p| p.to_string()).collect()),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT generation error: {0}")]
    Generation(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid JWT secret")]
    InvalidSecret,
}

/// Sign claims with the shared development secret
pub fn sign_hs256(claims: &TokenClaims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    Ok(encode(&Header::new(Algorithm::HS256), claims, &encoding_key)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_empty_secret() {
        let claims = TokenClaims::new("dev", None, "shipping", &[], Duration::minutes(5));
        assert!(matches!(sign_hs256(&claims, ""), Err(TokenError::InvalidSecret)));
    }

    #[test]
    fn token_has_three_segments() {
        let claims = TokenClaims::new("dev", Some("iss"), "shipping", &["get:shipments"], Duration::minutes(5));
        let token = sign_hs256(&claims, "secret").unwrap();
        assert_eq!(token.split('.').count(), 3);
    }
}
