use std::path::Path;
use std::time::Duration;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::OnceCell;
use url::Url;

use super::{AuthFailure, Claims};
use crate::config::AuthConfig;

/// Errors building a verifier's trusted key source
#[derive(Debug, Error)]
pub enum KeySetError {
    #[error("No signing key configured: {0}")]
    MissingSource(&'static str),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Failed to read key file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid signing key: {0}")]
    InvalidKey(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid key set URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to fetch key set: {0}")]
    Fetch(#[from] reqwest::Error),
}

/// Upper bound on one key-set request
const KEY_SET_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Remote JWKS, fetched on first use and read-only afterwards
struct RemoteKeySet {
    url: Url,
    client: reqwest::Client,
    keys: OnceCell<JwkSet>,
}

impl RemoteKeySet {
    async fn get(&self) -> Result<&JwkSet, KeySetError> {
        self.keys
            .get_or_try_init(|| async {
                tracing::info!("Fetching signing keys from {}", self.url);
                let set = self
                    .client
                    .get(self.url.clone())
                    .send()
                    .await?
                    .error_for_status()?
                    .json::<JwkSet>()
                    .await?;
                Ok(set)
            })
            .await
    }
}

enum KeySource {
    Static(DecodingKey),
    KeySet(JwkSet),
    Remote(RemoteKeySet),
}

/// Payload fields read after the library has checked signature, `exp`, `iss` and `aud`
#[derive(Debug, Deserialize)]
struct VerifiedPayload {
    sub: Option<String>,
    exp: i64,
    permissions: Option<Vec<String>>,
}

/// Decodes bearer tokens against a trusted key source
pub struct TokenVerifier {
    keys: KeySource,
    validation: Validation,
}

impl TokenVerifier {
    fn validation(algorithm: Algorithm, issuer: Option<&str>, audience: &str) -> Validation {
        let mut validation = Validation::new(algorithm);
        validation.set_audience(&[audience]);
        if let Some(iss) = issuer {
            validation.set_issuer(&[iss]);
        }
        validation
    }

    /// Shared-secret verifier
    pub fn hs256(secret: &str, issuer: Option<&str>, audience: &str) -> Self {
        Self {
            keys: KeySource::Static(DecodingKey::from_secret(secret.as_bytes())),
            validation: Self::validation(Algorithm::HS256, issuer, audience),
        }
    }

    /// RS256 verifier over a single PEM-encoded public key
    pub fn rs256_pem(pem: &[u8], issuer: Option<&str>, audience: &str) -> Result<Self, KeySetError> {
        Ok(Self {
            keys: KeySource::Static(DecodingKey::from_rsa_pem(pem)?),
            validation: Self::validation(Algorithm::RS256, issuer, audience),
        })
    }

    /// RS256 verifier over a remote JWKS endpoint
    pub fn rs256_jwks(url: Url, issuer: Option<&str>, audience: &str) -> Result<Self, KeySetError> {
        let client = reqwest::Client::builder().timeout(KEY_SET_FETCH_TIMEOUT).build()?;
        Ok(Self {
            keys: KeySource::Remote(RemoteKeySet {
                url,
                client,
                keys: OnceCell::new(),
            }),
            validation: Self::validation(Algorithm::RS256, issuer, audience),
        })
    }

    /// RS256 verifier over an already loaded key set
    pub fn rs256_key_set(set: JwkSet, issuer: Option<&str>, audience: &str) -> Self {
        Self {
            keys: KeySource::KeySet(set),
            validation: Self::validation(Algorithm::RS256, issuer, audience),
        }
    }

    /// Tolerated clock skew for `exp`
    pub fn with_leeway(mut self, secs: u64) -> Self {
        self.validation.leeway = secs;
        self
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, KeySetError> {
        let issuer = config.expected_issuer();
        let issuer = issuer.as_deref();
        let audience = config.audience.as_str();

        let verifier = match config.algorithm.as_str() {
            "HS256" => {
                if config.jwt_secret.is_empty() {
                    return Err(KeySetError::MissingSource("AUTH_JWT_SECRET"));
                }
                Self::hs256(&config.jwt_secret, issuer, audience)
            }
            "RS256" => {
                if let Some(path) = &config.public_key_file {
                    let pem = read_key_file(path)?;
                    Self::rs256_pem(&pem, issuer, audience)?
                } else if let Some(url) = &config.jwks_url {
                    Self::rs256_jwks(Url::parse(url)?, issuer, audience)?
                } else if let Some(domain) = &config.domain {
                    let base = Url::parse(&format!("https://{}/", domain.trim_end_matches('/')))?;
                    Self::rs256_jwks(base.join(".well-known/jwks.json")?, issuer, audience)?
                } else {
                    return Err(KeySetError::MissingSource(
                        "AUTH_PUBLIC_KEY_FILE, AUTH_JWKS_URL or AUTH_DOMAIN",
                    ));
                }
            }
            other => return Err(KeySetError::UnsupportedAlgorithm(other.to_string())),
        };

        Ok(verifier.with_leeway(config.leeway_secs))
    }

    /// Verify signature, issuer, audience and expiry, then lift the permission set
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthFailure> {
        let header = decode_header(token)
            .map_err(|_| AuthFailure::invalid_header("Unable to parse authentication token."))?;

        let payload = match &self.keys {
            KeySource::Static(key) => self.decode(token, key)?,
            KeySource::KeySet(set) => self.decode(token, &select_key(set, header.kid.as_deref())?)?,
            KeySource::Remote(remote) => {
                let set = remote.get().await.map_err(|e| {
                    tracing::error!("Signing key set unavailable: {}", e);
                    AuthFailure::key_set_unavailable("Unable to fetch signing keys.")
                })?;
                self.decode(token, &select_key(set, header.kid.as_deref())?)?
            }
        };

        let permissions = payload.permissions.ok_or_else(AuthFailure::permissions_missing)?;

        Ok(Claims {
            subject: payload.sub,
            permissions: permissions.into_iter().collect(),
            expires_at: payload.exp,
        })
    }

    fn decode(&self, token: &str, key: &DecodingKey) -> Result<VerifiedPayload, AuthFailure> {
        decode::<VerifiedPayload>(token, key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| classify(e.kind()))
    }
}

fn select_key(set: &JwkSet, kid: Option<&str>) -> Result<DecodingKey, AuthFailure> {
    let kid = kid.ok_or_else(|| AuthFailure::invalid_header("Authorization malformed."))?;
    set.find(kid)
        .and_then(|jwk| DecodingKey::from_jwk(jwk).ok())
        .ok_or_else(|| AuthFailure::invalid_header("Unable to find the appropriate key."))
}

fn read_key_file(path: &str) -> Result<Vec<u8>, KeySetError> {
    std::fs::read(Path::new(path)).map_err(|source| KeySetError::Io {
        path: path.to_string(),
        source,
    })
}

fn classify(kind: &ErrorKind) -> AuthFailure {
    match kind {
        ErrorKind::ExpiredSignature => AuthFailure::token_expired(),
        ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience | ErrorKind::MissingRequiredClaim(_) => {
            AuthFailure::invalid_claims("Incorrect claims. Please, check the audience and issuer.")
        }
        ErrorKind::InvalidAlgorithm => AuthFailure::invalid_header("Unexpected signing algorithm."),
        ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) | ErrorKind::InvalidToken => {
            AuthFailure::invalid_header("Unable to parse authentication token.")
        }
        _ => AuthFailure::invalid_token("Token signature could not be verified."),
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthFailure> {
    let value = headers.get(AUTHORIZATION).ok_or_else(AuthFailure::header_missing)?;
    let value = value
        .to_str()
        .map_err(|_| AuthFailure::invalid_header("Authorization header is not valid text."))?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), _, _) if !scheme.eq_ignore_ascii_case("bearer") => Err(
            AuthFailure::invalid_header("Authorization header must start with \"Bearer\"."),
        ),
        (Some(_), Some(token), None) => Ok(token),
        (Some(_), None, _) => Err(AuthFailure::invalid_header("Token not found.")),
        (Some(_), Some(_), Some(_)) => {
            Err(AuthFailure::invalid_header("Authorization header must be bearer token."))
        }
        (None, _, _) => Err(AuthFailure::header_missing()),
    }
}
