#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use shipping_api::auth::{sign_hs256, Role, TokenClaims, TokenVerifier};
use shipping_api::config::SecurityConfig;
use shipping_api::database::{MemoryStore, Store};
use shipping_api::models::{NewCarrier, NewPackager, NewShipment, Shipment};
use shipping_api::{app, AppState};

pub const SECRET: &str = "integration-secret";
pub const ISSUER: &str = "https://shipping.test/";
pub const AUDIENCE: &str = "shipping";

/// Router over a fresh in-memory store, plus a handle to seed it directly
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(false)
    }

    pub fn excited() -> Self {
        Self::build(true)
    }

    fn build(excited: bool) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), verifier()).excited(excited);
        let security = SecurityConfig {
            cors_origins: vec!["*".to_string()],
        };
        Self {
            router: app(state, &security),
            store,
        }
    }

    /// One request through the router; the body comes back parsed (Null when empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json)?)
            }
            None => Body::empty(),
        };
        self.send_request(builder.body(body)?).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("response body is not JSON")?
        };
        Ok((status, value))
    }

    pub async fn get(&self, uri: &str, token: &str) -> Result<(StatusCode, Value)> {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.send(Method::PATCH, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Result<(StatusCode, Value)> {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    pub async fn seed_packager(&self, first_name: &str, initials: &str) -> Result<i32> {
        let packager = self
            .store
            .insert_packager(NewPackager {
                first_name: first_name.to_string(),
                last_name: None,
                initials: initials.to_string(),
                active: true,
            })
            .await?;
        Ok(packager.id)
    }

    pub async fn seed_carrier(&self, name: &str) -> Result<i32> {
        let carrier = self
            .store
            .insert_carrier(NewCarrier {
                name: name.to_string(),
                active: true,
            })
            .await?;
        Ok(carrier.id)
    }

    pub async fn shipment(&self, id: i32) -> Result<Shipment> {
        self.store.find_shipment(id).await?.context("shipment should exist")
    }

    pub async fn seed_shipment(&self, carrier_id: i32, packaged_by: i32) -> Result<i32> {
        let shipment = self
            .store
            .insert_shipment(NewShipment {
                reference: Some(97900),
                carrier_id,
                packages: 2,
                weight: 40.0,
                tracking: None,
                packaged_by,
                create_date: None,
            })
            .await?;
        Ok(shipment.id)
    }
}

pub fn verifier() -> TokenVerifier {
    TokenVerifier::hs256(SECRET, Some(ISSUER), AUDIENCE)
}

pub fn token_with(permissions: &[&str]) -> String {
    let claims = TokenClaims::new("auth0|tester", Some(ISSUER), AUDIENCE, permissions, chrono::Duration::minutes(5));
    sign_hs256(&claims, SECRET).expect("sign test token")
}

pub fn token_for(role: Role) -> String {
    token_with(role.permissions())
}

pub fn supervisor() -> String {
    token_for(Role::Supervisor)
}

pub fn packager() -> String {
    token_for(Role::Packager)
}

/// Asserts the error envelope and that no resource key leaked into it
pub fn assert_error(body: &Value, error: u16, message: &str) {
    assert_eq!(body["success"], Value::Bool(false), "body: {}", body);
    assert_eq!(body["error"], Value::from(error), "body: {}", body);
    assert_eq!(body["message"], Value::from(message), "body: {}", body);
    let keys: Vec<&String> = body.as_object().map(|o| o.keys().collect()).unwrap_or_default();
    assert_eq!(keys.len(), 3, "unexpected keys in {}", body);
}
