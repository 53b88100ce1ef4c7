// routes.rs - the route table
//
// Every guarded method carries exactly one permission; the gate runs as a
// route layer so unknown verbs still reach the 405 fallback unauthenticated.

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, MethodRouter},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::permissions::*;
use crate::config::SecurityConfig;
use crate::handlers::{carriers, packagers, public, shipments};
use crate::middleware::{require_permission, PermissionGate};
use crate::state::AppState;

pub fn app(state: AppState, security: &SecurityConfig) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Guarded resources
        .route(
            "/packagers",
            resource(&state, [
                (get(packagers::list), GET_PACKAGERS),
                (post(packagers::create), POST_PACKAGER),
            ]),
        )
        .route(
            "/packagers/:id",
            resource(&state, [(patch(packagers::update), PATCH_PACKAGER)]),
        )
        .route(
            "/carriers",
            resource(&state, [
                (get(carriers::list), GET_CARRIERS),
                (post(carriers::create), POST_CARRIER),
            ]),
        )
        .route(
            "/carriers/:id",
            resource(&state, [(patch(carriers::update), PATCH_CARRIER)]),
        )
        .route(
            "/shipments",
            resource(&state, [
                (get(shipments::list), GET_SHIPMENTS),
                (post(shipments::create), POST_SHIPMENTS),
            ]),
        )
        .route(
            "/shipments/:id",
            resource(&state, [
                (patch(shipments::update), PATCH_SHIPMENTS),
                (delete(shipments::delete), DELETE_SHIPMENTS),
            ]),
        )
        .fallback(public::not_found)
        // Global middleware
        .layer(cors_layer(&security.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Gates each method with its permission and merges them under one path
fn resource<const N: usize>(
    state: &AppState,
    methods: [(MethodRouter<AppState>, &'static str); N],
) -> MethodRouter<AppState> {
    methods
        .into_iter()
        .fold(MethodRouter::new(), |router, (method, permission)| {
            let gate = PermissionGate::new(state.verifier.clone(), permission);
            router.merge(method.route_layer(from_fn_with_state(gate, require_permission)))
        })
        .fallback(public::method_not_allowed)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
