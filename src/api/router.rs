use axum::{middleware, routing::get, Router};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::html;
use super::middleware::{identity_headers_middleware, logging_middleware, metrics_middleware};
use super::rest;
use super::state::AppState;

/// Create the full router with application state
///
/// Inbound requests without an `x-request-id` get a fresh one, so the id reaches the
/// logs and is forwarded to peers by the chain endpoints.
pub fn create_router_with_state(state: AppState) -> Router {
    let identity = state.identity.clone();

    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/api", rest::create_rest_router())
        .nest("/html", html::create_html_router())
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn_with_state(
            identity,
            identity_headers_middleware,
        ))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
