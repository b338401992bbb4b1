//! HTTP route handlers for the status service.
//!
//! Routes are organized by endpoint, with per-route response headers. The
//! root endpoint allows cross-origin reads; the health endpoint forbids
//! caching so probes always see a fresh liveness payload. Unknown paths
//! fall through to a JSON 404 that lists the available endpoints.
//!
//! Request logging is enabled via middleware that generates a unique request
//! ID for each incoming request, allowing correlation of all logs within a
//! request.

pub mod health;
pub mod info;

use axum::{
    extract::OriginalUri,
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use http::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL};
use serde_json::json;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_HEALTH;
use crate::middleware::access_log_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and response headers.
///
/// `get` routes also answer HEAD requests; the body is stripped on the wire
/// so infrastructure probes that only check connectivity get an empty 200.
pub fn create_router(state: AppState) -> Router {
    // Root endpoint - instance identity, readable cross-origin
    let info_routes = Router::new()
        .route("/", get(info::index))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ));

    Router::new()
        .merge(info_routes)
        .merge(health_routes)
        .fallback(not_found)
        .with_state(state)
        // Access-log middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(access_log_layer))
}

/// JSON 404 for undefined paths, echoing the requested path back.
async fn not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, not_found_body(&uri))
}

fn not_found_body(uri: &Uri) -> Json<serde_json::Value> {
    Json(json!({
        "error": "Not Found",
        "message": format!("Path {} not found", uri.path()),
        "available_endpoints": ["/", "/health"],
    }))
}
