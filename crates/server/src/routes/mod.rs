//! HTTP routes for the scanner gateway.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Scanning client (index.html)
//! GET  /health          - Liveness check, never touches Shopify
//! POST /api/scan        - Look up a variant by barcode
//! POST /api/stock       - Tag the scanned variant's product
//! POST /api/inventory   - Inventory levels for an inventory item
//! GET  /*               - Static assets from the public directory
//! ```

pub mod api;

use std::time::Duration;

use axum::{
    Json, Router,
    http::{Request, Response},
    middleware,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::{Level, Span};

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    ok: bool,
}

/// Liveness health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// Create the scanner API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/scan", post(api::scan))
        .route("/stock", post(api::stock))
        .route("/inventory", post(api::inventory))
}

/// Build the complete application with its middleware stack.
///
/// Sentry layers are left to the binary so tests stay free of global hubs.
pub fn app(state: AppState) -> Router {
    let public_dir = state.config().public_dir.clone();
    let index = ServeFile::new(public_dir.join("index.html"));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .route_service("/", index)
        .fallback_service(ServeDir::new(public_dir))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .on_response(response, latency, span);
                }),
        )
        .with_state(state)
}
