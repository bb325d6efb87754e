//! HTTP surface of the four services. Each service mounts its own router on
//! top of the shared health, OpenAPI and seed endpoints.

use axum::routing::get;
use axum::{Json, Router};
use common::envelope::ApiResponse;
use common::types::Health;
use serde::Serialize;
use service::references::Reference;
use tower_http::cors::CorsLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;
use utoipa::ToSchema;

use crate::errors::ApiError;

pub mod geography;
pub mod products;
pub mod shopping;
pub mod users;

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Rows written by `POST /api/init/seed`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SeedReport {
    pub inserted: u64,
}

pub(crate) fn seed_response(inserted: u64) -> ApiResponse<SeedReport> {
    let message = if inserted == 0 {
        "Los datos iniciales ya estaban cargados"
    } else {
        "Datos iniciales cargados"
    };
    ApiResponse::ok(SeedReport { inserted }, message)
}

pub(crate) fn not_found(reference: Reference, id: i32) -> ApiError {
    ApiError::from(reference.not_found(id))
}

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Add health, the OpenAPI document and the request tracing layers to a service router.
pub fn build_router(api: Router, openapi: utoipa::openapi::OpenApi) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(move || async move { Json(openapi) }))
        .merge(api)
        .layer(build_cors())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

pub use crate::openapi::HealthResponse;
