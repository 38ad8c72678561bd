//! Health check endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::core::constants::APP_NAME_LOWER;
use crate::domain::logs::SchemaSnapshot;

/// Number of fields the translator can resolve
#[derive(Serialize, ToSchema)]
pub struct CatalogCounts {
    pub selected: usize,
    pub interesting: usize,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub fields: CatalogCounts,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health(State(schema): State<Arc<SchemaSnapshot>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: APP_NAME_LOWER,
        version: env!("CARGO_PKG_VERSION"),
        fields: CatalogCounts {
            selected: schema.selected().count(),
            interesting: schema.interesting().count(),
        },
    })
}

/// Build the health route
pub fn routes(schema: Arc<SchemaSnapshot>) -> Router<()> {
    Router::new()
        .route("/api/v1/health", get(health))
        .with_state(schema)
}
