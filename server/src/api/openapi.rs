//! OpenAPI document

use axum::http::header;
use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::health;
use crate::api::routes::logs::{fields, filters, types};
use crate::domain::logs::{FieldDefinition, FieldType, FieldUpdate};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LogLens API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Log filter translation"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "logs", description = "Log filter translation and field catalog")
    ),
    paths(
        health::health,
        fields::list_fields,
        fields::validate_field,
        filters::filter_where,
        filters::tail_where,
        filters::aggregate_where,
    ),
    components(schemas(
        health::HealthResponse,
        health::CatalogCounts,
        FieldDefinition,
        FieldType,
        FieldUpdate,
        types::FieldsDto,
        types::ValidateFieldDto,
        types::WhereDto,
        types::AggregateWhereDto,
    ))
)]
pub struct ApiDoc;

/// Serve the OpenAPI document
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}
