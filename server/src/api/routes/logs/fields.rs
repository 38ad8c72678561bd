//! Field catalog endpoints

use axum::Json;
use axum::extract::State;

use super::LogsApiState;
use super::types::{FieldsDto, ValidateFieldDto};
use crate::api::types::ApiError;
use crate::domain::logs::{FieldUpdate, validate_field_definition};

/// List selected and interesting log fields
#[utoipa::path(
    get,
    path = "/api/v1/logs/fields",
    tag = "logs",
    responses(
        (status = 200, description = "Field catalog", body = FieldsDto)
    )
)]
pub async fn list_fields(State(state): State<LogsApiState>) -> Json<FieldsDto> {
    Json(FieldsDto::from(state.schema.as_ref()))
}

/// Validate a proposed field definition
#[utoipa::path(
    post,
    path = "/api/v1/logs/fields/validate",
    tag = "logs",
    request_body = FieldUpdate,
    responses(
        (status = 200, description = "Field definition is valid", body = ValidateFieldDto),
        (status = 400, description = "Field definition is invalid")
    )
)]
pub async fn validate_field(
    Json(field): Json<FieldUpdate>,
) -> Result<Json<ValidateFieldDto>, ApiError> {
    tracing::debug!(name = %field.name, field_type = %field.field_type, "Validating field");
    validate_field_definition(&field)?;
    Ok(Json(ValidateFieldDto { valid: true }))
}
