//! Response DTOs for log query endpoints

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::logs::{FieldDefinition, SchemaSnapshot};

/// Field catalog of the running schema
#[derive(Debug, Serialize, ToSchema)]
pub struct FieldsDto {
    pub selected: Vec<FieldDefinition>,
    pub interesting: Vec<FieldDefinition>,
}

impl From<&SchemaSnapshot> for FieldsDto {
    fn from(schema: &SchemaSnapshot) -> Self {
        Self {
            selected: schema.selected().cloned().collect(),
            interesting: schema.interesting().cloned().collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidateFieldDto {
    pub valid: bool,
}

/// Translated filter for a listing request
#[derive(Debug, Serialize, ToSchema)]
pub struct WhereDto {
    /// WHERE clause body, empty when nothing filters
    #[serde(rename = "where")]
    pub where_clause: String,
    /// Full listing query, when the request kind has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Translated filter for an aggregation request
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregateWhereDto {
    #[serde(rename = "where")]
    pub where_clause: String,
    pub group_by: Option<String>,
    pub function: Option<String>,
    pub step_seconds: u64,
}
