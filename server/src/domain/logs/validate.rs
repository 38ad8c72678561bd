//! Field definition validation
//!
//! Runs before a field is admitted into a schema, so the column resolver only
//! ever sees field types it knows how to address.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::LogQueryError;
use super::schema::{FieldDefinition, FieldType};

static INDEX_TYPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:minmax",
        r"|set\([0-9]\)",
        r"|bloom_filter\((?:0?\.[0-9]+|1)\)",
        r"|tokenbf_v1\([0-9]+,[0-9]+,[0-9]+\)",
        r"|ngrambf_v1\([0-9]+,[0-9]+,[0-9]+,[0-9]+\)",
        r")$"
    ))
    .expect("Invalid index type regex")
});

/// Proposed field definition, as submitted by a client
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldUpdate {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub index_type: Option<String>,
}

/// Check a proposed field definition
pub fn validate_field_definition(field: &FieldUpdate) -> Result<(), LogQueryError> {
    if field.name.is_empty() {
        return Err(LogQueryError::MissingFieldAttribute("name"));
    }
    if field.field_type.is_empty() {
        return Err(LogQueryError::MissingFieldAttribute("type"));
    }
    if field.data_type.is_empty() {
        return Err(LogQueryError::MissingFieldAttribute("dataType"));
    }

    field.field_type.parse::<FieldType>()?;

    if let Some(index_type) = &field.index_type
        && !is_supported_index_type(index_type)
    {
        return Err(LogQueryError::UnsupportedIndexType(index_type.clone()));
    }

    Ok(())
}

/// Whether `index_type` is a skip index the store accepts
pub fn is_supported_index_type(index_type: &str) -> bool {
    INDEX_TYPE_REGEX.is_match(index_type)
}

impl TryFrom<FieldUpdate> for FieldDefinition {
    type Error = LogQueryError;

    fn try_from(field: FieldUpdate) -> Result<Self, Self::Error> {
        validate_field_definition(&field)?;
        Ok(Self {
            field_type: field.field_type.parse()?,
            name: field.name,
            data_type: field.data_type,
            index_type: field.index_type,
        })
    }
}
