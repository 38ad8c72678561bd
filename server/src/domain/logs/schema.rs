//! Log field catalog
//!
//! A tenant's log schema splits fields into two groups. Selected fields are
//! physical columns on every record. Interesting fields live in parallel
//! key/value arrays bucketed by field type and data type, e.g.
//! `attributes_string_key` / `attributes_string_value`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::LogQueryError;

/// Physical column holding the log message
pub const BODY_COLUMN: &str = "body";

/// Column alias that targets the body column in text searches
pub const FULLTEXT_ALIAS: &str = "fulltext";

pub const DATA_TYPE_STRING: &str = "String";
pub const DATA_TYPE_UINT32: &str = "UInt32";
pub const DATA_TYPE_INT32: &str = "Int32";
pub const DATA_TYPE_LOW_CARDINALITY_STRING: &str = "LowCardinality(String)";

/// Skip index applied to newly promoted fields
pub const DEFAULT_SKIP_INDEX_TYPE: &str = "bloom_filter(0.01)";
pub const DEFAULT_SKIP_INDEX_GRANULARITY: u32 = 64;

/// Storage group a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Static,
    Attributes,
    Resources,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Attributes => "attributes",
            Self::Resources => "resources",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = LogQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(Self::Static),
            "attributes" => Ok(Self::Attributes),
            "resources" => Ok(Self::Resources),
            other => Err(LogQueryError::UnsupportedFieldType(other.to_string())),
        }
    }
}

/// A validated log field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_type: Option<String>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: FieldType, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type,
            data_type: data_type.into(),
            index_type: None,
        }
    }

    /// Prefix of the key/value array pair holding this field,
    /// e.g. `attributes_string`
    pub fn bucket(&self) -> String {
        format!("{}_{}", self.field_type, self.data_type.to_lowercase())
    }

    /// Expression reading this field out of its key/value arrays
    pub fn lookup_expr(&self, column: &str) -> String {
        let bucket = self.bucket();
        format!("{bucket}_value[indexOf({bucket}_key, '{column}')]")
    }
}

/// Fields present as physical columns in every log table
pub fn static_selected_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("timestamp", FieldType::Static, DATA_TYPE_UINT32),
        FieldDefinition::new("id", FieldType::Static, DATA_TYPE_STRING),
    ]
}

/// Built-in fields offered for filtering without registration
pub fn static_interesting_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("trace_id", FieldType::Static, DATA_TYPE_STRING),
        FieldDefinition::new("span_id", FieldType::Static, DATA_TYPE_STRING),
        FieldDefinition::new("trace_flags", FieldType::Static, DATA_TYPE_UINT32),
        FieldDefinition::new(
            "severity_text",
            FieldType::Static,
            DATA_TYPE_LOW_CARDINALITY_STRING,
        ),
        FieldDefinition::new("severity_number", FieldType::Static, DATA_TYPE_INT32),
    ]
}

/// Immutable view of a tenant's field catalog, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaSnapshot {
    selected: BTreeMap<String, FieldDefinition>,
    interesting: BTreeMap<String, FieldDefinition>,
}

impl SchemaSnapshot {
    pub fn new(
        selected: impl IntoIterator<Item = FieldDefinition>,
        interesting: impl IntoIterator<Item = FieldDefinition>,
    ) -> Self {
        let mut snapshot = Self::default();
        snapshot.extend(selected, interesting);
        snapshot
    }

    /// Snapshot holding only the built-in catalogs
    pub fn with_static_fields() -> Self {
        Self::new(static_selected_fields(), static_interesting_fields())
    }

    /// Add fields, replacing any existing field of the same name in the same group
    pub fn extend(
        &mut self,
        selected: impl IntoIterator<Item = FieldDefinition>,
        interesting: impl IntoIterator<Item = FieldDefinition>,
    ) {
        self.selected
            .extend(selected.into_iter().map(|f| (f.name.clone(), f)));
        self.interesting
            .extend(interesting.into_iter().map(|f| (f.name.clone(), f)));
    }

    pub fn interesting_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.interesting.get(name)
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.contains_key(name)
    }

    /// Selected fields, ordered by name
    pub fn selected(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.selected.values()
    }

    /// Interesting fields, ordered by name
    pub fn interesting(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.interesting.values()
    }
}
