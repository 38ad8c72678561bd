//! Log filter language
//!
//! Translates the user-facing log filter language into the body of a SQL WHERE
//! clause, resolving field names against a tenant's log schema.
//!
//! ```
//! use loglens_server::domain::logs::{FilterRequest, SchemaSnapshot, build_where_clause};
//!
//! let schema = SchemaSnapshot::with_static_fields();
//! let request = FilterRequest {
//!     query: "fulltext contains 'timeout'".to_string(),
//!     timestamp_start: Some(100),
//!     ..FilterRequest::default()
//! };
//! let sql = build_where_clause(&schema, &request).unwrap();
//! assert_eq!(sql, "body ILIKE '%timeout%' and timestamp >= '100' ");
//! ```

mod column;
mod error;
mod grammar;
mod operators;
mod params;
mod query;
mod resolve;
mod schema;
mod translate;
mod validate;
mod where_clause;

pub use column::column_name;
pub use error::LogQueryError;
pub use grammar::{ClauseToken, scan_clauses};
pub use operators::Operator;
pub use params::{AggregateRequest, FilterRequest, LiveTailRequest, SortOrder};
pub use query::{LOGS_SQL_SELECT, build_logs_query};
pub use resolve::resolve_columns;
pub use schema::{
    BODY_COLUMN, DEFAULT_SKIP_INDEX_GRANULARITY, DEFAULT_SKIP_INDEX_TYPE, FULLTEXT_ALIAS,
    FieldDefinition, FieldType, SchemaSnapshot, static_interesting_fields, static_selected_fields,
};
pub use translate::translate_query;
pub use validate::{FieldUpdate, is_supported_index_type, validate_field_definition};
pub use where_clause::{build_where_clause, check_query_length};
