//! Rewrites logical column names in predicate fragments to physical expressions

use super::column::column_name;
use super::error::LogQueryError;
use super::schema::{BODY_COLUMN, SchemaSnapshot};

/// Resolve the leading column of every fragment against `schema`.
///
/// Body and selected columns stay as written. Interesting fields become a
/// lookup into their key/value arrays. Anything else fails the whole batch.
///
/// Only the first textual occurrence of the lowercased column name is
/// replaced. That occurrence is not guaranteed to be the column position: an
/// earlier substring match (or a column written in upper case) is rewritten
/// or skipped accordingly.
pub fn resolve_columns(
    schema: &SchemaSnapshot,
    fragments: Vec<String>,
) -> Result<Vec<String>, LogQueryError> {
    fragments
        .into_iter()
        .map(|fragment| resolve_fragment(schema, fragment))
        .collect()
}

fn resolve_fragment(schema: &SchemaSnapshot, fragment: String) -> Result<String, LogQueryError> {
    let column = column_name(&fragment)?;

    if column == BODY_COLUMN || schema.is_selected(&column) {
        return Ok(fragment);
    }

    let Some(field) = schema.interesting_field(&column) else {
        tracing::debug!(%column, "Filter column not in schema");
        return Err(LogQueryError::unresolvable(column));
    };

    Ok(fragment.replacen(&column, &field.lookup_expr(&column), 1))
}
