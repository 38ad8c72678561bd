//! WHERE clause assembly

use super::error::LogQueryError;
use super::params::FilterRequest;
use super::resolve::resolve_columns;
use super::schema::SchemaSnapshot;
use super::translate::translate_query;

/// Build the body of a WHERE clause (without the keyword) for `request`.
///
/// Query fragments come first, then the timestamp and id bounds in fixed
/// order. A bound is prefixed with `and ` whenever anything precedes it.
/// Returns an empty string when there is nothing to filter on.
pub fn build_where_clause(
    schema: &SchemaSnapshot,
    request: &FilterRequest,
) -> Result<String, LogQueryError> {
    let mut fragments = if request.query.is_empty() {
        Vec::new()
    } else {
        resolve_columns(schema, translate_query(&request.query)?)?
    };

    let bounds = [
        request
            .timestamp_start
            .filter(|ts| *ts != 0)
            .map(|ts| format!("timestamp >= '{ts}' ")),
        request
            .timestamp_end
            .filter(|ts| *ts != 0)
            .map(|ts| format!("timestamp <= '{ts}' ")),
        request
            .id_start
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("id > '{id}' ")),
        request
            .id_end
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("id < '{id}' ")),
    ];

    for bound in bounds.into_iter().flatten() {
        if fragments.is_empty() {
            fragments.push(bound);
        } else {
            fragments.push(format!("and {bound}"));
        }
    }

    let where_clause = fragments.concat();
    tracing::debug!(%where_clause, "Built log filter");
    Ok(where_clause)
}

/// Queries over `max` bytes are refused before translation
pub fn check_query_length(query: &str, max: usize) -> Result<(), LogQueryError> {
    if query.len() > max {
        return Err(LogQueryError::QueryTooLong {
            len: query.len(),
            max,
        });
    }
    Ok(())
}
