//! Log listing query

use super::error::LogQueryError;
use super::params::FilterRequest;
use super::schema::SchemaSnapshot;

/// Projection for log listing; attribute arrays are zipped into maps
pub const LOGS_SQL_SELECT: &str = concat!(
    "SELECT ",
    "timestamp, id, trace_id, span_id, trace_flags, severity_text, severity_number, body, ",
    "CAST((attributes_string_key, attributes_string_value), 'Map(String, String)') as attributes_string, ",
    "CAST((attributes_int64_key, attributes_int64_value), 'Map(String, Int64)') as attributes_int64, ",
    "CAST((attributes_float64_key, attributes_float64_value), 'Map(String, Float64)') as attributes_float64, ",
    "CAST((resources_string_key, resources_string_value), 'Map(String, String)') as resources_string "
);

/// Full listing query for `request` against `table`, filtered by a WHERE
/// clause body from [`build_where_clause`](super::build_where_clause).
///
/// The sort column must be a selected field.
pub fn build_logs_query(
    schema: &SchemaSnapshot,
    table: &str,
    where_clause: &str,
    request: &FilterRequest,
) -> Result<String, LogQueryError> {
    if !schema.is_selected(&request.order_by) {
        return Err(LogQueryError::UnsortableColumn(request.order_by.clone()));
    }

    let mut sql = format!("{LOGS_SQL_SELECT}FROM {table} ");
    if !where_clause.is_empty() {
        sql.push_str("WHERE ");
        sql.push_str(where_clause);
    }
    sql.push_str(&format!(
        "ORDER BY {} {} LIMIT {}",
        request.order_by, request.order, request.limit
    ));
    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::logs::params::SortOrder;
    use crate::domain::logs::where_clause::build_where_clause;

    #[test]
    fn test_query_without_filter() {
        let sql = build_logs_query(
            &SchemaSnapshot::with_static_fields(),
            "logs",
            "",
            &FilterRequest::default(),
        )
        .unwrap();
        assert!(sql.starts_with("SELECT timestamp, id, trace_id"));
        assert!(sql.ends_with("FROM logs ORDER BY timestamp desc LIMIT 30"));
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_query_with_filter() {
        let request = FilterRequest {
            query: "severity_number gte 17".to_string(),
            timestamp_start: Some(10),
            order: SortOrder::Asc,
            limit: 5,
            ..FilterRequest::default()
        };
        let schema = SchemaSnapshot::with_static_fields();
        let where_clause = build_where_clause(&schema, &request).unwrap();
        let sql = build_logs_query(&schema, "signoz_logs.logs", &where_clause, &request).unwrap();
        assert!(sql.ends_with(
            "FROM signoz_logs.logs WHERE \
             static_int32_value[indexOf(static_int32_key, 'severity_number')] >= 17 \
             and timestamp >= '10' ORDER BY timestamp asc LIMIT 5"
        ));
    }

    #[test]
    fn test_query_rejects_unsortable_column() {
        let request = FilterRequest {
            order_by: "body; DROP TABLE logs".to_string(),
            ..FilterRequest::default()
        };
        assert_eq!(
            build_logs_query(&SchemaSnapshot::with_static_fields(), "logs", "", &request)
                .unwrap_err(),
            LogQueryError::UnsortableColumn("body; DROP TABLE logs".into())
        );
    }
}
