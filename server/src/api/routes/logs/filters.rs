//! Filter translation endpoints

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};

use super::LogsApiState;
use super::types::{AggregateWhereDto, WhereDto};
use crate::api::types::ApiError;
use crate::domain::logs::{
    AggregateRequest, FilterRequest, LiveTailRequest, build_logs_query, build_where_clause,
    check_query_length,
};

/// Translate a log listing request
#[utoipa::path(
    get,
    path = "/api/v1/logs/where",
    tag = "logs",
    params(
        ("q" = Option<String>, Query, description = "Filter query"),
        ("limit" = Option<u32>, Query, description = "Maximum rows (default 30)"),
        ("orderBy" = Option<String>, Query, description = "Sort column (default timestamp)"),
        ("order" = Option<String>, Query, description = "asc or desc (default desc)"),
        ("timestampStart" = Option<u64>, Query, description = "Inclusive lower timestamp bound"),
        ("timestampEnd" = Option<u64>, Query, description = "Inclusive upper timestamp bound"),
        ("idStart" = Option<String>, Query, description = "Exclusive lower id bound"),
        ("idEnd" = Option<String>, Query, description = "Exclusive upper id bound")
    ),
    responses(
        (status = 200, description = "Translated filter", body = WhereDto),
        (status = 400, description = "Invalid filter")
    )
)]
pub async fn filter_where(
    State(state): State<LogsApiState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<WhereDto>, ApiError> {
    let request = FilterRequest::from_params(&params)?;
    check_query_length(&request.query, state.max_query_length)?;

    let where_clause = build_where_clause(&state.schema, &request)?;
    let query = build_logs_query(&state.schema, &state.table, &where_clause, &request)?;

    Ok(Json(WhereDto {
        where_clause,
        query: Some(query),
    }))
}

/// Translate a live tail request
#[utoipa::path(
    get,
    path = "/api/v1/logs/tail/where",
    tag = "logs",
    params(
        ("q" = Option<String>, Query, description = "Filter query"),
        ("timestampStart" = Option<u64>, Query, description = "Inclusive lower timestamp bound"),
        ("idStart" = Option<String>, Query, description = "Exclusive lower id bound")
    ),
    responses(
        (status = 200, description = "Translated filter", body = WhereDto),
        (status = 400, description = "Invalid filter")
    )
)]
pub async fn tail_where(
    State(state): State<LogsApiState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<WhereDto>, ApiError> {
    let tail = LiveTailRequest::from_params(&params)?;
    check_query_length(&tail.query, state.max_query_length)?;

    let where_clause = build_where_clause(&state.schema, &FilterRequest::from(&tail))?;
    Ok(Json(WhereDto {
        where_clause,
        query: None,
    }))
}

/// Translate an aggregation request
#[utoipa::path(
    get,
    path = "/api/v1/logs/aggregate/where",
    tag = "logs",
    params(
        ("q" = Option<String>, Query, description = "Filter query"),
        ("timestampStart" = u64, Query, description = "Inclusive lower timestamp bound"),
        ("timestampEnd" = u64, Query, description = "Inclusive upper timestamp bound"),
        ("step" = u64, Query, description = "Bucket width in seconds"),
        ("groupBy" = Option<String>, Query, description = "Grouping column"),
        ("function" = Option<String>, Query, description = "Aggregate function")
    ),
    responses(
        (status = 200, description = "Translated filter", body = AggregateWhereDto),
        (status = 400, description = "Invalid filter or missing bound")
    )
)]
pub async fn aggregate_where(
    State(state): State<LogsApiState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<AggregateWhereDto>, ApiError> {
    let aggregate = AggregateRequest::from_params(&params)?;
    check_query_length(&aggregate.query, state.max_query_length)?;

    let where_clause = build_where_clause(&state.schema, &FilterRequest::from(&aggregate))?;
    Ok(Json(AggregateWhereDto {
        where_clause,
        group_by: aggregate.group_by,
        function: aggregate.function,
        step_seconds: aggregate.step_seconds,
    }))
}
