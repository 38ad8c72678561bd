//! Log request parameters
//!
//! Builds typed requests from decoded URL query parameters. Three request kinds
//! share the same filter core: listing, live tail, and aggregation.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::LogQueryError;

pub const PARAM_QUERY: &str = "q";
pub const PARAM_LIMIT: &str = "limit";
pub const PARAM_ORDER_BY: &str = "orderBy";
pub const PARAM_ORDER: &str = "order";
pub const PARAM_TIMESTAMP_START: &str = "timestampStart";
pub const PARAM_TIMESTAMP_END: &str = "timestampEnd";
pub const PARAM_ID_START: &str = "idStart";
pub const PARAM_ID_END: &str = "idEnd";
pub const PARAM_GROUP_BY: &str = "groupBy";
pub const PARAM_FUNCTION: &str = "function";
pub const PARAM_STEP: &str = "step";

pub const DEFAULT_LIMIT: u32 = 30;
pub const DEFAULT_ORDER_BY: &str = "timestamp";

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for SortOrder {
    type Err = LogQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(LogQueryError::invalid_param(PARAM_ORDER, s)),
        }
    }
}

/// Log listing request
///
/// `timestamp_start <= timestamp_end` is not checked here. Absent, zero, or
/// empty bounds mean "unbounded".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    pub query: String,
    pub limit: u32,
    pub order_by: String,
    pub order: SortOrder,
    pub timestamp_start: Option<u64>,
    pub timestamp_end: Option<u64>,
    pub id_start: Option<String>,
    pub id_end: Option<String>,
}

impl Default for FilterRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            limit: DEFAULT_LIMIT,
            order_by: DEFAULT_ORDER_BY.to_string(),
            order: SortOrder::default(),
            timestamp_start: None,
            timestamp_end: None,
            id_start: None,
            id_end: None,
        }
    }
}

impl FilterRequest {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, LogQueryError> {
        let mut req = Self::default();

        if let Some(limit) = parse_param(params, PARAM_LIMIT)? {
            req.limit = limit;
        }
        if let Some(order_by) = params.get(PARAM_ORDER_BY) {
            req.order_by = order_by.clone();
        }
        if let Some(order) = params.get(PARAM_ORDER) {
            req.order = order.parse()?;
        }
        req.query = params.get(PARAM_QUERY).cloned().unwrap_or_default();
        req.timestamp_start = parse_param(params, PARAM_TIMESTAMP_START)?;
        req.timestamp_end = parse_param(params, PARAM_TIMESTAMP_END)?;
        req.id_start = non_empty(params, PARAM_ID_START);
        req.id_end = non_empty(params, PARAM_ID_END);

        tracing::trace!(request = ?req, "Parsed log filter params");
        Ok(req)
    }
}

/// Live tail request: only lower bounds apply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveTailRequest {
    pub query: String,
    pub timestamp_start: Option<u64>,
    pub id_start: Option<String>,
}

impl LiveTailRequest {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, LogQueryError> {
        Ok(Self {
            query: params.get(PARAM_QUERY).cloned().unwrap_or_default(),
            timestamp_start: parse_param(params, PARAM_TIMESTAMP_START)?,
            id_start: non_empty(params, PARAM_ID_START),
        })
    }
}

impl From<&LiveTailRequest> for FilterRequest {
    fn from(tail: &LiveTailRequest) -> Self {
        Self {
            query: tail.query.clone(),
            timestamp_start: tail.timestamp_start,
            id_start: tail.id_start.clone(),
            ..Self::default()
        }
    }
}

/// Time-bucketed aggregation request; both bounds and the step are required
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRequest {
    pub query: String,
    pub timestamp_start: u64,
    pub timestamp_end: u64,
    pub group_by: Option<String>,
    pub function: Option<String>,
    pub step_seconds: u64,
}

impl AggregateRequest {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, LogQueryError> {
        let timestamp_start = parse_param(params, PARAM_TIMESTAMP_START)?
            .ok_or(LogQueryError::MissingRequiredBound(PARAM_TIMESTAMP_START))?;
        let timestamp_end = parse_param(params, PARAM_TIMESTAMP_END)?
            .ok_or(LogQueryError::MissingRequiredBound(PARAM_TIMESTAMP_END))?;
        let query = params.get(PARAM_QUERY).cloned().unwrap_or_default();
        let group_by = non_empty(params, PARAM_GROUP_BY);
        let function = non_empty(params, PARAM_FUNCTION);
        let step_seconds = parse_param(params, PARAM_STEP)?
            .ok_or(LogQueryError::MissingRequiredBound(PARAM_STEP))?;

        Ok(Self {
            query,
            timestamp_start,
            timestamp_end,
            group_by,
            function,
            step_seconds,
        })
    }
}

impl From<&AggregateRequest> for FilterRequest {
    fn from(agg: &AggregateRequest) -> Self {
        Self {
            query: agg.query.clone(),
            timestamp_start: Some(agg.timestamp_start),
            timestamp_end: Some(agg.timestamp_end),
            ..Self::default()
        }
    }
}

fn parse_param<T: FromStr>(
    params: &HashMap<String, String>,
    name: &'static str,
) -> Result<Option<T>, LogQueryError> {
    params
        .get(name)
        .map(|raw| {
            raw.parse()
                .map_err(|_| LogQueryError::invalid_param(name, raw.as_str()))
        })
        .transpose()
}

fn non_empty(params: &HashMap<String, String>, name: &str) -> Option<String> {
    params.get(name).filter(|v| !v.is_empty()).cloned()
}
