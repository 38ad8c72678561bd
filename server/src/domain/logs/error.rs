//! Error type for log query translation and field validation

use thiserror::Error;

/// Errors raised while translating a log filter or validating a field.
///
/// All variants are request-validation failures: the API layer maps them to
/// `400 Bad Request` with the message passed through unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogQueryError {
    /// Text left over after every recognised clause was removed
    #[error("failed to parse query, contains unknown tokens")]
    UnknownTokens,

    /// Column is neither selected, interesting, nor the body column
    #[error("field not found for filtering")]
    UnresolvableColumn { column: String },

    /// Fragment does not split into column + operator + operand
    #[error("incorrect filter")]
    MalformedClause { clause: String },

    #[error("{0} cannot be empty")]
    MissingFieldAttribute(&'static str),

    #[error("type {0} not supported")]
    UnsupportedFieldType(String),

    #[error("index type {0} not supported")]
    UnsupportedIndexType(String),

    /// A bound that a specific request kind requires was not supplied
    #[error("{0} is required")]
    MissingRequiredBound(&'static str),

    #[error("invalid value for {param}: {value}")]
    InvalidParam { param: &'static str, value: String },

    #[error("cannot order by column: {0}")]
    UnsortableColumn(String),

    #[error("query is {len} bytes, maximum is {max}")]
    QueryTooLong { len: usize, max: usize },
}

impl LogQueryError {
    pub fn unresolvable(column: impl Into<String>) -> Self {
        Self::UnresolvableColumn {
            column: column.into(),
        }
    }

    pub fn malformed(clause: impl Into<String>) -> Self {
        Self::MalformedClause {
            clause: clause.into(),
        }
    }

    pub fn invalid_param(param: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidParam {
            param,
            value: value.into(),
        }
    }

    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownTokens => "UNKNOWN_TOKENS",
            Self::UnresolvableColumn { .. } => "UNRESOLVABLE_COLUMN",
            Self::MalformedClause { .. } => "MALFORMED_CLAUSE",
            Self::MissingFieldAttribute(_) => "MISSING_FIELD_ATTRIBUTE",
            Self::UnsupportedFieldType(_) => "UNSUPPORTED_FIELD_TYPE",
            Self::UnsupportedIndexType(_) => "UNSUPPORTED_INDEX_TYPE",
            Self::MissingRequiredBound(_) => "MISSING_PARAM",
            Self::InvalidParam { .. } => "INVALID_PARAM",
            Self::UnsortableColumn(_) => "INVALID_SORT_COLUMN",
            Self::QueryTooLong { .. } => "QUERY_TOO_LONG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_service_wording() {
        assert_eq!(
            LogQueryError::UnknownTokens.to_string(),
            "failed to parse query, contains unknown tokens"
        );
        assert_eq!(
            LogQueryError::unresolvable("foo").to_string(),
            "field not found for filtering"
        );
        assert_eq!(
            LogQueryError::malformed("x").to_string(),
            "incorrect filter"
        );
        assert_eq!(
            LogQueryError::UnsupportedFieldType("bogus".into()).to_string(),
            "type bogus not supported"
        );
        assert_eq!(
            LogQueryError::UnsupportedIndexType("bloom_filter(2)".into()).to_string(),
            "index type bloom_filter(2) not supported"
        );
        assert_eq!(
            LogQueryError::MissingRequiredBound("timestampStart").to_string(),
            "timestampStart is required"
        );
        assert_eq!(
            LogQueryError::MissingFieldAttribute("dataType").to_string(),
            "dataType cannot be empty"
        );
    }

    #[test]
    fn test_codes() {
        assert_eq!(LogQueryError::UnknownTokens.code(), "UNKNOWN_TOKENS");
        assert_eq!(
            LogQueryError::invalid_param("limit", "abc").code(),
            "INVALID_PARAM"
        );
        assert_eq!(
            LogQueryError::QueryTooLong { len: 10, max: 5 }.code(),
            "QUERY_TOO_LONG"
        );
    }
}
