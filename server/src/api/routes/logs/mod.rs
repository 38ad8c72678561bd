//! Log query API endpoints

pub mod fields;
pub mod filters;
pub mod types;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::domain::logs::SchemaSnapshot;

/// Shared state for log API endpoints
#[derive(Clone)]
pub struct LogsApiState {
    pub schema: Arc<SchemaSnapshot>,
    pub table: Arc<str>,
    pub max_query_length: usize,
}

/// Build log API routes
pub fn routes(schema: Arc<SchemaSnapshot>, table: &str, max_query_length: usize) -> Router<()> {
    let state = LogsApiState {
        schema,
        table: Arc::from(table),
        max_query_length,
    };

    Router::new()
        .route("/fields", get(fields::list_fields))
        .route("/fields/validate", post(fields::validate_field))
        .route("/where", get(filters::filter_where))
        .route("/tail/where", get(filters::tail_where))
        .route("/aggregate/where", get(filters::aggregate_where))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::domain::logs::{FieldDefinition, FieldType};

    fn app() -> Router {
        let mut schema = SchemaSnapshot::with_static_fields();
        schema.extend(
            [],
            [FieldDefinition::new("user_id", FieldType::Attributes, "String")],
        );
        routes(Arc::new(schema), "logs", 64)
    }

    async fn send(req: Request<Body>) -> (StatusCode, Value) {
        let res = app().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    #[tokio::test]
    async fn test_filter_where() {
        let (status, body) =
            get_json("/where?q=user_id%20in%20(%27a%27)&timestampStart=100&limit=10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["where"],
            "attributes_string_value[indexOf(attributes_string_key, 'user_id')] IN ('a') \
             and timestamp >= '100' "
        );
        assert!(
            body["query"]
                .as_str()
                .unwrap()
                .ends_with("ORDER BY timestamp desc LIMIT 10")
        );
    }

    #[tokio::test]
    async fn test_filter_where_empty() {
        let (status, body) = get_json("/where").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["where"], "");
    }

    #[tokio::test]
    async fn test_filter_where_unknown_column() {
        let (status, body) = get_json("/where?q=foo%20gt%201").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
        assert_eq!(body["code"], "UNRESOLVABLE_COLUMN");
        assert_eq!(body["message"], "field not found for filtering");
    }

    #[tokio::test]
    async fn test_filter_where_unknown_tokens() {
        let (status, body) = get_json("/where?q=id%20gt%201%20%3B").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "UNKNOWN_TOKENS");
    }

    #[tokio::test]
    async fn test_filter_where_query_too_long() {
        let long = "a".repeat(65);
        let (status, body) = get_json(&format!("/where?q={long}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "QUERY_TOO_LONG");
    }

    #[tokio::test]
    async fn test_tail_where() {
        let (status, body) = get_json("/tail/where?timestampStart=5&idStart=abc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["where"], "timestamp >= '5' and id > 'abc' ");
        assert!(body.get("query").is_none());
    }

    #[tokio::test]
    async fn test_aggregate_where_requires_bounds() {
        let (status, body) = get_json("/aggregate/where?timestampStart=1&step=60").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MISSING_PARAM");
        assert_eq!(body["message"], "timestampEnd is required");
    }

    #[tokio::test]
    async fn test_aggregate_where() {
        let (status, body) =
            get_json("/aggregate/where?timestampStart=1&timestampEnd=2&step=60&groupBy=severity_text")
                .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["where"], "timestamp >= '1' and timestamp <= '2' ");
        assert_eq!(body["groupBy"], "severity_text");
        assert_eq!(body["stepSeconds"], 60);
    }

    #[tokio::test]
    async fn test_list_fields() {
        let (status, body) = get_json("/fields").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["selected"].as_array().unwrap().len(), 2);
        let interesting = body["interesting"].as_array().unwrap();
        assert!(interesting.iter().any(|f| f["name"] == "user_id"));
    }

    async fn post_field(json: &str) -> (StatusCode, Value) {
        send(
            Request::post("/fields/validate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
        )
        .await
    }

    #[tokio::test]
    async fn test_validate_field_ok() {
        let (status, body) = post_field(
            r#"{"name":"x","type":"attributes","dataType":"String","indexType":"bloom_filter(0.01)"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
    }

    #[tokio::test]
    async fn test_validate_field_rejected() {
        let (status, body) =
            post_field(r#"{"name":"x","type":"bogus","dataType":"String"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "UNSUPPORTED_FIELD_TYPE");
        assert_eq!(body["message"], "type bogus not supported");
    }
}
