//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::middleware;
use super::openapi::openapi_json;
use super::routes::{health, logs};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME, DEFAULT_BODY_LIMIT};
use crate::core::shutdown::shutdown_signal;

pub struct ApiServer {
    config: AppConfig,
}

impl ApiServer {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Full application router
    pub fn router(&self) -> Router {
        let schema = Arc::new(self.config.logs.schema());
        tracing::debug!(
            selected = schema.selected().count(),
            interesting = schema.interesting().count(),
            "Field catalog loaded"
        );

        let logs_routes = logs::routes(
            schema.clone(),
            &self.config.logs.table,
            self.config.logs.max_query_length,
        );

        Router::new()
            .merge(health::routes(schema))
            .route("/api/openapi.json", get(openapi_json))
            .nest("/api/v1/logs", logs_routes)
            .fallback(middleware::handle_404)
            .layer(TraceLayer::new_for_http())
            .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn start(self) -> Result<()> {
        let addr = SocketAddr::new(self.config.server.host.parse()?, self.config.server.port);
        let router = self.router();

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("{} listening on http://{}", APP_NAME, addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}
