//! Core application

use anyhow::{Context, Result};

use crate::api::ApiServer;
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::domain::logs::{
    FieldUpdate, FilterRequest, build_where_clause, check_query_length, validate_field_definition,
};

pub struct CoreApp {
    pub config: AppConfig,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::Translate {
                query,
                timestamp_start,
                timestamp_end,
                id_start,
                id_end,
            }) => {
                let app = Self::init(&cli_config)?;
                let request = FilterRequest {
                    query,
                    timestamp_start,
                    timestamp_end,
                    id_start,
                    id_end,
                    ..FilterRequest::default()
                };
                println!("{}", app.translate(&request)?);
                Ok(())
            }
            Some(Commands::ValidateField {
                name,
                field_type,
                data_type,
                index_type,
            }) => {
                Self::validate_field(&FieldUpdate {
                    name,
                    field_type,
                    data_type,
                    index_type,
                })?;
                println!("ok");
                Ok(())
            }
            Some(Commands::Serve) | None => {
                let app = Self::init(&cli_config)?;
                app.start_server().await
            }
        }
    }

    fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        Ok(Self { config })
    }

    /// WHERE clause body for `request` against the configured schema
    pub fn translate(&self, request: &FilterRequest) -> Result<String> {
        let schema = self.config.logs.schema();
        check_query_length(&request.query, self.config.logs.max_query_length)
            .and_then(|()| build_where_clause(&schema, request))
            .with_context(|| format!("Failed to translate query '{}'", request.query))
    }

    fn validate_field(field: &FieldUpdate) -> Result<()> {
        validate_field_definition(field).with_context(|| format!("Invalid field '{}'", field.name))
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(self) -> Result<()> {
        ApiServer::new(self.config).start().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::logs::LogQueryError;

    fn app() -> CoreApp {
        CoreApp {
            config: AppConfig::from_layers(Default::default(), &CliConfig::default()).unwrap(),
        }
    }

    #[test]
    fn test_translate() {
        let request = FilterRequest {
            query: "trace_id in ('abc')".to_string(),
            timestamp_end: Some(9),
            ..FilterRequest::default()
        };
        assert_eq!(
            app().translate(&request).unwrap(),
            "static_string_value[indexOf(static_string_key, 'trace_id')] IN ('abc') \
             and timestamp <= '9' "
        );
    }

    #[test]
    fn test_translate_respects_max_query_length() {
        let mut app = app();
        app.config.logs.max_query_length = 8;
        let request = FilterRequest {
            query: "trace_id in ('abc')".to_string(),
            ..FilterRequest::default()
        };
        let err = app.translate(&request).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LogQueryError>(),
            Some(&LogQueryError::QueryTooLong { len: 19, max: 8 })
        );
    }

    #[test]
    fn test_error_report_includes_cause() {
        let request = FilterRequest {
            query: "foo gt 1".to_string(),
            ..FilterRequest::default()
        };
        let err = app().translate(&request).unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "Failed to translate query 'foo gt 1': field not found for filtering"
        );

        let err = CoreApp::validate_field(&FieldUpdate {
            name: "x".to_string(),
            field_type: "bogus".to_string(),
            data_type: "String".to_string(),
            index_type: None,
        })
        .unwrap_err();
        assert_eq!(format!("{err:#}"), "Invalid field 'x': type bogus not supported");
    }

    #[test]
    fn test_translate_error_keeps_cause() {
        let request = FilterRequest {
            query: "nope gt 1".to_string(),
            ..FilterRequest::default()
        };
        let err = app().translate(&request).unwrap_err();
        assert_eq!(
            err.downcast_ref::<LogQueryError>(),
            Some(&LogQueryError::unresolvable("nope"))
        );
    }
}
