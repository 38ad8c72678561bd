use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::logs::{FieldDefinition, FieldUpdate, SchemaSnapshot};

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_LOGS_TABLE, DEFAULT_MAX_QUERY_LENGTH,
    DEFAULT_PORT,
};

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Server configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Logs configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LogsFileConfig {
    pub table: Option<String>,
    pub max_query_length: Option<usize>,
    /// Tenant fields stored as physical columns
    pub selected: Option<Vec<FieldUpdate>>,
    /// Tenant fields stored in attribute/resource key-value arrays
    pub interesting: Option<Vec<FieldUpdate>>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub logs: Option<LogsFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                tracing::trace!(host = ?server.host, "Merging server.host");
                current.host = server.host;
            }
            if server.port.is_some() {
                tracing::trace!(port = ?server.port, "Merging server.port");
                current.port = server.port;
            }
        }

        if let Some(logs) = other.logs {
            let current = self.logs.get_or_insert_with(LogsFileConfig::default);
            if logs.table.is_some() {
                tracing::trace!(table = ?logs.table, "Merging logs.table");
                current.table = logs.table;
            }
            if logs.max_query_length.is_some() {
                tracing::trace!(max_query_length = ?logs.max_query_length, "Merging logs.max_query_length");
                current.max_query_length = logs.max_query_length;
            }
            // Field lists replace rather than append
            if logs.selected.is_some() {
                current.selected = logs.selected;
            }
            if logs.interesting.is_some() {
                current.interesting = logs.interesting;
            }
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Log query configuration
#[derive(Debug, Clone)]
pub struct LogsConfig {
    pub table: String,
    pub max_query_length: usize,
    pub selected: Vec<FieldDefinition>,
    pub interesting: Vec<FieldDefinition>,
}

impl LogsConfig {
    /// Static catalogs extended with the configured tenant fields
    pub fn schema(&self) -> SchemaSnapshot {
        let mut schema = SchemaSnapshot::with_static_fields();
        schema.extend(self.selected.iter().cloned(), self.interesting.iter().cloned());
        schema
    }
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logs: LogsConfig,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.loglens/loglens.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        // 1. Load from profile dir (~/.loglens/loglens.json) - skip if not exists
        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        // 2. Load from CLI-specified path OR local directory
        let overlay_path = if let Some(ref path) = cli.config {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.clone())
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        Self::from_layers(file_config, cli)
    }

    /// Layer configs: defaults -> file config -> CLI/env overrides
    pub(crate) fn from_layers(file_config: FileConfig, cli: &CliConfig) -> Result<Self> {
        let file_server = file_config.server.unwrap_or_default();
        let file_logs = file_config.logs.unwrap_or_default();

        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        let table = cli
            .logs_table
            .clone()
            .or(file_logs.table)
            .unwrap_or_else(|| DEFAULT_LOGS_TABLE.to_string());
        let max_query_length = cli
            .max_query_length
            .or(file_logs.max_query_length)
            .unwrap_or(DEFAULT_MAX_QUERY_LENGTH);

        let selected = admit_fields(file_logs.selected.unwrap_or_default(), "selected")?;
        let interesting = admit_fields(file_logs.interesting.unwrap_or_default(), "interesting")?;

        tracing::debug!(
            %host,
            port,
            %table,
            max_query_length,
            selected = selected.len(),
            interesting = interesting.len(),
            "Configuration resolved"
        );

        Ok(Self {
            server: ServerConfig { host, port },
            logs: LogsConfig {
                table,
                max_query_length,
                selected,
                interesting,
            },
        })
    }
}

/// Validate configured fields before they enter the schema
fn admit_fields(fields: Vec<FieldUpdate>, group: &str) -> Result<Vec<FieldDefinition>> {
    fields
        .into_iter()
        .map(|field| {
            let name = field.name.clone();
            FieldDefinition::try_from(field)
                .with_context(|| format!("Invalid {group} field '{name}' in config"))
        })
        .collect()
}

/// Get profile config path (~/.loglens/loglens.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}
