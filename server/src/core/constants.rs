// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "LogLens";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "loglens";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".loglens";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "loglens.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "LOGLENS_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "LOGLENS_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "LOGLENS_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "LOGLENS_LOG";

// =============================================================================
// Environment Variables - Logs
// =============================================================================

/// Environment variable for the log table queried by listing requests
pub const ENV_LOGS_TABLE: &str = "LOGLENS_LOGS_TABLE";

/// Environment variable for the maximum filter query length
pub const ENV_LOGS_MAX_QUERY_LENGTH: &str = "LOGLENS_LOGS_MAX_QUERY_LENGTH";

// =============================================================================
// Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5390;

/// Default log table
pub const DEFAULT_LOGS_TABLE: &str = "logs";

/// Default maximum filter query length in bytes
pub const DEFAULT_MAX_QUERY_LENGTH: usize = 4096;

/// Request body limit for field validation (64KB)
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;
