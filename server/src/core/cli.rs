use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{
    ENV_CONFIG, ENV_HOST, ENV_LOGS_MAX_QUERY_LENGTH, ENV_LOGS_TABLE, ENV_PORT,
};

#[derive(Parser)]
#[command(name = "loglens")]
#[command(version, about = "Log filter query service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Log table used for listing queries
    #[arg(long, global = true, env = ENV_LOGS_TABLE)]
    pub logs_table: Option<String>,

    /// Maximum filter query length in bytes
    #[arg(long, global = true, env = ENV_LOGS_MAX_QUERY_LENGTH)]
    pub max_query_length: Option<usize>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Serve,
    /// Print the WHERE clause for a filter query
    Translate {
        /// Filter query, e.g. "status gt 400 and fulltext contains 'timeout'"
        query: String,
        #[arg(long)]
        timestamp_start: Option<u64>,
        #[arg(long)]
        timestamp_end: Option<u64>,
        #[arg(long)]
        id_start: Option<String>,
        #[arg(long)]
        id_end: Option<String>,
    },
    /// Check a field definition before registering it
    ValidateField {
        #[arg(long)]
        name: String,
        /// Field type: static, attributes, or resources
        #[arg(long = "type")]
        field_type: String,
        #[arg(long)]
        data_type: String,
        /// Skip index, e.g. bloom_filter(0.01)
        #[arg(long)]
        index_type: Option<String>,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub logs_table: Option<String>,
    pub max_query_length: Option<usize>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        host: cli.host,
        port: cli.port,
        config: cli.config,
        logs_table: cli.logs_table,
        max_query_length: cli.max_query_length,
    };
    (config, cli.command)
}
