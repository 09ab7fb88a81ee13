//! CLI command definitions and dispatch.

pub mod config;
pub mod media;
pub mod migrate;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use inkwell_core::config::{AppConfig, DatabaseProvider};
use inkwell_core::error::AppError;
use inkwell_database::{DatabasePool, MemoryStore, Stores};

/// Inkwell maintenance tools
#[derive(Debug, Parser)]
#[command(name = "inkwell", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Media file maintenance
    Media(media::MediaArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Media(args) => media::execute(args, &self.config, self.format).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file, overlaid with `INKWELL_ENV`.
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("INKWELL_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(config_path, &env)
}

/// Helper: connect to PostgreSQL.
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

/// Helper: stores for the configured backend.
pub async fn create_stores(config: &AppConfig) -> Result<Stores, AppError> {
    match config.database.provider {
        DatabaseProvider::Postgres => {
            let pool = create_db_pool(config).await?;
            Ok(Stores::postgres(pool.into_pool()))
        }
        DatabaseProvider::Memory => Ok(Stores::memory(MemoryStore::new())),
    }
}
