//! Inkwell server: wires the crates together and starts the HTTP API.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use inkwell_core::config::{AppConfig, DatabaseProvider, LogFormat};
use inkwell_core::traits::storage::StorageProvider;
use inkwell_database::{DatabasePool, MemoryStore, Stores};
use inkwell_media::LocalStorageProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_configuration().context("Failed to load configuration")?;

    init_logging(&config);

    run(config).await
}

/// Load configuration from file and environment
fn load_configuration() -> anyhow::Result<AppConfig> {
    let config_path =
        std::env::var("INKWELL_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("INKWELL_ENV").unwrap_or_else(|_| "development".to_string());

    Ok(AppConfig::load(&config_path, &env)?)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Connect the backends and serve until shutdown.
async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Inkwell v{}", env!("CARGO_PKG_VERSION"));

    let stores = match config.database.provider {
        DatabaseProvider::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = DatabasePool::connect(&config.database)
                .await
                .context("Database connection failed")?;

            tracing::info!("Running database migrations...");
            inkwell_database::migration::run_migrations(pool.pool())
                .await
                .context("Migration failed")?;

            Stores::postgres(pool.into_pool())
        }
        DatabaseProvider::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on restart");
            Stores::memory(MemoryStore::new())
        }
    };

    let storage: Arc<dyn StorageProvider> = Arc::new(
        LocalStorageProvider::new(&config.media.root)
            .await
            .context("Media root initialization failed")?,
    );
    tracing::info!(root = %config.media.root, "Media storage ready");

    let server_config = config.server.clone();
    let state = inkwell_api::AppState::new(config, stores, storage);
    let app = inkwell_api::build_app(state);

    inkwell_api::serve(app, &server_config)
        .await
        .context("Server error")?;

    tracing::info!("Inkwell stopped");
    Ok(())
}
