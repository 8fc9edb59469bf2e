//! Board server binary for the Game of Life service.
//!
//! Loads configuration, picks the board store, and serves the HTTP API
//! until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `life-config.yaml` (or `$LIFE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the board store (in-memory, or `PostgreSQL` plus migrations)
//! 4. Serve the HTTP API with graceful shutdown
//! 5. Close the database pool

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use life_api::AppState;
use life_core::config::{LifeConfig, LoggingConfig, StorageBackend};
use life_core::{BoardRepository, InMemoryBoardRepository};
use life_db::{PostgresConfig, PostgresPool};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ServerError;

/// Config file used when `LIFE_CONFIG` is not set.
const DEFAULT_CONFIG_PATH: &str = "life-config.yaml";

/// Application entry point for the board server.
///
/// # Errors
///
/// Returns an error if configuration, storage setup, or the HTTP server
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config_path = config_path(std::env::var("LIFE_CONFIG").ok());
    let config = load_config(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!(
        config_path = %config_path.display(),
        host = config.server.host,
        port = config.server.port,
        backend = ?config.storage.backend,
        default_max_generations = config.simulation.default_max_generations,
        max_steps = config.simulation.max_steps,
        "life-server starting"
    );

    // 3-5. Build storage and serve.
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory board store");
            serve(&config, Arc::new(InMemoryBoardRepository::new())).await?;
        }
        StorageBackend::Postgres => {
            let pool = PostgresPool::connect(&PostgresConfig::from(&config.storage))
                .await
                .map_err(ServerError::from)?;
            pool.run_migrations().await.map_err(ServerError::from)?;

            let result = serve(&config, Arc::new(pool.board_store())).await;
            pool.close().await;
            result?;
        }
    }

    info!("life-server stopped");
    Ok(())
}

/// Serve the HTTP API over the given board store until shutdown.
async fn serve<R: BoardRepository + 'static>(
    config: &LifeConfig,
    repository: Arc<R>,
) -> Result<(), ServerError> {
    let state = Arc::new(AppState::new(repository, config.simulation));
    life_api::start_server(&config.server, state).await?;
    Ok(())
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Resolve the config file path from the `LIFE_CONFIG` value.
fn config_path(override_path: Option<String>) -> PathBuf {
    override_path
        .filter(|p| !p.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load configuration, falling back to defaults if the file is absent.
///
/// Environment overrides apply in both cases.
fn load_config(path: &Path) -> Result<LifeConfig, ServerError> {
    if path.exists() {
        Ok(LifeConfig::from_file(path)?)
    } else {
        let mut config = LifeConfig::default();
        config.apply_env_overrides();
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn config_path_defaults_when_unset_or_empty() {
        assert_eq!(config_path(None), PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(
            config_path(Some(String::new())),
            PathBuf::from(DEFAULT_CONFIG_PATH)
        );
        assert_eq!(
            config_path(Some(String::from("/etc/life.yaml"))),
            PathBuf::from("/etc/life.yaml")
        );
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let config = load_config(Path::new("/nonexistent/life-config.yaml")).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.simulation.default_max_generations, 100);
    }
}
