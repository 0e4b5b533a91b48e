//! Application setup and initialization
//!
//! Everything between reading the configuration and serving the first
//! request: telemetry, the database pool, storage, state and routes.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use audiogate_core::Config;
use audiogate_db::{PgAudioRepository, PgUserDirectory};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;
    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(
        config,
        Arc::new(PgUserDirectory::new(pool.clone())),
        Arc::new(PgAudioRepository::new(pool)),
        storage,
    ));

    let router = routes::build_router(state.clone());

    Ok((state, router))
}
