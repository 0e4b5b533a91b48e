//! Storage setup and initialization

use anyhow::{Context, Result};
use audiogate_core::Config;
use audiogate_storage::{create_storage, Storage};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config.storage())
        .await
        .context("Failed to initialize storage backend")?;

    tracing::info!(
        backend = %storage.backend_type(),
        "Storage initialized successfully"
    );

    Ok(storage)
}
