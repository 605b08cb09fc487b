//! Library Catalog Client - Main Entry Point
//!
//! Loads the configuration, fetches the first page of the library listing
//! together with its count, and logs what the store holds afterwards.

use anyhow::Result;
use library_catalog::constants::{DEFAULT_SORT_FIELD, DEFAULT_SORT_ORDER, LOG_FILE_PREFIX};
use library_catalog::domain::{AppConfig, ListingParams, LogConfig};
use library_catalog::helpers::{ensure_dir, resolve_config_path};
use library_catalog::services::{CatalogStore, block_on};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::prelude::*;

fn main() -> Result<()> {
    let config_path = resolve_config_path()?;
    let config = AppConfig::load(&config_path)?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _guard = init_tracing(&config.log)?;

    tracing::info!("Starting library catalog client...");
    tracing::info!("Config: {}", config_path.display());

    let store = CatalogStore::from_config(&config)?;
    let params = ListingParams::new(
        config.library.category.clone(),
        0,
        DEFAULT_SORT_FIELD,
        DEFAULT_SORT_ORDER,
    );

    block_on(store.refresh(&params));
    let state = block_on(store.snapshot());

    if !state.is_loaded {
        tracing::warn!("Nothing loaded from {}", config.api.base_url);
        return Ok(());
    }

    match state.total() {
        Some(total) => tracing::info!("{} products in {}", total, store.library_category()),
        None => tracing::info!("No count reported for {}", store.library_category()),
    }
    for product in &state.items {
        tracing::info!("  {}", product.display_title());
    }
    if state.has_more_items() {
        tracing::info!("  ... more pages available");
    }

    Ok(())
}

/// Stderr logging, plus a daily rolling file when a log directory is set
fn init_tracing(log: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log.level))?;
    let timer = LocalTime::rfc_3339();
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_timer(timer.clone())
        .with_writer(std::io::stderr);

    let Some(dir) = &log.directory else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    ensure_dir(dir)?;
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(writer),
        )
        .init();

    Ok(Some(guard))
}
