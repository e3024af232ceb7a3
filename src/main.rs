//! Entry point for Inklift.
//!
//! Responsibilities here are intentionally minimal:
//! - Initialize logging.
//! - Load user configuration from `conf/config.toml`.
//! - Rehydrate the persisted history and theme records.
//! - Launch the GUI application.

mod app;
mod cancellation;
mod config;
mod history;
mod ocr;
mod storage;
mod theme;

use crate::app::run_app;
use crate::config::load_config;
use crate::history::HistoryStore;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let config = load_config(Path::new("conf/config.toml"));
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        api = %config.api_base_url,
        level = %config.log_level,
        "Starting Inklift"
    );

    let history = HistoryStore::from_items(storage::load_history());
    let theme = storage::load_theme();
    info!(
        entries = history.len(),
        dark = theme.is_dark(),
        "Restored persisted state"
    );

    run_app(config, history, theme).context("Failed to start the GUI")?;
    Ok(())
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
