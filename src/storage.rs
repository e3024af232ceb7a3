//! Durable records for the history list and theme flag.
//!
//! Each lives as an independent JSON file under `.state/`. Reads fail soft:
//! absent or malformed data yields the empty/default value and never an
//! error surfaced to the user. Writes log and swallow errors to keep the UI
//! responsive.

use crate::history::HistoryItem;
use crate::theme::ThemeMode;
use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const STATE_DIR: &str = ".state";
const HISTORY_FILE: &str = "history.json";
const THEME_FILE: &str = "theme.json";

/// Serialized form of the theme record: a single flag.
#[derive(Debug, Serialize, Deserialize)]
struct ThemeRecord {
    dark: bool,
}

pub fn load_history() -> Vec<HistoryItem> {
    load_history_from(Path::new(STATE_DIR))
}

pub fn save_history(items: &[HistoryItem]) {
    save_history_in(Path::new(STATE_DIR), items);
}

pub fn load_theme() -> ThemeMode {
    load_theme_from(Path::new(STATE_DIR))
}

pub fn save_theme(mode: ThemeMode) {
    save_theme_in(Path::new(STATE_DIR), mode);
}

fn load_history_from(dir: &Path) -> Vec<HistoryItem> {
    let path = dir.join(HISTORY_FILE);
    let Ok(data) = fs::read_to_string(&path) else {
        debug!(path = %path.display(), "No persisted history");
        return Vec::new();
    };
    match serde_json::from_str(&data) {
        Ok(items) => items,
        Err(err) => {
            warn!(path = %path.display(), "Discarding malformed history: {err}");
            Vec::new()
        }
    }
}

fn save_history_in(dir: &Path, items: &[HistoryItem]) {
    let path = dir.join(HISTORY_FILE);
    if let Err(err) = write_json(&path, &items) {
        warn!(path = %path.display(), "Failed to persist history: {err:#}");
    }
}

fn load_theme_from(dir: &Path) -> ThemeMode {
    let path = dir.join(THEME_FILE);
    let record: Option<ThemeRecord> = fs::read_to_string(&path)
        .ok()
        .and_then(|data| serde_json::from_str(&data).ok());
    match record {
        Some(ThemeRecord { dark: true }) => ThemeMode::Night,
        Some(ThemeRecord { dark: false }) => ThemeMode::Day,
        None => ThemeMode::default(),
    }
}

fn save_theme_in(dir: &Path, mode: ThemeMode) {
    let path = dir.join(THEME_FILE);
    let record = ThemeRecord {
        dark: mode.is_dark(),
    };
    if let Err(err) = write_json(&path, &record) {
        warn!(path = %path.display(), "Failed to persist theme: {err:#}");
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let data = serde_json::to_string_pretty(value).context("serializing record")?;
    fs::write(path, data).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Write the given text to a timestamped file under `exports/`, returning
/// the path it landed at.
pub fn export_text(text: &str) -> Result<PathBuf> {
    let dir = PathBuf::from("exports");
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let name = format!("converted-{}.txt", Local::now().format("%Y%m%d-%H%M%S"));
    let path = dir.join(name);
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
