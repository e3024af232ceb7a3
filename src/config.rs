//! Configuration loading for Inklift.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` if present. Any missing or invalid entries fall back to
//! sensible defaults so the UI can still launch.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable that overrides the configured OCR endpoint.
pub const API_URL_ENV: &str = "OCR_API_URL";

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_toast_secs")]
    pub toast_secs: f32,
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_base_url: default_api_base_url(),
            toast_secs: default_toast_secs(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            log_level: default_log_level(),
        }
    }
}

/// Load configuration from the given path, falling back to defaults on error.
/// The `OCR_API_URL` environment variable wins over the file.
pub fn load_config(path: &Path) -> AppConfig {
    let mut config = read_config(path);

    if let Ok(url) = env::var(API_URL_ENV) {
        let url = url.trim().trim_end_matches('/').to_string();
        if !url.is_empty() {
            info!(%url, "Overriding OCR endpoint from {API_URL_ENV}");
            config.api_base_url = url;
        }
    }

    config.toast_secs = config.toast_secs.clamp(1.0, 30.0);
    config.window_width = config.window_width.clamp(320.0, 7680.0);
    config.window_height = config.window_height.clamp(240.0, 4320.0);
    config
}

fn read_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err}");
            AppConfig::default()
        }
    }
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_toast_secs() -> f32 {
    3.5
}

fn default_window_width() -> f32 {
    1100.0
}

fn default_window_height() -> f32 {
    760.0
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").expect("empty config parses");
        assert_eq!(cfg.api_base_url, "http://127.0.0.1:8000");
        assert_eq!(cfg.log_level, LogLevel::Info);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg: AppConfig =
            toml::from_str("api_base_url = \"http://ocr.local:9000\"\nlog_level = \"warn\"")
                .expect("partial config parses");
        assert_eq!(cfg.api_base_url, "http://ocr.local:9000");
        assert_eq!(cfg.log_level, LogLevel::Warn);
        assert_eq!(cfg.toast_secs, default_toast_secs());
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let cfg = read_config(Path::new("/nonexistent/inklift/config.toml"));
        assert_eq!(cfg.api_base_url, default_api_base_url());
    }
}
