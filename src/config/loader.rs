//! Settings file and app-data loading with precedence handling.

use super::AppData;
use crate::model::ScreenSizeCategory;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV_VAR: &str = "SERP_VIEW_CONFIG";

/// Environment variable overriding the initial screen size.
pub const SCREEN_ENV_VAR: &str = "SERP_VIEW_SCREEN";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read settings file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Settings file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Failed to read the app-data file.
    #[error("Failed to read app-data at {path}: {reason}")]
    AppDataRead {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// App-data is not a JSON object of the expected shape.
    #[error("Invalid app-data: {reason}")]
    AppDataParse {
        /// Source file, when parsed from disk.
        path: Option<PathBuf>,
        /// Parse error details.
        reason: String,
    },

    /// Unknown configuration category name.
    #[error("Unknown configuration category '{0}' (expected facets, features or metadata)")]
    UnknownCategory(String),
}

/// TOML settings file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/serp-view/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Screen size category at session start.
    #[serde(default)]
    pub initial_screen: Option<ScreenSizeCategory>,

    /// Path to a JSON app-data file supplying configuration overrides.
    #[serde(default)]
    pub app_data_path: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved settings after applying precedence rules.
///
/// Created by merging defaults, settings file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Screen size category at session start.
    pub initial_screen: ScreenSizeCategory,
    /// App-data file, if any.
    pub app_data_path: Option<PathBuf>,
    /// Log file path.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            initial_screen: ScreenSizeCategory::Lg,
            app_data_path: None,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/serp-view/serp-view.log` on Unix-like systems.
/// If the state directory cannot be determined, falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("serp-view").join("serp-view.log")
    } else {
        PathBuf::from("serp-view.log")
    }
}

/// Resolve default settings file path.
///
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("serp-view").join("config.toml"))
}

/// Load a settings file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if the file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load settings with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SERP_VIEW_CONFIG` environment variable
/// 3. Default path `~/.config/serp-view/config.toml`
///
/// # Errors
///
/// Returns error only if a settings file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge a settings file into defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        initial_screen: config.initial_screen.unwrap_or(defaults.initial_screen),
        app_data_path: config.app_data_path.or(defaults.app_data_path),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides.
///
/// Checks `SERP_VIEW_SCREEN`. An unparseable value is ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(SCREEN_ENV_VAR) {
        match raw.parse() {
            Ok(screen) => config.initial_screen = screen,
            Err(e) => tracing::warn!(error = %e, "Ignoring {}", SCREEN_ENV_VAR),
        }
    }

    config
}

/// Apply CLI argument overrides (highest precedence).
///
/// Only flags that were explicitly set override.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    screen_override: Option<ScreenSizeCategory>,
    app_data_override: Option<PathBuf>,
) -> ResolvedConfig {
    if let Some(screen) = screen_override {
        config.initial_screen = screen;
    }

    if let Some(path) = app_data_override {
        config.app_data_path = Some(path);
    }

    config
}

/// Load app-data from a JSON file.
///
/// Unlike the settings file, a missing app-data file is an error: the path
/// was asked for explicitly.
///
/// # Errors
///
/// Returns [`ConfigError::AppDataRead`] or [`ConfigError::AppDataParse`].
pub fn load_app_data(path: impl Into<PathBuf>) -> Result<AppData, ConfigError> {
    let path = path.into();

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::AppDataRead {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&contents).map_err(|e| ConfigError::AppDataParse {
        path: Some(path),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
