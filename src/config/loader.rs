//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::EngineTuning;
use crate::model::ViewConfiguration;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A `[tuning]` value is outside its meaningful range.
    #[error("Invalid tuning in {path}: {reason}")]
    InvalidTuning {
        /// Path of the offending file.
        path: PathBuf,
        /// Which value and why.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/pageturn/config.toml`:
///
/// ```toml
/// log_file_path = "/tmp/pageturn.log"
///
/// [view]
/// scrolled = true
/// continuousScroll = true
/// scrollingOverlap = 16
///
/// [tuning]
/// swipe_min_distance_px = 80
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Reader view settings. Missing keys keep their defaults.
    #[serde(default)]
    pub view: Option<ViewConfiguration>,

    /// Gesture and motion constants. Missing keys keep their defaults.
    #[serde(default)]
    pub tuning: Option<EngineTuning>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Initial view settings for the reading surface.
    pub view: ViewConfiguration,
    /// Gesture and motion constants.
    pub tuning: EngineTuning,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            view: ViewConfiguration::default(),
            tuning: EngineTuning::default(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/pageturn/pageturn.log` on Linux, or the
/// platform's state directory elsewhere. Falls back to the current
/// directory when no state directory is known.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("pageturn").join("pageturn.log")
    } else {
        PathBuf::from("pageturn.log")
    }
}

/// Resolve default config file path.
///
/// Returns `~/.config/pageturn/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pageturn").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but cannot be read, is not valid TOML, or
/// carries a tuning value that would disable its gesture outright.
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

    if let Some(tuning) = &config.tuning {
        check_tuning(tuning).map_err(|reason| ConfigError::InvalidTuning {
            path: path.clone(),
            reason,
        })?;
    }

    Ok(Some(config))
}

fn check_tuning(tuning: &EngineTuning) -> Result<(), String> {
    let band = tuning.center_band_start..=tuning.center_band_end;
    if !(0.0..=1.0).contains(band.start()) || !(0.0..=1.0).contains(band.end()) {
        return Err("center band bounds must lie within 0.0..=1.0".to_string());
    }
    if band.start() > band.end() {
        return Err(format!(
            "center_band_start ({}) exceeds center_band_end ({})",
            band.start(),
            band.end()
        ));
    }
    if tuning.swipe_axis_ratio <= 0.0 {
        return Err("swipe_axis_ratio must be positive".to_string());
    }
    Ok(())
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PAGETURN_CONFIG` environment variable
/// 3. Default path `~/.config/pageturn/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be loaded.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("PAGETURN_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// Sections present in the file replace the defaults wholesale; keys missing
/// inside a section already took their defaults during deserialization.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        view: config.view.unwrap_or(defaults.view),
        tuning: config.tuning.unwrap_or(defaults.tuning),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PAGETURN_LOG`: Override log file path
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(log_path) = std::env::var("PAGETURN_LOG") {
        config.log_file_path = PathBuf::from(log_path);
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// Only flags the user actually passed are applied; `None` keeps the value
/// from the earlier stages.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    scrolled: Option<bool>,
    swap_click_area: Option<bool>,
    continuous_scroll: Option<bool>,
) -> ResolvedConfig {
    if let Some(scrolled) = scrolled {
        config.view.scrolled = scrolled;
    }

    if let Some(swap) = swap_click_area {
        config.view.swap_click_area = swap;
    }

    if let Some(continuous) = continuous_scroll {
        config.view.continuous_scroll = continuous;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
