// SPDX-License-Identifier: MPL-2.0
//! This module handles the provider configuration, including loading and saving
//! it to a `settings.toml` file.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Set the `SNACKMATE_CONFIG_DIR` environment variable
//! 3. Falls back to the platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use snackmate::config::{self, Config};
//! use snackmate::snack::Position;
//!
//! let (mut config, _warning) = config::load();
//! config.default_position = Position::TopCenter;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::error::Result;
use crate::snack::Position;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use defaults::{
    DEFAULT_DURATION_MS, DEFAULT_MAX_SNACKS, DEFAULT_POSITION, MAX_DURATION_MS, MAX_MAX_SNACKS,
    MIN_MAX_SNACKS,
};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "SnackMate";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "SNACKMATE_CONFIG_DIR";

/// Provider-wide defaults, fixed for the lifetime of a mounted provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Anchor used when a snack does not specify one.
    pub default_position: Position,
    /// Auto-dismiss delay when a snack does not specify one. `0` disables it.
    pub default_duration_ms: u64,
    /// Maximum snacks kept at once; the oldest are evicted first.
    pub max_snacks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_position: DEFAULT_POSITION,
            default_duration_ms: DEFAULT_DURATION_MS,
            max_snacks: DEFAULT_MAX_SNACKS,
        }
    }
}

impl Config {
    #[must_use]
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    /// Clamps every value into its supported range.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let max_snacks = self.max_snacks.clamp(MIN_MAX_SNACKS, MAX_MAX_SNACKS);
        if max_snacks != self.max_snacks {
            tracing::warn!(
                requested = self.max_snacks,
                clamped = max_snacks,
                "max_snacks out of range"
            );
            self.max_snacks = max_snacks;
        }

        if self.default_duration_ms > MAX_DURATION_MS {
            tracing::warn!(
                requested = self.default_duration_ms,
                clamped = MAX_DURATION_MS,
                "default_duration_ms out of range"
            );
            self.default_duration_ms = MAX_DURATION_MS;
        }

        self
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional directory override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    base_dir
        .or_else(|| std::env::var_os(ENV_CONFIG_DIR).map(PathBuf::from))
        .or_else(|| {
            dirs::config_dir().map(|mut path| {
                path.push(APP_NAME);
                path
            })
        })
        .map(|mut path| {
            path.push(CONFIG_FILE);
            path
        })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// the default config with a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    let warning = format!("failed to load {}: {err}", path.display());
                    tracing::warn!("{warning}; using defaults");
                    return (Config::default(), Some(warning));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path. Values are clamped into range.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    tracing::info!(path = %path.display(), "configuration loaded");
    Ok(config.sanitized())
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    tracing::info!(path = %path.display(), "configuration saved");
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
