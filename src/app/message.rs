// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo application.

use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::snack::{Position, Severity};
use crate::ui::toaster;
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Show a snack with the configured defaults.
    Show(Severity),
    /// Show an error that never auto-dismisses.
    ShowSticky,
    /// Show one snack at every anchor.
    ShowEverywhere,
    /// Programmatically remove the oldest snack.
    RemoveOldest,
    ClearAll,
    ToggleTheme,
    Toaster(toaster::Message),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Flags {
    /// Overrides `default_position`.
    pub position: Option<Position>,
    /// Overrides `default_duration_ms`.
    pub duration_ms: Option<u64>,
    /// Overrides `max_snacks`.
    pub max_snacks: Option<usize>,
    /// Explicit `settings.toml` path instead of the platform config dir.
    pub config_path: Option<PathBuf>,
    /// Tracing filter directive.
    pub log_filter: Option<String>,
}

impl Flags {
    /// Parses `--position`, `--duration`, `--max`, `--config` and `--log`.
    pub fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        let flags = Self {
            position: args
                .opt_value_from_str("--position")
                .map_err(|err| invalid("--position", err))?,
            duration_ms: args
                .opt_value_from_str("--duration")
                .map_err(|err| invalid("--duration", err))?,
            max_snacks: args
                .opt_value_from_str("--max")
                .map_err(|err| invalid("--max", err))?,
            config_path: args
                .opt_value_from_os_str("--config", |s| Ok::<_, String>(PathBuf::from(s)))
                .map_err(|err| invalid("--config", err))?,
            log_filter: args
                .opt_value_from_str("--log")
                .map_err(|err| invalid("--log", err))?,
        };

        let rest = args.finish();
        if let Some(unexpected) = rest.first() {
            return Err(Error::InvalidArgument {
                flag: "arguments",
                message: format!("unexpected argument {}", unexpected.to_string_lossy()),
            });
        }

        Ok(flags)
    }

    /// Loads the configuration file and applies command-line overrides.
    #[must_use]
    pub fn resolve_config(&self) -> Config {
        let mut config = match &self.config_path {
            Some(path) if path.exists() => config::load_from_path(path).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "using default configuration");
                Config::default()
            }),
            Some(_) => Config::default(),
            None => config::load().0,
        };

        if let Some(position) = self.position {
            config.default_position = position;
        }
        if let Some(duration_ms) = self.duration_ms {
            config.default_duration_ms = duration_ms;
        }
        if let Some(max_snacks) = self.max_snacks {
            config.max_snacks = max_snacks;
        }

        config.sanitized()
    }
}

fn invalid(flag: &'static str, err: pico_args::Error) -> Error {
    Error::InvalidArgument {
        flag,
        message: err.to_string(),
    }
}
