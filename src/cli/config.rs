//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::backend::SyncOptions;
use crate::export::DEFAULT_EXPORT_TIMEOUT;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Seconds to wait for each export call
    pub timeout: Option<u64>,

    /// Seconds to wait for a sync to finish
    pub sync_timeout: Option<u64>,

    /// Seconds between sync progress checks
    pub sync_delay: Option<u64>,

    /// Path to the osascript executable
    pub osascript: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/exporteer/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("exporteer")
            .join("config.toml")
    }

    /// Resolve the export timeout, with CLI argument taking precedence.
    pub fn export_timeout(&self, cli_timeout: Option<u64>) -> Duration {
        cli_timeout
            .or(self.timeout)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_EXPORT_TIMEOUT)
    }

    /// Resolve sync polling options, with CLI arguments taking precedence.
    pub fn sync_options(&self, cli_timeout: Option<u64>, cli_delay: Option<u64>) -> SyncOptions {
        let defaults = SyncOptions::default();
        SyncOptions {
            timeout: cli_timeout
                .or(self.sync_timeout)
                .map_or(defaults.timeout, Duration::from_secs),
            delay: cli_delay
                .or(self.sync_delay)
                .map_or(defaults.delay, Duration::from_secs),
        }
    }

    /// Resolve the osascript executable, falling back to `osascript` on `PATH`.
    pub fn osascript(&self) -> PathBuf {
        self.osascript
            .clone()
            .unwrap_or_else(|| PathBuf::from("osascript"))
    }
}
