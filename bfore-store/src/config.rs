//! Configuration management.

use crate::error::StoreError;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API access settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Windowed sampling settings.
    #[serde(default)]
    pub sample: SampleConfig,
}

/// API access settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// HTTP transport timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Windowed sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Window width in minutes.
    #[serde(default = "default_window_minutes")]
    pub window_minutes: i64,
    /// Cap on in-flight window requests; 0 means one per window.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_base_url() -> String {
    "https://api.bfore.ai".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_window_minutes() -> i64 {
    30
}

fn default_max_concurrency() -> usize {
    8
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            window_minutes: default_window_minutes(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    ///
    /// - Linux: `~/.config/bfore/config.json`
    /// - macOS: `~/Library/Application Support/bfore/config.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bfore")
            .join("config.json")
    }

    /// Loads configuration from a specific path. A missing file yields
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON or
    /// holds invalid values.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to a specific path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] for an empty base URL, a zero timeout
    /// or a window width that is not positive or does not fit a duration.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.api.base_url.trim().is_empty() {
            return Err(StoreError::Config("api.base_url must not be empty".to_string()));
        }
        if self.api.timeout_secs == 0 {
            return Err(StoreError::Config("api.timeout_secs must be positive".to_string()));
        }
        if self.sample.window_minutes <= 0 {
            return Err(StoreError::Config(format!(
                "sample.window_minutes must be positive, got {}",
                self.sample.window_minutes
            )));
        }
        if TimeDelta::try_minutes(self.sample.window_minutes).is_none() {
            return Err(StoreError::Config(format!(
                "sample.window_minutes is out of range, got {}",
                self.sample.window_minutes
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
