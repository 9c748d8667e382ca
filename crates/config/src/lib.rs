//! Configuration management for daybreak.
//!
//! Loads and saves TOML configuration following XDG directory conventions.

mod settings;
mod xdg;

pub use settings::{Config, LoggingSettings, RenderSettings, ThemeSettings};
pub use xdg::{get_config_dir, get_data_dir, CONFIG_DIR_ENV};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const VARIABLE_PREFIX: &str = "--theme-";
    pub const CONTINUOUS: bool = false;
    pub const SHOW_PROGRESS: bool = true;
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const MAX_LOG_ENTRIES: usize = 1000;
}

impl Config {
    /// Load configuration from the XDG config file.
    ///
    /// On first run, creates the file with default values.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path`.
    ///
    /// Creates the file with defaults if it does not exist, and rewrites it
    /// when missing keys were filled in with defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let original_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::validate_content(&original_content)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        // Serialize back to get normalized content
        let normalized_content = toml::to_string_pretty(&config)?;
        if original_content != normalized_content {
            config.save_to(path)?;
        }

        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }

    /// Stage file path, with relative paths resolved against the config dir.
    pub fn stages_file_path(&self) -> Option<PathBuf> {
        let file = PathBuf::from(self.theme.stages_file.as_ref()?);
        if file.is_absolute() {
            return Some(file);
        }
        match get_config_dir() {
            Ok(dir) => Some(dir.join(file)),
            Err(_) => Some(file),
        }
    }
}
