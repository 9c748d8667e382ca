//! Configuration structures for daybreak settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Theme stage settings
    #[serde(default)]
    pub theme: ThemeSettings,

    /// Render sink settings
    #[serde(default)]
    pub render: RenderSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Theme stage settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeSettings {
    /// Stage list TOML file; built-in stages when unset
    #[serde(default)]
    pub stages_file: Option<String>,

    /// Stage forced at startup
    #[serde(default)]
    pub initial: Option<String>,
}

/// Render sink settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Prefix of the emitted CSS custom properties
    #[serde(default = "default_variable_prefix")]
    pub variable_prefix: String,

    /// Render after every scroll sample instead of only on theme changes
    #[serde(default = "default_continuous")]
    pub continuous: bool,

    /// Emit the rounded scroll percentage
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Entries kept in memory
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

// Default value functions for serde
fn default_variable_prefix() -> String {
    defaults::VARIABLE_PREFIX.to_string()
}

fn default_continuous() -> bool {
    defaults::CONTINUOUS
}

fn default_show_progress() -> bool {
    defaults::SHOW_PROGRESS
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

fn default_max_entries() -> usize {
    defaults::MAX_LOG_ENTRIES
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            variable_prefix: default_variable_prefix(),
            continuous: default_continuous(),
            show_progress: default_show_progress(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
            max_entries: default_max_entries(),
        }
    }
}
