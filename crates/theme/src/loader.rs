//! Stage list loading from TOML files.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::stage::{validate_stages, ThemeStage};

/// TOML stage file structure.
#[derive(Debug, Clone, Deserialize)]
struct TomlStages {
    #[serde(rename = "stage")]
    stages: Vec<ThemeStage>,
}

/// Load and validate a stage list from a TOML file.
pub fn load_stages(path: &Path) -> Result<Vec<ThemeStage>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read stage file {}", path.display()))?;
    load_stages_from_str(&content)
        .with_context(|| format!("Invalid stage file {}", path.display()))
}

/// Load and validate a stage list from TOML content.
pub fn load_stages_from_str(content: &str) -> Result<Vec<ThemeStage>> {
    let parsed: TomlStages = toml::from_str(content)?;
    validate_stages(&parsed.stages)?;
    Ok(parsed.stages)
}
