//! XDG Base Directory support for daybreak.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "daybreak";

/// Overrides the config directory, mostly for scripted runs.
pub const CONFIG_DIR_ENV: &str = "DAYBREAK_CONFIG_DIR";

#[derive(Debug, Clone, Copy)]
enum DirKind {
    Config,
    Data,
}

impl DirKind {
    fn base(self) -> Option<PathBuf> {
        match self {
            DirKind::Config => dirs::config_dir(),
            DirKind::Data => dirs::data_dir(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            DirKind::Config => "config",
            DirKind::Data => "data",
        }
    }
}

fn app_dir(kind: DirKind) -> Result<PathBuf> {
    kind.base()
        .map(|p| p.join(APP_NAME))
        .with_context(|| format!("Failed to determine {} directory", kind.label()))
}

/// Configuration directory.
///
/// `$DAYBREAK_CONFIG_DIR` when set, otherwise `$XDG_CONFIG_HOME/daybreak`
/// or `~/.config/daybreak`.
pub fn get_config_dir() -> Result<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => app_dir(DirKind::Config),
    }
}

/// `$XDG_DATA_HOME/daybreak` or `~/.local/share/daybreak`.
pub fn get_data_dir() -> Result<PathBuf> {
    app_dir(DirKind::Data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_dirs_end_with_app_name() {
        for kind in [DirKind::Config, DirKind::Data] {
            if let Ok(dir) = app_dir(kind) {
                assert!(dir.ends_with(APP_NAME), "{} dir", kind.label());
            }
        }
    }

    #[test]
    fn test_config_and_data_differ() {
        if let (Ok(config), Ok(data)) = (app_dir(DirKind::Config), get_data_dir()) {
            assert_ne!(config, data);
        }
    }
}
