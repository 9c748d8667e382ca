//! Scroll-driven theme system for daybreak.
//!
//! Converts scroll progress into a named stage and a nine-slot palette,
//! cross-fading neighboring stages near their boundaries.

pub mod color;
mod engine;
mod loader;
mod palette;
mod stage;

pub use engine::{
    SharedThemeEngine, SubscriptionId, ThemeChange, ThemeEngine, ThemeSample, TRANSITION_OVERLAP,
};
pub use loader::{load_stages, load_stages_from_str};
pub use palette::{Palette, PaletteSlot};
pub use stage::{validate_stages, ThemeStage};

use std::sync::OnceLock;

// Embed the built-in stages at compile time
const DEFAULT_STAGES_TOML: &str = include_str!("../stages/default.toml");

static DEFAULT_STAGES: OnceLock<Vec<ThemeStage>> = OnceLock::new();

/// Single neutral stage used if the embedded stage file fails to load.
fn hardcoded_fallback_stages() -> Vec<ThemeStage> {
    vec![ThemeStage::new(
        "default",
        0.0,
        1.0,
        Palette {
            bg: "#ffffff".to_string(),
            bg_secondary: "#f8f8f8".to_string(),
            text: "#000000".to_string(),
            text_secondary: "#1a1a1a".to_string(),
            accent: "#d4af37".to_string(),
            accent_light: "#ecbb4f".to_string(),
            accent_dark: "#b8860b".to_string(),
            border: "#e0e0e0".to_string(),
            shadow: "rgba(0, 0, 0, 0.1)".to_string(),
        },
    )]
}

/// Built-in dawn, day, dusk and night stages.
pub fn default_stages() -> Vec<ThemeStage> {
    DEFAULT_STAGES
        .get_or_init(|| match load_stages_from_str(DEFAULT_STAGES_TOML) {
            Ok(stages) => stages,
            Err(e) => {
                daybreak_logger::error(format!(
                    "Failed to parse built-in stages: {:#}. Using fallback stage.",
                    e
                ));
                hardcoded_fallback_stages()
            }
        })
        .clone()
}
