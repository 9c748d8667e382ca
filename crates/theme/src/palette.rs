//! Nine-slot theme palette.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::color::{blend_hex, blend_rgba, hex_to_rgb, parse_rgba};

/// Named color slot of a [`Palette`].
///
/// The split follows a 60/30/10 layout:
/// - `Bg*` - dominant (60%)
/// - `Text*` - secondary (30%)
/// - `Accent*` - accent (10%)
/// - `Border`, `Shadow` - supporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteSlot {
    Bg,
    BgSecondary,
    Text,
    TextSecondary,
    Accent,
    AccentLight,
    AccentDark,
    Border,
    Shadow,
}

impl PaletteSlot {
    /// All slots in declaration order.
    pub const ALL: [PaletteSlot; 9] = [
        PaletteSlot::Bg,
        PaletteSlot::BgSecondary,
        PaletteSlot::Text,
        PaletteSlot::TextSecondary,
        PaletteSlot::Accent,
        PaletteSlot::AccentLight,
        PaletteSlot::AccentDark,
        PaletteSlot::Border,
        PaletteSlot::Shadow,
    ];

    /// Key used in stage TOML files.
    pub fn key(self) -> &'static str {
        match self {
            PaletteSlot::Bg => "bg",
            PaletteSlot::BgSecondary => "bg_secondary",
            PaletteSlot::Text => "text",
            PaletteSlot::TextSecondary => "text_secondary",
            PaletteSlot::Accent => "accent",
            PaletteSlot::AccentLight => "accent_light",
            PaletteSlot::AccentDark => "accent_dark",
            PaletteSlot::Border => "border",
            PaletteSlot::Shadow => "shadow",
        }
    }

    /// Kebab-case name for CSS custom properties.
    pub fn css_name(self) -> &'static str {
        match self {
            PaletteSlot::Bg => "bg",
            PaletteSlot::BgSecondary => "bg-secondary",
            PaletteSlot::Text => "text",
            PaletteSlot::TextSecondary => "text-secondary",
            PaletteSlot::Accent => "accent",
            PaletteSlot::AccentLight => "accent-light",
            PaletteSlot::AccentDark => "accent-dark",
            PaletteSlot::Border => "border",
            PaletteSlot::Shadow => "shadow",
        }
    }

    /// Shadow is the only `rgba()` slot, everything else is `#rrggbb`.
    pub fn is_rgba(self) -> bool {
        self == PaletteSlot::Shadow
    }
}

/// Full set of colors for one theme stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    // === Dominant ===
    /// Page background
    pub bg: String,
    /// Cards, alternating sections
    pub bg_secondary: String,

    // === Secondary ===
    /// Body text
    pub text: String,
    /// Captions, muted text
    pub text_secondary: String,

    // === Accent ===
    /// Highlights, links
    pub accent: String,
    pub accent_light: String,
    pub accent_dark: String,

    // === Supporting ===
    pub border: String,
    /// `rgba()` drop shadow
    pub shadow: String,
}

impl Palette {
    /// Color stored in `slot`.
    pub fn get(&self, slot: PaletteSlot) -> &str {
        match slot {
            PaletteSlot::Bg => &self.bg,
            PaletteSlot::BgSecondary => &self.bg_secondary,
            PaletteSlot::Text => &self.text,
            PaletteSlot::TextSecondary => &self.text_secondary,
            PaletteSlot::Accent => &self.accent,
            PaletteSlot::AccentLight => &self.accent_light,
            PaletteSlot::AccentDark => &self.accent_dark,
            PaletteSlot::Border => &self.border,
            PaletteSlot::Shadow => &self.shadow,
        }
    }

    fn get_mut(&mut self, slot: PaletteSlot) -> &mut String {
        match slot {
            PaletteSlot::Bg => &mut self.bg,
            PaletteSlot::BgSecondary => &mut self.bg_secondary,
            PaletteSlot::Text => &mut self.text,
            PaletteSlot::TextSecondary => &mut self.text_secondary,
            PaletteSlot::Accent => &mut self.accent,
            PaletteSlot::AccentLight => &mut self.accent_light,
            PaletteSlot::AccentDark => &mut self.accent_dark,
            PaletteSlot::Border => &mut self.border,
            PaletteSlot::Shadow => &mut self.shadow,
        }
    }

    /// Iterate `(slot, color)` pairs in [`PaletteSlot::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (PaletteSlot, &str)> + '_ {
        PaletteSlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }

    /// Interpolate every slot toward `other`.
    ///
    /// Slots that fail to parse keep this palette's value.
    pub fn blend(&self, other: &Palette, ratio: f64) -> Palette {
        let mut blended = self.clone();
        for slot in PaletteSlot::ALL {
            let from = self.get(slot);
            let to = other.get(slot);
            *blended.get_mut(slot) = if slot.is_rgba() {
                blend_rgba(from, to, ratio)
            } else {
                blend_hex(from, to, ratio)
            };
        }
        blended
    }

    /// Check that every slot holds a color its blend function understands.
    pub fn validate(&self) -> Result<()> {
        for (slot, value) in self.iter() {
            let valid = if slot.is_rgba() {
                parse_rgba(value).is_some()
            } else {
                hex_to_rgb(value).is_some()
            };
            if !valid {
                bail!("invalid color '{}' in slot '{}'", value, slot.key());
            }
        }
        Ok(())
    }
}
