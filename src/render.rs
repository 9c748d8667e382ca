//! Render sink: writes palettes out as CSS custom properties.

use daybreak_config::RenderSettings;
use daybreak_theme::Palette;

#[derive(Debug, Clone)]
pub struct CssRenderer {
    prefix: String,
    show_progress: bool,
}

impl CssRenderer {
    pub fn new(prefix: impl Into<String>, show_progress: bool) -> Self {
        Self {
            prefix: prefix.into(),
            show_progress,
        }
    }

    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self::new(settings.variable_prefix.clone(), settings.show_progress)
    }

    /// Full custom property name for one slot, e.g. `--theme-bg-secondary`.
    pub fn variable_name(&self, css_name: &str) -> String {
        format!("{}{}", self.prefix, css_name)
    }

    /// CSS rule scoped to `data-theme`, one declaration per palette slot.
    pub fn render(&self, theme: &str, palette: &Palette, progress: f64) -> String {
        let mut css = String::new();
        if self.show_progress {
            css.push_str(&format!(
                "/* data-scroll-progress: {} */\n",
                scroll_percent(progress)
            ));
        }
        css.push_str(&format!(
            ":root[data-theme=\"{}\"] {{\n",
            escape_css_string(theme)
        ));
        for (slot, value) in palette.iter() {
            css.push_str(&format!(
                "  {}: {};\n",
                self.variable_name(slot.css_name()),
                value
            ));
        }
        css.push_str("}\n");
        css
    }
}

/// Escape a value for a double-quoted CSS string.
pub fn escape_css_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            c if c.is_control() => escaped.push_str(&format!("\\{:x} ", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Progress as a rounded percentage.
pub fn scroll_percent(progress: f64) -> u32 {
    (progress.clamp(0.0, 1.0) * 100.0).round() as u32
}
