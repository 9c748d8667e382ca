//! Scroll-driven theme engine.
//!
//! Maps a progress fraction in `[0, 1]` to a stage name and a palette,
//! cross-fading neighboring stages inside a transition window around each
//! boundary, and notifies subscribers when the resolved name changes.

use anyhow::Result;
use std::sync::{Arc, Mutex};

use crate::color::ease_in_out_cubic;
use crate::stage::{validate_stages, ThemeStage};
use crate::{default_stages, Palette};

/// Width of the cross-fade on each side of a stage boundary.
pub const TRANSITION_OVERLAP: f64 = 0.1;

/// Payload delivered to subscribers on a theme change.
#[derive(Debug, Clone, Copy)]
pub struct ThemeChange<'a> {
    pub theme: &'a str,
    pub palette: &'a Palette,
    pub progress: f64,
}

/// Handle returned by [`ThemeEngine::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ThemeChange<'_>) + Send>;

/// Result of resolving a progress value against the stage list.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSample {
    /// Reported stage name
    pub theme: String,
    /// Possibly blended palette
    pub palette: Palette,
    /// Eased blend ratio when inside a transition window
    pub blend: Option<f64>,
}

/// Engine shared between threads.
pub type SharedThemeEngine = Arc<Mutex<ThemeEngine>>;

struct Resolution {
    /// Index of the stage whose name is reported
    stage: usize,
    /// `None` when the stage palette applies unblended
    blended: Option<(Palette, f64)>,
}

pub struct ThemeEngine {
    stages: Vec<ThemeStage>,
    progress: f64,
    current_theme: String,
    palette: Palette,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl std::fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeEngine")
            .field("stages", &self.stages.len())
            .field("progress", &self.progress)
            .field("current_theme", &self.current_theme)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ThemeEngine {
    /// Create an engine over `stages`, failing if they do not cover `[0, 1]`.
    ///
    /// The engine starts at progress 0 without notifying anyone.
    /// Malformed palette colors are logged and keep their value when blending.
    pub fn new(stages: Vec<ThemeStage>) -> Result<Self> {
        validate_stages(&stages)?;
        for stage in &stages {
            if let Err(e) = stage.palette.validate() {
                daybreak_logger::warn(format!("Stage '{}': {}", stage.name, e));
            }
        }
        Ok(Self::from_valid_stages(stages))
    }

    /// Create an engine over the built-in dawn/day/dusk/night stages.
    pub fn with_default_stages() -> Self {
        Self::from_valid_stages(default_stages())
    }

    fn from_valid_stages(stages: Vec<ThemeStage>) -> Self {
        let mut engine = Self {
            current_theme: String::new(),
            palette: stages[0].palette.clone(),
            stages,
            progress: 0.0,
            listeners: Vec::new(),
            next_id: 0,
        };
        let resolution = engine.resolve(0.0);
        engine.current_theme = engine.stages[resolution.stage].name.clone();
        engine.palette = engine.palette_of(resolution);
        engine
    }

    /// Wrap the engine for use from several threads.
    pub fn into_shared(self) -> SharedThemeEngine {
        Arc::new(Mutex::new(self))
    }

    /// Update scroll progress.
    ///
    /// Out-of-range input is clamped and NaN counts as 0. Returns `true`
    /// when the resolved theme name changed and subscribers were notified.
    /// The palette is refreshed on every call, even without a name change.
    pub fn set_progress(&mut self, progress: f64) -> bool {
        self.progress = clamp_progress(progress);

        let resolution = self.resolve(self.progress);
        let stage = resolution.stage;
        self.palette = self.palette_of(resolution);

        if self.stages[stage].name == self.current_theme {
            return false;
        }

        self.current_theme = self.stages[stage].name.clone();
        daybreak_logger::debug(format!(
            "Theme changed to '{}' at {:.0}%",
            self.current_theme,
            self.progress * 100.0
        ));
        self.notify();
        true
    }

    /// Force a stage by exact name, bypassing progress.
    ///
    /// Always notifies on success, even if the name is unchanged. Unknown
    /// names are ignored and return `false`.
    pub fn set_theme(&mut self, name: &str) -> bool {
        let Some(stage) = self.stages.iter().find(|s| s.name == name) else {
            daybreak_logger::warn(format!("Unknown theme '{}' ignored", name));
            return false;
        };

        self.current_theme = stage.name.clone();
        self.palette = stage.palette.clone();
        daybreak_logger::debug(format!("Theme forced to '{}'", name));
        self.notify();
        true
    }

    /// Resolve `progress` without changing engine state.
    pub fn sample(&self, progress: f64) -> ThemeSample {
        let resolution = self.resolve(clamp_progress(progress));
        let theme = self.stages[resolution.stage].name.clone();
        let blend = resolution.blended.as_ref().map(|(_, ratio)| *ratio);
        ThemeSample {
            theme,
            palette: self.palette_of(resolution),
            blend,
        }
    }

    /// Name last reported to subscribers.
    pub fn current_theme(&self) -> &str {
        &self.current_theme
    }

    /// Palette for the current state, blended inside transition windows.
    pub fn current_palette(&self) -> &Palette {
        &self.palette
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Stage containing the current progress.
    pub fn current_stage(&self) -> &ThemeStage {
        &self.stages[self.stage_index(self.progress)]
    }

    pub fn stages(&self) -> &[ThemeStage] {
        &self.stages
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.stages.iter().map(|s| s.name.as_str())
    }

    /// Register a theme change listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ThemeChange<'_>) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Drop every listener.
    pub fn clear_subscribers(&mut self) {
        self.listeners.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self) {
        let change = ThemeChange {
            theme: &self.current_theme,
            palette: &self.palette,
            progress: self.progress,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
    }

    /// First stage containing `progress`, falling back to the first stage.
    fn stage_index(&self, progress: f64) -> usize {
        self.stages
            .iter()
            .position(|s| s.contains(progress))
            .unwrap_or(0)
    }

    fn resolve(&self, progress: f64) -> Resolution {
        let index = self.stage_index(progress);
        let current = &self.stages[index];

        let Some(next) = self.stages.get(index + 1) else {
            return Resolution {
                stage: index,
                blended: None,
            };
        };

        let window_start = current.end - TRANSITION_OVERLAP;
        let window_end = next.start + TRANSITION_OVERLAP;
        if progress <= window_start || progress >= window_end {
            return Resolution {
                stage: index,
                blended: None,
            };
        }

        let raw = ((progress - window_start) / (window_end - window_start)).clamp(0.0, 1.0);
        let ratio = ease_in_out_cubic(raw);
        // Name flips at the blend midpoint, not at the nominal boundary
        let stage = if ratio > 0.5 { index + 1 } else { index };

        Resolution {
            stage,
            blended: Some((current.palette.blend(&next.palette, ratio), ratio)),
        }
    }

    fn palette_of(&self, resolution: Resolution) -> Palette {
        match resolution.blended {
            Some((palette, _)) => palette,
            None => self.stages[resolution.stage].palette.clone(),
        }
    }
}

impl Default for ThemeEngine {
    fn default() -> Self {
        Self::with_default_stages()
    }
}

fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}
