//! Theme stages: named intervals of the progress axis.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::Palette;

/// Tolerance when checking that adjacent stages touch.
const BOUNDARY_EPSILON: f64 = 1e-9;

/// Named interval `[start, end]` of scroll progress with a fixed palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeStage {
    pub name: String,
    pub start: f64,
    pub end: f64,
    pub palette: Palette,
}

impl ThemeStage {
    pub fn new(name: impl Into<String>, start: f64, end: f64, palette: Palette) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            palette,
        }
    }

    /// Inclusive on both ends, so a shared boundary belongs to both stages.
    pub fn contains(&self, progress: f64) -> bool {
        progress >= self.start && progress <= self.end
    }
}

/// Reject stage lists the engine cannot resolve unambiguously.
///
/// A valid list is non-empty, uniquely named, sorted by `start`, and covers
/// `[0, 1]` with adjacent stages touching exactly. Palette colors are not
/// checked here: a malformed color only stops that slot from blending.
pub fn validate_stages(stages: &[ThemeStage]) -> Result<()> {
    let (Some(first), Some(last)) = (stages.first(), stages.last()) else {
        bail!("stage list is empty");
    };

    let mut names = HashSet::new();
    for stage in stages {
        if stage.name.trim().is_empty() {
            bail!("stage name must not be empty");
        }
        if !names.insert(stage.name.as_str()) {
            bail!("duplicate stage name '{}'", stage.name);
        }
        if !stage.start.is_finite() || !stage.end.is_finite() {
            bail!("stage '{}' has a non-finite bound", stage.name);
        }
        if stage.start < 0.0 || stage.end > 1.0 {
            bail!(
                "stage '{}' [{}, {}] lies outside [0, 1]",
                stage.name,
                stage.start,
                stage.end
            );
        }
        if stage.start >= stage.end {
            bail!(
                "stage '{}' must start before it ends (start {}, end {})",
                stage.name,
                stage.start,
                stage.end
            );
        }
    }

    if first.start.abs() > BOUNDARY_EPSILON {
        bail!("first stage '{}' must start at 0", first.name);
    }
    if (last.end - 1.0).abs() > BOUNDARY_EPSILON {
        bail!("last stage '{}' must end at 1", last.name);
    }

    for pair in stages.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.start < prev.start {
            bail!(
                "stages are not sorted: '{}' starts before '{}'",
                next.name,
                prev.name
            );
        }
        let delta = next.start - prev.end;
        if delta > BOUNDARY_EPSILON {
            bail!(
                "gap between '{}' (ends {}) and '{}' (starts {})",
                prev.name,
                prev.end,
                next.name,
                next.start
            );
        }
        if delta < -BOUNDARY_EPSILON {
            bail!(
                "'{}' (ends {}) overlaps '{}' (starts {})",
                prev.name,
                prev.end,
                next.name,
                next.start
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_stages;

    fn stage(name: &str, start: f64, end: f64) -> ThemeStage {
        ThemeStage::new(name, start, end, default_stages()[0].palette.clone())
    }

    fn error_of(stages: &[ThemeStage]) -> String {
        validate_stages(stages).unwrap_err().to_string()
    }

    #[test]
    fn test_contains_is_inclusive() {
        let s = stage("day", 0.25, 0.5);
        assert!(s.contains(0.25));
        assert!(s.contains(0.5));
        assert!(!s.contains(0.2499));
        assert!(!s.contains(0.5001));
    }

    #[test]
    fn test_default_stages_are_valid() {
        assert!(validate_stages(&default_stages()).is_ok());
    }

    #[test]
    fn test_single_full_stage_is_valid() {
        assert!(validate_stages(&[stage("only", 0.0, 1.0)]).is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(error_of(&[]).contains("empty"));
    }

    #[test]
    fn test_rejects_gap() {
        let stages = [stage("a", 0.0, 0.4), stage("b", 0.5, 1.0)];
        assert!(error_of(&stages).contains("gap"));
    }

    #[test]
    fn test_rejects_overlap() {
        let stages = [stage("a", 0.0, 0.6), stage("b", 0.5, 1.0)];
        assert!(error_of(&stages).contains("overlaps"));
    }

    #[test]
    fn test_rejects_unsorted() {
        let stages = [
            stage("a", 0.0, 0.5),
            stage("b", 0.5, 1.0),
            stage("c", 0.2, 1.0),
        ];
        assert!(error_of(&stages).contains("not sorted"));
    }

    #[test]
    fn test_rejects_partial_coverage() {
        assert!(error_of(&[stage("a", 0.1, 1.0)]).contains("start at 0"));
        assert!(error_of(&[stage("a", 0.0, 0.9)]).contains("end at 1"));
    }

    #[test]
    fn test_rejects_bad_bounds() {
        assert!(error_of(&[stage("a", 0.0, 0.0)]).contains("start before"));
        assert!(error_of(&[stage("a", -0.5, 1.0)]).contains("outside"));
        assert!(error_of(&[stage("a", 0.0, f64::NAN)]).contains("non-finite"));
    }

    #[test]
    fn test_rejects_duplicate_and_blank_names() {
        let stages = [stage("a", 0.0, 0.5), stage("a", 0.5, 1.0)];
        assert!(error_of(&stages).contains("duplicate"));
        assert!(error_of(&[stage(" ", 0.0, 1.0)]).contains("empty"));
    }

    #[test]
    fn test_accepts_malformed_palette_color() {
        let mut s = stage("a", 0.0, 1.0);
        s.palette.bg = "white".into();
        assert!(validate_stages(&[s]).is_ok());
    }
}
