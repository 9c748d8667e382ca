//! Scroll source: turns page metrics into a progress fraction.

/// Page scroll position and geometry, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, document_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top,
            document_height,
            viewport_height,
        }
    }

    /// Fraction of the scrollable distance covered, in `[0, 1]`.
    ///
    /// Pages that do not scroll report 0.
    pub fn progress(&self) -> f64 {
        let scrollable = self.document_height - self.viewport_height;
        if scrollable <= 0.0 || !scrollable.is_finite() {
            return 0.0;
        }
        (self.scroll_top / scrollable).clamp(0.0, 1.0)
    }

    /// Same scroll offset with new page geometry.
    pub fn resized(self, document_height: f64, viewport_height: f64) -> Self {
        Self {
            document_height,
            viewport_height,
            ..self
        }
    }
}
