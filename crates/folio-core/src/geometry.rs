#![forbid(unsafe_code)]

//! Document-space measurements reported by the rendering layer.
//!
//! All values are CSS pixels in document coordinates (origin at the top of
//! the page), so they stay stable while the viewport scrolls.

use serde::{Deserialize, Serialize};

/// Vertical span of one section: `[top, top + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionBounds {
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    /// Create bounds from a top edge and height.
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Height used for hit-testing. Unlaid-out elements report zero; they
    /// are treated as one pixel tall.
    #[must_use]
    pub fn effective_height(&self) -> f64 {
        if self.height > 0.0 { self.height } else { 1.0 }
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.effective_height()
    }

    /// Vertical midpoint.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.top + self.effective_height() / 2.0
    }

    /// Whether `y` lies within the half-open span.
    #[must_use]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }

    /// Zero inside the span, otherwise the distance to the nearest edge.
    #[must_use]
    pub fn distance_to(&self, y: f64) -> f64 {
        if y < self.top {
            self.top - y
        } else if y >= self.bottom() {
            y - self.bottom()
        } else {
            0.0
        }
    }
}

/// Scroll position and size of the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Current vertical scroll offset.
    pub scroll_y: f64,
    /// Visible height.
    pub height: f64,
    /// Full scrollable document height.
    pub document_height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(scroll_y: f64, height: f64, document_height: f64) -> Self {
        Self {
            scroll_y,
            height,
            document_height,
        }
    }

    /// Largest reachable `scroll_y`; zero when the document fits.
    #[must_use]
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.height).max(0.0)
    }

    /// Clamp a requested scroll offset into the reachable range.
    #[must_use]
    pub fn clamp_scroll(&self, top: f64) -> f64 {
        top.clamp(0.0, self.max_scroll())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_is_half_open() {
        let b = SectionBounds::new(100.0, 50.0);
        assert!(!b.contains(99.9));
        assert!(b.contains(100.0));
        assert!(b.contains(149.9));
        assert!(!b.contains(150.0));
    }

    #[test]
    fn zero_height_counts_as_one_pixel() {
        let b = SectionBounds::new(10.0, 0.0);
        assert_eq!(b.bottom(), 11.0);
        assert_eq!(b.midpoint(), 10.5);
        assert!(b.contains(10.0));
    }

    #[test]
    fn distance_to_edges() {
        let b = SectionBounds::new(100.0, 50.0);
        assert_eq!(b.distance_to(90.0), 10.0);
        assert_eq!(b.distance_to(120.0), 0.0);
        assert_eq!(b.distance_to(160.0), 10.0);
    }

    #[test]
    fn max_scroll_never_negative() {
        assert_eq!(Viewport::new(0.0, 800.0, 600.0).max_scroll(), 0.0);
        assert_eq!(Viewport::new(0.0, 800.0, 3000.0).max_scroll(), 2200.0);
    }

    #[test]
    fn clamp_scroll_limits_target() {
        let vp = Viewport::new(0.0, 800.0, 3000.0);
        assert_eq!(vp.clamp_scroll(-40.0), 0.0);
        assert_eq!(vp.clamp_scroll(5000.0), 2200.0);
        assert_eq!(vp.clamp_scroll(1000.0), 1000.0);
    }
}
