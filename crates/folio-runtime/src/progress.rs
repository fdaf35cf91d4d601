#![forbid(unsafe_code)]

//! Scroll progress indicator.

use folio_core::geometry::Viewport;

/// Percentage of the scrollable range already traversed, in `0..=100`.
///
/// Zero when the document fits in the viewport. Overscroll (rubber-band
/// bounce) is clamped.
#[must_use]
pub fn scroll_progress(viewport: Viewport) -> f64 {
    let max = viewport.max_scroll();
    if max <= 0.0 {
        return 0.0;
    }
    (viewport.scroll_y / max * 100.0).clamp(0.0, 100.0)
}
