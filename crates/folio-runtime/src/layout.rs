#![forbid(unsafe_code)]

//! Layout measurement and scrolling capabilities.
//!
//! The controller never touches a rendering surface directly. The host
//! injects these capabilities: a browser binding reads the DOM, the
//! host-driven web backend replays measurements pushed by JS, and tests use
//! [`crate::memory::StaticLayout`].

use folio_core::geometry::{SectionBounds, Viewport};
use folio_core::section::Section;

use crate::history::History;

/// Read-only layout queries.
pub trait LayoutProvider {
    /// Document-space span of a section's anchor, or `None` if the anchor
    /// is not rendered.
    fn section_bounds(&self, section: Section) -> Option<SectionBounds>;

    /// Height of the fixed navigation bar. Zero when it is absent.
    fn nav_bar_height(&self) -> f64;

    /// Current scroll position and viewport size.
    fn viewport(&self) -> Viewport;
}

/// Physical scrolling.
pub trait ScrollDriver {
    /// Begin a smooth scroll to the document offset `top`.
    ///
    /// Completion is reported asynchronously (a scroll-end signal), if at
    /// all.
    fn smooth_scroll_to(&mut self, top: f64);
}

/// Everything the controller needs from its host.
pub trait NavHost: LayoutProvider + ScrollDriver + History {}

impl<T: LayoutProvider + ScrollDriver + History> NavHost for T {}
