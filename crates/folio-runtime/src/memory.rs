#![forbid(unsafe_code)]

//! In-memory collaborators.
//!
//! Used by tests and by hosts that mirror a real page from pushed
//! measurements. Scrolling is instantaneous: a scroll request moves the
//! viewport to the clamped target before returning.

use folio_core::geometry::{SectionBounds, Viewport};
use folio_core::section::Section;

use crate::history::History;
use crate::layout::{LayoutProvider, ScrollDriver};

/// Fixed layout with a mutable viewport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticLayout {
    bounds: [Option<SectionBounds>; Section::COUNT],
    nav_bar_height: f64,
    viewport: Viewport,
}

impl StaticLayout {
    /// Empty layout: no anchors, no nav bar.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            bounds: [None; Section::COUNT],
            nav_bar_height: 0.0,
            viewport,
        }
    }

    /// Sections laid out back to back from the top of the document.
    ///
    /// The document height is the sum of `heights`.
    #[must_use]
    pub fn stacked(
        heights: [f64; Section::COUNT],
        nav_bar_height: f64,
        viewport_height: f64,
    ) -> Self {
        let mut layout = Self::new(Viewport::new(0.0, viewport_height, 0.0));
        let mut top = 0.0;
        for (section, height) in Section::ALL.into_iter().zip(heights) {
            layout.bounds[section.index()] = Some(SectionBounds::new(top, height));
            top += height;
        }
        layout.viewport.document_height = top;
        layout.nav_bar_height = nav_bar_height;
        layout
    }

    #[must_use]
    pub fn with_section(mut self, section: Section, bounds: SectionBounds) -> Self {
        self.set_section(section, Some(bounds));
        self
    }

    #[must_use]
    pub fn with_nav_bar_height(mut self, height: f64) -> Self {
        self.nav_bar_height = height;
        self
    }

    /// Replace or remove one section's bounds.
    pub fn set_section(&mut self, section: Section, bounds: Option<SectionBounds>) {
        self.bounds[section.index()] = bounds;
    }

    pub fn set_nav_bar_height(&mut self, height: f64) {
        self.nav_bar_height = height;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Move the viewport as a user scroll would.
    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.viewport.scroll_y = scroll_y;
    }
}

impl LayoutProvider for StaticLayout {
    fn section_bounds(&self, section: Section) -> Option<SectionBounds> {
        self.bounds[section.index()]
    }

    fn nav_bar_height(&self) -> f64 {
        self.nav_bar_height
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// Session history with a cursor, mirroring browser back/forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
    pushes: usize,
    replaces: usize,
}

impl MemoryHistory {
    /// History with a single entry.
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
            pushes: 0,
            replaces: 0,
        }
    }

    /// Move back one entry and return the new fragment.
    pub fn back(&mut self) -> Option<String> {
        self.cursor = self.cursor.checked_sub(1)?;
        Some(self.entries[self.cursor].clone())
    }

    /// Move forward one entry and return the new fragment.
    pub fn forward(&mut self) -> Option<String> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Number of entries in the session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of push operations performed.
    #[must_use]
    pub fn pushes(&self) -> usize {
        self.pushes
    }

    /// Number of replace operations performed.
    #[must_use]
    pub fn replaces(&self) -> usize {
        self.replaces
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl History for MemoryHistory {
    fn fragment(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn push_fragment(&mut self, fragment: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(fragment.to_string());
        self.cursor += 1;
        self.pushes += 1;
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.entries[self.cursor] = fragment.to_string();
        self.replaces += 1;
    }
}

/// Layout plus history plus a record of scroll requests.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    pub layout: StaticLayout,
    pub history: MemoryHistory,
    /// Every target passed to [`ScrollDriver::smooth_scroll_to`], unclamped.
    pub scroll_requests: Vec<f64>,
}

impl MemoryHost {
    #[must_use]
    pub fn new(layout: StaticLayout, history: MemoryHistory) -> Self {
        Self {
            layout,
            history,
            scroll_requests: Vec::new(),
        }
    }
}

impl LayoutProvider for MemoryHost {
    fn section_bounds(&self, section: Section) -> Option<SectionBounds> {
        self.layout.section_bounds(section)
    }

    fn nav_bar_height(&self) -> f64 {
        self.layout.nav_bar_height()
    }

    fn viewport(&self) -> Viewport {
        self.layout.viewport()
    }
}

impl ScrollDriver for MemoryHost {
    fn smooth_scroll_to(&mut self, top: f64) {
        self.scroll_requests.push(top);
        let clamped = self.layout.viewport().clamp_scroll(top);
        self.layout.set_scroll_y(clamped);
    }
}

impl History for MemoryHost {
    fn fragment(&self) -> String {
        self.history.fragment()
    }

    fn push_fragment(&mut self, fragment: &str) {
        self.history.push_fragment(fragment);
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.history.replace_fragment(fragment);
    }
}
