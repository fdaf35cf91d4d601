#![forbid(unsafe_code)]

//! Scrollspy: which section is "current" for a given scroll position.
//!
//! A horizontal view line sits a fixed distance below the navigation bar
//! (a fraction of the viewport height plus the scroll offset). Among the
//! sections whose span contains the line, the one whose midpoint is nearest
//! wins; equal distances go to the section earlier in page order.
//!
//! When no span contains the line the result depends on where it is:
//!
//! - above the first measured section or below the last one (top or bottom
//!   of the page): the nearest section by edge distance, so the first and
//!   last sections stay reachable even when they are shorter than the
//!   view-line offset;
//! - in a gap between sections, or with nothing measured: unresolved, and
//!   the caller keeps its previous section to avoid flicker.

use folio_core::geometry::{SectionBounds, Viewport};
use folio_core::section::Section;

use crate::config::NavConfig;

/// Outcome of a scrollspy pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpySelection {
    /// The section's span contains the view line.
    Contained(Section),
    /// The view line is outside the measured page; nearest section.
    Edge(Section),
    /// Keep the previous section.
    Unresolved,
}

impl SpySelection {
    /// Resolve against the previously active section.
    #[must_use]
    pub fn or(self, previous: Section) -> Section {
        match self {
            Self::Contained(section) | Self::Edge(section) => section,
            Self::Unresolved => previous,
        }
    }
}

/// Document-space y of the view line.
#[must_use]
pub fn view_line(viewport: Viewport, nav_bar_height: f64, config: &NavConfig) -> f64 {
    viewport.scroll_y
        + nav_bar_height
        + config.scroll_offset
        + (viewport.height * config.view_line_ratio).round()
}

/// Pick the section for `line` from measured `(section, bounds)` pairs.
///
/// Pairs are expected in page order; ties resolve to the earlier pair.
pub fn select_section<I>(line: f64, measured: I) -> SpySelection
where
    I: IntoIterator<Item = (Section, SectionBounds)>,
{
    let mut best_contained: Option<(Section, f64)> = None;
    let mut best_edge: Option<(Section, f64)> = None;
    let mut page_top = f64::INFINITY;
    let mut page_bottom = f64::NEG_INFINITY;

    for (section, bounds) in measured {
        page_top = page_top.min(bounds.top);
        page_bottom = page_bottom.max(bounds.bottom());

        if bounds.contains(line) {
            let dist = (bounds.midpoint() - line).abs();
            if best_contained.is_none_or(|(_, best)| dist < best) {
                best_contained = Some((section, dist));
            }
        }

        let edge = bounds.distance_to(line);
        if best_edge.is_none_or(|(_, best)| edge < best) {
            best_edge = Some((section, edge));
        }
    }

    if let Some((section, _)) = best_contained {
        return SpySelection::Contained(section);
    }
    match best_edge {
        Some((section, _)) if line < page_top || line >= page_bottom => SpySelection::Edge(section),
        _ => SpySelection::Unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(top: f64, height: f64) -> SectionBounds {
        SectionBounds::new(top, height)
    }

    #[test]
    fn view_line_sits_below_nav_bar() {
        let config = NavConfig::default();
        let vp = Viewport::new(1000.0, 900.0, 5000.0);
        // 1000 + 64 + 24 + round(180)
        assert_eq!(view_line(vp, 64.0, &config), 1268.0);
    }

    #[test]
    fn view_line_rounds_viewport_fraction() {
        let config = NavConfig::default();
        let vp = Viewport::new(0.0, 803.0, 5000.0);
        // 0.2 * 803 = 160.6 -> 161
        assert_eq!(view_line(vp, 0.0, &config), 185.0);
    }

    #[test]
    fn three_disjoint_sections() {
        let measured = [
            (Section::Hero, b(0.0, 500.0)),
            (Section::About, b(500.0, 400.0)),
            (Section::Experience, b(900.0, 600.0)),
        ];
        assert_eq!(select_section(0.0, measured), SpySelection::Contained(Section::Hero));
        assert_eq!(select_section(499.0, measured), SpySelection::Contained(Section::Hero));
        assert_eq!(select_section(500.0, measured), SpySelection::Contained(Section::About));
        assert_eq!(
            select_section(1200.0, measured),
            SpySelection::Contained(Section::Experience)
        );
    }

    #[test]
    fn overlap_prefers_nearest_midpoint() {
        // A: [0, 500) mid 250; B: [450, 900) mid 675; line 480.
        // |250 - 480| = 230, |675 - 480| = 195 -> B.
        let measured = [(Section::Hero, b(0.0, 500.0)), (Section::About, b(450.0, 450.0))];
        assert_eq!(select_section(480.0, measured), SpySelection::Contained(Section::About));
    }

    #[test]
    fn overlap_prefers_first_when_it_is_nearer() {
        // A: [0, 500) mid 250; B: [250, 1000) mid 625; line 300.
        // 50 vs 325 -> A.
        let measured = [(Section::Hero, b(0.0, 500.0)), (Section::About, b(250.0, 750.0))];
        assert_eq!(select_section(300.0, measured), SpySelection::Contained(Section::Hero));
    }

    #[test]
    fn equidistant_midpoints_go_to_earlier_section() {
        // A: [0, 500) mid 250; B: [300, 500) mid 400; line 325.
        // 75 vs 75 -> earlier (A).
        let measured = [(Section::About, b(0.0, 500.0)), (Section::Projects, b(300.0, 200.0))];
        assert_eq!(select_section(325.0, measured), SpySelection::Contained(Section::About));

        // Same fixture, adjacent lines break the tie each way.
        assert_eq!(select_section(324.0, measured), SpySelection::Contained(Section::About));
        assert_eq!(
            select_section(326.0, measured),
            SpySelection::Contained(Section::Projects)
        );
    }

    #[test]
    fn above_page_picks_first_section() {
        let measured = [(Section::Hero, b(100.0, 500.0)), (Section::About, b(600.0, 500.0))];
        assert_eq!(select_section(20.0, measured), SpySelection::Edge(Section::Hero));
    }

    #[test]
    fn below_page_picks_last_section() {
        let measured = [(Section::Hero, b(0.0, 500.0)), (Section::Contact, b(500.0, 300.0))];
        assert_eq!(select_section(800.0, measured), SpySelection::Edge(Section::Contact));
        assert_eq!(select_section(5000.0, measured), SpySelection::Edge(Section::Contact));
    }

    #[test]
    fn gap_between_sections_is_unresolved() {
        let measured = [(Section::Hero, b(0.0, 400.0)), (Section::About, b(600.0, 400.0))];
        assert_eq!(select_section(500.0, measured), SpySelection::Unresolved);
        assert_eq!(SpySelection::Unresolved.or(Section::Hero), Section::Hero);
    }

    #[test]
    fn nothing_measured_is_unresolved() {
        let measured: Vec<(Section, SectionBounds)> = Vec::new();
        assert_eq!(select_section(100.0, measured), SpySelection::Unresolved);
    }

    #[test]
    fn or_uses_selected_section() {
        assert_eq!(SpySelection::Edge(Section::Contact).or(Section::Hero), Section::Contact);
        assert_eq!(SpySelection::Contained(Section::About).or(Section::Hero), Section::About);
    }
}
