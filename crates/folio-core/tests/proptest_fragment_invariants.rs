//! Property-based invariant tests for sections and fragment normalization.
//!
//! 1. Every section resolves from both its canonical and legacy fragment.
//! 2. Parsing never yields anything outside the fixed sequence.
//! 3. Normalization never grows its input.
//! 4. previous/next stay adjacent and clamp at the bounds.
//! 5. Span containment agrees with edge distance.

use folio_core::fragment::{fragment_for, normalize_fragment, parse_fragment};
use folio_core::geometry::SectionBounds;
use folio_core::section::{ANCHOR_SUFFIX, Section};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn section_strategy() -> impl Strategy<Value = Section> {
    (0usize..Section::ALL.len()).prop_map(|i| Section::ALL[i])
}

fn bounds_strategy() -> impl Strategy<Value = SectionBounds> {
    (-2_000.0f64..20_000.0, 0.0f64..5_000.0).prop_map(|(top, h)| SectionBounds::new(top, h))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Canonical and legacy forms resolve
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn canonical_and_legacy_forms_resolve(section in section_strategy()) {
        prop_assert_eq!(parse_fragment(&fragment_for(section)), Some(section));
        let legacy = format!("#{}", section.anchor_id());
        prop_assert_eq!(parse_fragment(&legacy), Some(section));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Parsing stays within the sequence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn parse_only_yields_known_ids(raw in ".{0,24}") {
        if let Some(section) = parse_fragment(&raw) {
            prop_assert!(Section::ALL.contains(&section));
            prop_assert_eq!(normalize_fragment(&raw, ANCHOR_SUFFIX), section.as_str());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Normalization never grows
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalize_is_a_substring(raw in "#?[a-z-]{0,20}") {
        let normalized = normalize_fragment(&raw, ANCHOR_SUFFIX);
        prop_assert!(normalized.len() <= raw.len());
        prop_assert!(raw.contains(normalized));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Adjacency clamps
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn adjacency_moves_by_at_most_one(section in section_strategy()) {
        let prev = section.previous();
        let next = section.next();
        prop_assert!(section.index() - prev.index() <= 1);
        prop_assert!(next.index() - section.index() <= 1);
        prop_assert_eq!(prev == section, section.is_first());
        prop_assert_eq!(next == section, section.is_last());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Containment agrees with distance
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn contained_points_have_zero_distance(bounds in bounds_strategy(), y in -3_000.0f64..30_000.0) {
        let distance = bounds.distance_to(y);
        prop_assert!(distance >= 0.0);
        if bounds.contains(y) {
            prop_assert_eq!(distance, 0.0);
        } else {
            prop_assert!(y < bounds.top || y >= bounds.bottom());
        }
    }
}
