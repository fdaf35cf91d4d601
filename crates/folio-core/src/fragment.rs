#![forbid(unsafe_code)]

//! Location fragment normalization.
//!
//! The canonical fragment for a section is `#<id>`. The legacy anchor form
//! `#<id>-section` is accepted on input and normalized by stripping the
//! suffix. Anything else normalizes to a string that is not a section id,
//! which callers treat as "no change".

use crate::section::{ANCHOR_SUFFIX, Section};

/// Strip one leading `#` and one trailing `suffix`.
///
/// ```
/// use folio_core::fragment::normalize_fragment;
///
/// assert_eq!(normalize_fragment("#about-section", "-section"), "about");
/// assert_eq!(normalize_fragment("#about", "-section"), "about");
/// assert_eq!(normalize_fragment("", "-section"), "");
/// ```
#[must_use]
pub fn normalize_fragment<'a>(raw: &'a str, suffix: &str) -> &'a str {
    let body = raw.strip_prefix('#').unwrap_or(raw);
    if suffix.is_empty() {
        return body;
    }
    body.strip_suffix(suffix).unwrap_or(body)
}

/// Resolve a raw fragment to a section using the default anchor suffix.
#[must_use]
pub fn parse_fragment(raw: &str) -> Option<Section> {
    parse_fragment_with_suffix(raw, ANCHOR_SUFFIX)
}

/// Resolve a raw fragment to a section, stripping `suffix` first.
#[must_use]
pub fn parse_fragment_with_suffix(raw: &str, suffix: &str) -> Option<Section> {
    normalize_fragment(raw, suffix).parse().ok()
}

/// Canonical fragment (`#projects`) for a section.
#[must_use]
pub fn fragment_for(section: Section) -> String {
    format!("#{}", section.as_str())
}

/// Whether `raw` is exactly the canonical fragment for `section`.
#[must_use]
pub fn is_canonical(raw: &str, section: Section) -> bool {
    raw.strip_prefix('#') == Some(section.as_str())
}
