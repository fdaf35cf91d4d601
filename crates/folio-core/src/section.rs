#![forbid(unsafe_code)]

//! The fixed, ordered sequence of page sections.
//!
//! Order matters: it defines keyboard adjacency and the default section.
//! Because [`Section`] is a closed enum, a value outside the sequence cannot
//! be constructed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Suffix the rendering layer appends to a section id to form its DOM anchor,
/// also accepted as a legacy fragment form (`#about-section`).
pub const ANCHOR_SUFFIX: &str = "-section";

/// One named region of the single-page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Hero,
    About,
    Experience,
    Projects,
    Contact,
}

impl Section {
    /// Number of sections.
    pub const COUNT: usize = 5;

    /// All sections in page order.
    pub const ALL: [Section; Self::COUNT] = [
        Section::Hero,
        Section::About,
        Section::Experience,
        Section::Projects,
        Section::Contact,
    ];

    /// Default section when nothing else applies.
    pub const FIRST: Section = Section::Hero;

    /// Last section in page order.
    pub const LAST: Section = Section::Contact;

    /// Position within [`Section::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Hero => 0,
            Self::About => 1,
            Self::Experience => 2,
            Self::Projects => 3,
            Self::Contact => 4,
        }
    }

    /// Section at `index`, if in range.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Lowercase identifier used in fragments (`"projects"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    /// DOM element id of the section anchor (`"projects-section"`).
    #[must_use]
    pub fn anchor_id(self) -> String {
        format!("{}{ANCHOR_SUFFIX}", self.as_str())
    }

    /// Previous section, or `self` at the start of the sequence.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self.index().checked_sub(1) {
            Some(idx) => Self::ALL[idx],
            None => self,
        }
    }

    /// Next section, or `self` at the end of the sequence.
    #[must_use]
    pub const fn next(self) -> Self {
        match Self::from_index(self.index() + 1) {
            Some(next) => next,
            None => self,
        }
    }

    /// Whether this is the first section.
    #[must_use]
    pub const fn is_first(self) -> bool {
        self.index() == 0
    }

    /// Whether this is the last section.
    #[must_use]
    pub const fn is_last(self) -> bool {
        self.index() == Self::COUNT - 1
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input did not name a known section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionParseError {
    input: String,
}

impl SectionParseError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for SectionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown section: {:?}", self.input)
    }
}

impl std::error::Error for SectionParseError {}

impl FromStr for Section {
    type Err = SectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| SectionParseError {
                input: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_page_order() {
        let ids: Vec<_> = Section::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(ids, ["hero", "about", "experience", "projects", "contact"]);
    }

    #[test]
    fn index_roundtrips() {
        for (i, section) in Section::ALL.into_iter().enumerate() {
            assert_eq!(section.index(), i);
            assert_eq!(Section::from_index(i), Some(section));
        }
        assert_eq!(Section::from_index(5), None);
    }

    #[test]
    fn previous_clamps_at_start() {
        assert_eq!(Section::Hero.previous(), Section::Hero);
        assert_eq!(Section::About.previous(), Section::Hero);
    }

    #[test]
    fn next_clamps_at_end() {
        assert_eq!(Section::Contact.next(), Section::Contact);
        assert_eq!(Section::Projects.next(), Section::Contact);
    }

    #[test]
    fn anchor_id_appends_suffix() {
        assert_eq!(Section::Experience.anchor_id(), "experience-section");
    }

    #[test]
    fn parse_rejects_unknown_and_case_variants() {
        assert_eq!("about".parse::<Section>(), Ok(Section::About));
        let err = "About".parse::<Section>().unwrap_err();
        assert_eq!(err.input(), "About");
        assert!("unknown".parse::<Section>().is_err());
        assert!("".parse::<Section>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_ids() {
        let json = serde_json::to_string(&Section::Projects).unwrap();
        assert_eq!(json, "\"projects\"");
        let back: Section = serde_json::from_str("\"contact\"").unwrap();
        assert_eq!(back, Section::Contact);
    }

    #[test]
    fn default_is_first() {
        assert_eq!(Section::default(), Section::Hero);
        assert!(Section::FIRST.is_first());
        assert!(Section::LAST.is_last());
    }
}
