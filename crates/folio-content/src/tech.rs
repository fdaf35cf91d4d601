#![forbid(unsafe_code)]

//! Technology table and the category filter used by the skills grid.

use std::fmt;

use serde::Serialize;

/// Skill category shown as a filter chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TechCategory {
    Language,
    Framework,
    Game,
    Frontend,
    Backend,
    Database,
    Cloud,
}

impl TechCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Language => "language",
            Self::Framework => "framework",
            Self::Game => "game",
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Database => "database",
            Self::Cloud => "cloud",
        }
    }

    const ALL: [TechCategory; 7] = [
        Self::Language,
        Self::Framework,
        Self::Game,
        Self::Frontend,
        Self::Backend,
        Self::Database,
        Self::Cloud,
    ];

    /// Parse a lowercase category id.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for TechCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the skills grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tech {
    pub name: &'static str,
    pub category: TechCategory,
    pub icon: &'static str,
    /// Self-assessed proficiency, 0..=100.
    pub level: u8,
}

const fn tech(name: &'static str, category: TechCategory, icon: &'static str, level: u8) -> Tech {
    Tech {
        name,
        category,
        icon,
        level,
    }
}

pub const TECHNOLOGIES: &[Tech] = &[
    tech("C", TechCategory::Language, "⚡", 85),
    tech("Java", TechCategory::Language, "☕", 90),
    tech("SpringBoot", TechCategory::Framework, "🍃", 85),
    tech("Angular", TechCategory::Framework, "🅰️", 80),
    tech("Unity C#", TechCategory::Game, "🎮", 95),
    tech("Unity 3D", TechCategory::Game, "🎯", 95),
    tech("React", TechCategory::Frontend, "⚛️", 88),
    tech("Node JS", TechCategory::Backend, "📗", 85),
    tech("MongoDB", TechCategory::Database, "🍃", 82),
    tech("AWS Service", TechCategory::Cloud, "☁️", 80),
    tech("Google Cloud", TechCategory::Cloud, "🌤️", 78),
    tech("Microsoft Azure", TechCategory::Cloud, "☁️", 75),
];

/// Active filter chip of the skills grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TechFilter {
    #[default]
    All,
    Category(TechCategory),
}

impl TechFilter {
    /// Parse `"all"` or a category id.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s == "all" {
            Some(Self::All)
        } else {
            TechCategory::parse(s).map(Self::Category)
        }
    }

    #[must_use]
    pub fn matches(self, tech: &Tech) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => tech.category == category,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Category(category) => category.as_str(),
        }
    }
}

impl Serialize for TechFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Technologies passing `filter`, in table order.
pub fn filter_technologies(filter: TechFilter) -> impl Iterator<Item = &'static Tech> {
    TECHNOLOGIES.iter().filter(move |t| filter.matches(t))
}

/// Filter chips: `All`, then each category in order of first appearance.
#[must_use]
pub fn tech_filters() -> Vec<TechFilter> {
    let mut filters = vec![TechFilter::All];
    for tech in TECHNOLOGIES {
        let chip = TechFilter::Category(tech.category);
        if !filters.contains(&chip) {
            filters.push(chip);
        }
    }
    filters
}
