#![forbid(unsafe_code)]

//! Static content of the portfolio page.
//!
//! The rendering layer reads these tables; nothing here changes at runtime.
//! [`Portfolio::to_json`] hands the whole set to a JS renderer in one call.

pub mod tech;
pub mod timeline;

use serde::Serialize;

pub use tech::{Tech, TechCategory, TechFilter, TECHNOLOGIES, filter_technologies, tech_filters};
pub use timeline::{EXPERIENCES, Experience, PROJECTS, Project, ProjectMetric, ProjectStatus};

/// Address copied by the contact section's "copy email" button.
pub const CONTACT_EMAIL: &str = "clingtonleyo@gmail.com";

/// All content tables bundled for serialization.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Portfolio {
    pub technologies: &'static [Tech],
    pub tech_filters: &'static [&'static str],
    pub experiences: &'static [Experience],
    pub projects: &'static [Project],
    pub contact_email: &'static str,
}

const TECH_FILTER_IDS: &[&str] = &[
    "all",
    "language",
    "framework",
    "game",
    "frontend",
    "backend",
    "database",
    "cloud",
];

impl Portfolio {
    /// The page's content.
    #[must_use]
    pub const fn get() -> Self {
        Self {
            technologies: TECHNOLOGIES,
            tech_filters: TECH_FILTER_IDS,
            experiences: EXPERIENCES,
            projects: PROJECTS,
            contact_email: CONTACT_EMAIL,
        }
    }

    /// Serialize every table as one JSON document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
