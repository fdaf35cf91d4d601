#![forbid(unsafe_code)]

//! Folio public facade crate.
//!
//! This crate provides the stable surface for embedding the section
//! navigator. It re-exports common types from the internal crates and
//! offers a lightweight prelude.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use folio_core::event::{KeyCode, KeyEvent, KeyEventKind, Modifiers, NavEvent};
pub use folio_core::fragment::{fragment_for, normalize_fragment, parse_fragment};
pub use folio_core::geometry::{SectionBounds, Viewport};
pub use folio_core::section::{Section, SectionParseError};

// --- Runtime re-exports ----------------------------------------------------

pub use folio_runtime::{
    ConfigError, GuardChange, GuardTicket, History, LayoutProvider, ListenerKind,
    ListenerRegistry, MemoryHistory, MemoryHost, NavConfig, NavController, NavHost, NavState,
    ReleaseReason, ScrollDriver, StaticLayout, Transition, scroll_progress,
};

// --- Content re-exports ----------------------------------------------------

pub use folio_content::{CONTACT_EMAIL, Portfolio, TechFilter};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use folio_web::input::{HostEvent, InputParseError};
#[cfg(feature = "web")]
pub use folio_web::step_navigator::{StepNavigator, StepResult};
#[cfg(feature = "web")]
pub use folio_web::{HistoryOp, ScrollCommand, WebHostError, WebOutputs};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for folio embeddings.
#[derive(Debug)]
pub enum Error {
    /// Configuration rejected by validation.
    Config(Vec<ConfigError>),
    /// Malformed host event.
    #[cfg(feature = "web")]
    Input(InputParseError),
    /// Host-driven navigator misuse.
    #[cfg(feature = "web")]
    Host(WebHostError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(errors) => {
                f.write_str("invalid configuration: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
            #[cfg(feature = "web")]
            Self::Input(err) => write!(f, "{err}"),
            #[cfg(feature = "web")]
            Self::Host(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<Vec<ConfigError>> for Error {
    fn from(errors: Vec<ConfigError>) -> Self {
        Self::Config(errors)
    }
}

#[cfg(feature = "web")]
impl From<InputParseError> for Error {
    fn from(err: InputParseError) -> Self {
        Self::Input(err)
    }
}

#[cfg(feature = "web")]
impl From<WebHostError> for Error {
    fn from(err: WebHostError) -> Self {
        Self::Host(err)
    }
}

/// Standard result type for folio APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Validate `config` and build a controller starting at `initial_fragment`.
pub fn controller(config: NavConfig, initial_fragment: &str) -> Result<NavController> {
    config.validate()?;
    Ok(NavController::new(config, initial_fragment))
}

/// Build a controller from `FOLIO_NAV_*` overrides. Rejected overrides are
/// logged and fall back to their defaults.
pub fn controller_from_env(initial_fragment: &str) -> Result<NavController> {
    controller(NavConfig::from_env(), initial_fragment)
}

/// Install the JSON log subscriber (`RUST_LOG` filter). Returns `false` if
/// one was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_logging() -> bool {
    folio_core::logging::init_json_logging()
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, KeyCode, KeyEvent, NavConfig, NavController, NavEvent, NavHost, Result, Section,
        Transition,
    };

    #[cfg(feature = "web")]
    pub use crate::{StepNavigator, WebOutputs};

    pub use crate::{content, core, runtime};
}

pub use folio_content as content;
pub use folio_core as core;
pub use folio_runtime as runtime;
#[cfg(feature = "web")]
pub use folio_web as web;
