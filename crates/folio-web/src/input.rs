#![forbid(unsafe_code)]

//! Deterministic, JSON-friendly host event schema for `folio-web`.
//!
//! The web host (JS/TS) serializes what it observed on the page:
//!
//! ```json
//! {"kind":"load","fragment":"#about-section"}
//! {"kind":"scroll"}
//! {"kind":"scroll_end"}
//! {"kind":"click","section":"projects"}
//! {"kind":"key","key":"ArrowRight","mods":0,"repeat":false}
//! {"kind":"history_navigation","fragment":"#contact"}
//! {"kind":"tick"}
//! ```
//!
//! Key names follow DOM `KeyboardEvent.key`; `mods` is the compact
//! modifier bitset from [`Modifiers`]. The schema is stable for
//! record/replay.

use std::fmt;

use folio_core::event::{KeyCode, KeyEvent, KeyEventKind, Modifiers, NavEvent};
use folio_core::section::{Section, SectionParseError};
use serde::{Deserialize, Serialize};

/// Phase for key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPhase {
    #[default]
    Down,
    Up,
}

/// JSON wire form of a host event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostEvent {
    Load {
        #[serde(default)]
        fragment: String,
    },
    Scroll,
    ScrollEnd,
    Click {
        section: String,
    },
    Key {
        key: String,
        #[serde(default)]
        phase: KeyPhase,
        #[serde(default)]
        mods: u8,
        #[serde(default)]
        repeat: bool,
    },
    HistoryNavigation {
        #[serde(default)]
        fragment: String,
    },
    Tick,
}

/// A host event could not be decoded.
#[derive(Debug)]
pub enum InputParseError {
    /// Malformed JSON or unknown `kind`.
    Json(serde_json::Error),
    /// A click named a section that does not exist.
    UnknownSection(SectionParseError),
}

impl fmt::Display for InputParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid host event: {err}"),
            Self::UnknownSection(err) => write!(f, "invalid click target: {err}"),
        }
    }
}

impl std::error::Error for InputParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::UnknownSection(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for InputParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<SectionParseError> for InputParseError {
    fn from(err: SectionParseError) -> Self {
        Self::UnknownSection(err)
    }
}

impl HostEvent {
    /// Encode this event as a stable JSON string.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a host event JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, InputParseError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Decode straight into a canonical event.
    pub fn parse_nav_event(s: &str) -> Result<NavEvent, InputParseError> {
        NavEvent::try_from(Self::from_json_str(s)?)
    }
}

impl From<&NavEvent> for HostEvent {
    fn from(value: &NavEvent) -> Self {
        match value {
            NavEvent::Load { fragment } => Self::Load {
                fragment: fragment.clone(),
            },
            NavEvent::Scroll => Self::Scroll,
            NavEvent::ScrollEnd => Self::ScrollEnd,
            NavEvent::Click(section) => Self::Click {
                section: section.as_str().to_string(),
            },
            NavEvent::Key(key) => Self::Key {
                key: key.code.to_dom_key(),
                phase: match key.kind {
                    KeyEventKind::Release => KeyPhase::Up,
                    KeyEventKind::Press | KeyEventKind::Repeat => KeyPhase::Down,
                },
                mods: key.modifiers.bits(),
                repeat: key.kind == KeyEventKind::Repeat,
            },
            NavEvent::HistoryNavigation { fragment } => Self::HistoryNavigation {
                fragment: fragment.clone(),
            },
            NavEvent::Tick => Self::Tick,
        }
    }
}

impl TryFrom<HostEvent> for NavEvent {
    type Error = InputParseError;

    fn try_from(value: HostEvent) -> Result<Self, Self::Error> {
        Ok(match value {
            HostEvent::Load { fragment } => Self::Load { fragment },
            HostEvent::Scroll => Self::Scroll,
            HostEvent::ScrollEnd => Self::ScrollEnd,
            HostEvent::Click { section } => Self::Click(section.parse::<Section>()?),
            HostEvent::Key {
                key,
                phase,
                mods,
                repeat,
            } => {
                let kind = match (phase, repeat) {
                    (KeyPhase::Up, _) => KeyEventKind::Release,
                    (KeyPhase::Down, true) => KeyEventKind::Repeat,
                    (KeyPhase::Down, false) => KeyEventKind::Press,
                };
                Self::Key(
                    KeyEvent::new(KeyCode::from_dom_key(&key))
                        .with_modifiers(Modifiers::from_bits_truncate(mods))
                        .with_kind(kind),
                )
            }
            HostEvent::HistoryNavigation { fragment } => Self::HistoryNavigation { fragment },
            HostEvent::Tick => Self::Tick,
        })
    }
}
