#![forbid(unsafe_code)]

//! Canonical navigation events.
//!
//! The host (browser glue or a test driver) translates platform events into
//! [`NavEvent`] values. All events derive `Clone` and `PartialEq` for use in
//! tests and pattern matching.
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press` when the platform cannot tell.
//! - Modifiers are carried for logging; navigation never distinguishes them.
//! - Fragments are passed raw (`"#about-section"`); normalization happens in
//!   the controller so the configured suffix applies.

use bitflags::bitflags;

use crate::section::Section;

/// Canonical navigation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// Initial page load with the current location fragment.
    Load {
        /// Raw fragment, including the leading `#` if present.
        fragment: String,
    },

    /// The viewport scrolled (user or programmatic).
    Scroll,

    /// The platform reported that scrolling has settled.
    ScrollEnd,

    /// A navigation entry was clicked.
    Click(Section),

    /// A keyboard event.
    Key(KeyEvent),

    /// The fragment changed through back/forward history navigation.
    HistoryNavigation {
        /// Raw fragment after the history move.
        fragment: String,
    },

    /// Periodic tick from the host loop; lets deadlines expire without a
    /// platform timer.
    Tick,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether the key went down (initial press or auto-repeat).
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }
}

/// Key codes relevant to page navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    /// Any key the navigator does not care about.
    Other,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` value.
    ///
    /// ```
    /// use folio_core::event::KeyCode;
    ///
    /// assert_eq!(KeyCode::from_dom_key("ArrowRight"), KeyCode::Right);
    /// assert_eq!(KeyCode::from_dom_key("q"), KeyCode::Char('q'));
    /// assert_eq!(KeyCode::from_dom_key("F5"), KeyCode::Other);
    /// ```
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "Home" => Self::Home,
            "End" => Self::End,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }

    /// DOM `KeyboardEvent.key` value for this code.
    #[must_use]
    pub fn to_dom_key(&self) -> String {
        match self {
            Self::Char(c) => c.to_string(),
            Self::Left => "ArrowLeft".to_string(),
            Self::Right => "ArrowRight".to_string(),
            Self::Up => "ArrowUp".to_string(),
            Self::Down => "ArrowDown".to_string(),
            Self::Home => "Home".to_string(),
            Self::End => "End".to_string(),
            Self::Other => "Unidentified".to_string(),
        }
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_map_with_legacy_names() {
        assert_eq!(KeyCode::from_dom_key("ArrowLeft"), KeyCode::Left);
        assert_eq!(KeyCode::from_dom_key("Left"), KeyCode::Left);
        assert_eq!(KeyCode::from_dom_key("Right"), KeyCode::Right);
    }

    #[test]
    fn multi_char_names_are_other() {
        assert_eq!(KeyCode::from_dom_key("Enter"), KeyCode::Other);
        assert_eq!(KeyCode::from_dom_key(""), KeyCode::Other);
    }

    #[test]
    fn dom_key_names_map_back() {
        for code in [KeyCode::Left, KeyCode::Right, KeyCode::Home, KeyCode::Char('x')] {
            assert_eq!(KeyCode::from_dom_key(&code.to_dom_key()), code);
        }
        assert_eq!(KeyCode::Other.to_dom_key(), "Unidentified");
    }

    #[test]
    fn non_ascii_single_char() {
        assert_eq!(KeyCode::from_dom_key("é"), KeyCode::Char('é'));
    }

    #[test]
    fn repeat_counts_as_down() {
        let key = KeyEvent::new(KeyCode::Right);
        assert!(key.is_down());
        assert!(key.with_kind(KeyEventKind::Repeat).is_down());
        assert!(!key.with_kind(KeyEventKind::Release).is_down());
    }

    #[test]
    fn modifiers_builder() {
        let key = KeyEvent::new(KeyCode::Left).with_modifiers(Modifiers::SHIFT | Modifiers::CTRL);
        assert!(key.modifiers.contains(Modifiers::CTRL));
        assert_eq!(key.code, KeyCode::Left);
    }
}
