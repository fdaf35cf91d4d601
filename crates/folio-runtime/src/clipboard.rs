#![forbid(unsafe_code)]

//! Best-effort clipboard writes.
//!
//! Failures are logged and swallowed: copying is a convenience, never a
//! reason to interrupt the page.

use std::fmt;

/// Why a clipboard write failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard is available (insecure context, headless host).
    Unavailable,
    /// The platform refused the write.
    Denied(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("clipboard unavailable"),
            Self::Denied(msg) => write!(f, "clipboard write denied: {msg}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Platform clipboard.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Copy `text`, logging any failure. Returns whether the write succeeded.
pub fn copy_text<C>(clipboard: &mut C, text: &str) -> bool
where
    C: Clipboard + ?Sized,
{
    match clipboard.write_text(text) {
        Ok(()) => {
            tracing::debug!(len = text.len(), "copied to clipboard");
            true
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to copy to clipboard");
            false
        }
    }
}
