#![forbid(unsafe_code)]

//! `folio-web` binds the section navigator to a web page.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes events,
//!   measurements, and the location fragment.
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! [`step_navigator::StepNavigator`] is the host-driven backend: scroll
//! requests and history writes are captured in [`WebOutputs`] for the host
//! to apply. On `wasm32` the `FolioNav` surface drives the same
//! controller against the real DOM.

pub mod input;
pub mod step_navigator;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::FolioNav;

use core::time::Duration;
use std::collections::VecDeque;

use folio_core::event::NavEvent;
use folio_core::section::Section;
use folio_runtime::ListenerKind;
use serde::{Serialize, Serializer};

/// Web backend error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebHostError {
    /// `step` or `teardown` before `init`.
    NotInitialized,
    /// `init` called twice.
    AlreadyInitialized,
    /// The navigator was torn down.
    TornDown,
}

impl core::fmt::Display for WebHostError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotInitialized => f.write_str("navigator not initialized"),
            Self::AlreadyInitialized => f.write_str("navigator already initialized"),
            Self::TornDown => f.write_str("navigator torn down"),
        }
    }
}

impl std::error::Error for WebHostError {}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }
}

/// Host-driven event queue.
#[derive(Debug, Default, Clone)]
pub struct WebEventSource {
    queue: VecDeque<NavEvent>,
}

impl WebEventSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a canonical event into the queue.
    pub fn push_event(&mut self, event: NavEvent) {
        self.queue.push_back(event);
    }

    /// Pop the oldest pending event.
    pub fn read_event(&mut self) -> Option<NavEvent> {
        self.queue.pop_front()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

/// A smooth scroll the host should start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollCommand {
    /// Document-space target offset; the host clamps to its scroll range.
    pub top: f64,
}

/// A history write the host should apply to `location`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "fragment", rename_all = "snake_case")]
pub enum HistoryOp {
    Push(String),
    Replace(String),
}

/// Captured outputs for host consumption.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct WebOutputs {
    /// Scroll requests in issue order.
    pub scroll_commands: Vec<ScrollCommand>,
    /// History writes in issue order.
    pub history_ops: Vec<HistoryOp>,
    /// Highlighted section after the last step.
    pub active_section: Section,
    /// Scroll progress percentage for the progress bar.
    pub progress: f64,
    /// Listeners the host must keep registered.
    #[serde(serialize_with = "serialize_listeners")]
    pub listeners: Vec<ListenerKind>,
}

impl WebOutputs {
    /// Encode for the JS bridge.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn serialize_listeners<S: Serializer>(kinds: &[ListenerKind], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(kinds.iter().map(|kind| kind.dom_event()))
}
