#![forbid(unsafe_code)]

//! Runtime for the single-page section navigator.
//!
//! [`NavController`] arbitrates between the two writers of "current
//! section": free scrolling (recomputed by the scrollspy) and programmatic
//! scrolling started by a click, a key press, or history navigation (pinned
//! by the scroll guard). Platform access goes through the collaborator
//! traits in [`layout`] and [`history`], so the controller runs the same in
//! a browser, in the host-driven web backend, and in tests.

pub mod clipboard;
pub mod config;
pub mod controller;
pub mod guard;
pub mod history;
pub mod layout;
pub mod memory;
pub mod progress;
pub mod scrollspy;
pub mod subscription;

pub use clipboard::{Clipboard, ClipboardError, copy_text};
pub use config::{ConfigError, NavConfig, NavConfigParse};
pub use controller::{NavController, NavState, Transition};
pub use guard::{GuardChange, GuardTicket, ReleaseReason, ScrollGuard};
pub use history::History;
pub use layout::{LayoutProvider, NavHost, ScrollDriver};
pub use memory::{MemoryHistory, MemoryHost, StaticLayout};
pub use progress::scroll_progress;
pub use scrollspy::{SpySelection, select_section, view_line};
pub use subscription::{BindError, ListenerBinder, ListenerKind, ListenerRegistry};
