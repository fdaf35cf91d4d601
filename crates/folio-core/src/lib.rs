#![forbid(unsafe_code)]

//! Core: section identifiers, fragment normalization, geometry, and host events.

pub mod event;
pub mod fragment;
pub mod geometry;
#[cfg(feature = "tracing-json")]
pub mod logging;
pub mod section;
