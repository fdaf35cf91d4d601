#![forbid(unsafe_code)]

//! Structured log output.
//!
//! Library crates only emit `tracing` events. An embedding binary calls
//! [`init_json_logging`] once to print them as JSON lines, filtered by
//! `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Install a global JSON subscriber honoring `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_json_logging() -> bool {
    init_json_logging_with(DEFAULT_FILTER)
}

/// Like [`init_json_logging`] with a caller-chosen fallback filter, e.g.
/// `"folio_runtime=debug"`.
pub fn init_json_logging_with(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
        .is_ok()
}
