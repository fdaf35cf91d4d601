#![forbid(unsafe_code)]

//! Navigator configuration (deterministic, env-overridable).
//!
//! # Environment Variables
//! - `FOLIO_NAV_SCROLL_OFFSET` (pixels, `>= 0`)
//! - `FOLIO_NAV_VIEW_LINE_RATIO` (fraction of viewport height, `0..=1`)
//! - `FOLIO_NAV_GUARD_TIMEOUT_MS` (milliseconds, `1..=10000`)
//! - `FOLIO_NAV_FRAGMENT_SUFFIX` (non-empty string)
//!
//! Malformed values keep the default and are reported in
//! [`NavConfigParse::errors`]; configuration problems are never fatal.

use std::env;
use std::fmt;
use std::time::Duration;

use folio_core::section::ANCHOR_SUFFIX;

const ENV_SCROLL_OFFSET: &str = "FOLIO_NAV_SCROLL_OFFSET";
const ENV_VIEW_LINE_RATIO: &str = "FOLIO_NAV_VIEW_LINE_RATIO";
const ENV_GUARD_TIMEOUT_MS: &str = "FOLIO_NAV_GUARD_TIMEOUT_MS";
const ENV_FRAGMENT_SUFFIX: &str = "FOLIO_NAV_FRAGMENT_SUFFIX";

/// Upper bound for the guard fallback; longer values lock out the
/// scrollspy noticeably.
const MAX_GUARD_TIMEOUT: Duration = Duration::from_secs(10);

/// Navigator tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct NavConfig {
    /// Gap kept between the nav bar and a scrolled-to section, and added
    /// below the nav bar when placing the view line. Default: 24px.
    pub scroll_offset: f64,
    /// View line position as a fraction of viewport height. Default: 0.2.
    pub view_line_ratio: f64,
    /// Fallback after which a programmatic scroll is assumed finished even
    /// without a scroll-end signal. Default: 1500ms.
    pub guard_timeout: Duration,
    /// Decorative suffix stripped from incoming fragments. Default: `-section`.
    pub fragment_suffix: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            scroll_offset: 24.0,
            view_line_ratio: 0.2,
            guard_timeout: Duration::from_millis(1500),
            fragment_suffix: ANCHOR_SUFFIX.to_string(),
        }
    }
}

/// Parsed config plus any diagnostics.
#[derive(Debug, Clone)]
pub struct NavConfigParse {
    pub config: NavConfig,
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl NavConfig {
    /// Parse config from environment variables, logging any diagnostics.
    #[must_use]
    pub fn from_env() -> NavConfig {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// [`NavConfig::from_env_with`], logging each rejected override and
    /// keeping the rest.
    #[must_use]
    pub fn from_lookup<F>(get: F) -> NavConfig
    where
        F: FnMut(&str) -> Option<String>,
    {
        let parsed = Self::from_env_with(get);
        for err in &parsed.errors {
            tracing::warn!(
                field = err.field,
                value = %err.value,
                "ignoring config override: {}",
                err.message
            );
        }
        parsed.config
    }

    /// Parse config through an arbitrary lookup (tests, JS-provided maps).
    pub fn from_env_with<F>(mut get: F) -> NavConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = NavConfig::default();
        let mut errors = Vec::new();

        if let Some(value) = get(ENV_SCROLL_OFFSET) {
            match parse_f64(&value) {
                Some(parsed) if parsed >= 0.0 => config.scroll_offset = parsed,
                _ => errors.push(ConfigError::new(
                    "scroll_offset",
                    value,
                    "expected non-negative number",
                )),
            }
        }

        if let Some(value) = get(ENV_VIEW_LINE_RATIO) {
            match parse_f64(&value) {
                Some(parsed) if (0.0..=1.0).contains(&parsed) => config.view_line_ratio = parsed,
                _ => errors.push(ConfigError::new(
                    "view_line_ratio",
                    value,
                    "expected number in 0..=1",
                )),
            }
        }

        if let Some(value) = get(ENV_GUARD_TIMEOUT_MS) {
            match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 && Duration::from_millis(ms) <= MAX_GUARD_TIMEOUT => {
                    config.guard_timeout = Duration::from_millis(ms);
                }
                _ => errors.push(ConfigError::new(
                    "guard_timeout",
                    value,
                    "expected milliseconds in 1..=10000",
                )),
            }
        }

        if let Some(value) = get(ENV_FRAGMENT_SUFFIX) {
            if value.is_empty() {
                errors.push(ConfigError::new(
                    "fragment_suffix",
                    value,
                    "expected non-empty suffix",
                ));
            } else {
                config.fragment_suffix = value;
            }
        }

        NavConfigParse { config, errors }
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if !(self.scroll_offset.is_finite() && self.scroll_offset >= 0.0) {
            errors.push(ConfigError::new(
                "scroll_offset",
                self.scroll_offset.to_string(),
                "must be a non-negative number",
            ));
        }
        if !(0.0..=1.0).contains(&self.view_line_ratio) {
            errors.push(ConfigError::new(
                "view_line_ratio",
                self.view_line_ratio.to_string(),
                "must be within 0..=1",
            ));
        }
        if self.guard_timeout.is_zero() || self.guard_timeout > MAX_GUARD_TIMEOUT {
            errors.push(ConfigError::new(
                "guard_timeout",
                format!("{:?}", self.guard_timeout),
                "must be within 1ms..=10s",
            ));
        }
        if self.fragment_suffix.is_empty() {
            errors.push(ConfigError::new(
                "fragment_suffix",
                "",
                "must not be empty",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn parse_f64(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
