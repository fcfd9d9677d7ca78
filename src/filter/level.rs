//! Severity filtering for intercepted log records.

use std::sync::OnceLock;

use crate::glib::{
    G_LOG_LEVEL_CRITICAL, G_LOG_LEVEL_DEBUG, G_LOG_LEVEL_ERROR, G_LOG_LEVEL_INFO,
    G_LOG_LEVEL_MESSAGE, G_LOG_LEVEL_WARNING, GLogLevelFlags,
};

/// Env var holding the comma-separated severity names to trace.
pub const LEVELS_FILTER_ENV: &str = "GLIB_LEVELS_FILTER";

/// Severity names recognized in `GLIB_LEVELS_FILTER`, with their GLib bits.
const LEVEL_NAME_TABLE: [(&str, GLogLevelFlags); 6] = [
    ("error", G_LOG_LEVEL_ERROR),
    ("critical", G_LOG_LEVEL_CRITICAL),
    ("warning", G_LOG_LEVEL_WARNING),
    ("message", G_LOG_LEVEL_MESSAGE),
    ("info", G_LOG_LEVEL_INFO),
    ("debug", G_LOG_LEVEL_DEBUG),
];

/// Mask used when the env var is absent or empty.
const DEFAULT_MASK: GLogLevelFlags =
    G_LOG_LEVEL_ERROR | G_LOG_LEVEL_CRITICAL | G_LOG_LEVEL_WARNING;

static LEVEL_FILTER: OnceLock<LevelFilter> = OnceLock::new();

/// Process-wide severity filter, parsed from the environment on first use
/// and cached for the life of the process.
pub fn level_filter() -> &'static LevelFilter {
    LEVEL_FILTER.get_or_init(LevelFilter::from_env)
}

/// Bitmask over the GLib severity levels selected for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelFilter {
    mask: GLogLevelFlags,
}

impl LevelFilter {
    /// Parse a comma-separated severity list.
    ///
    /// `None` or the empty string keeps the default mask
    /// {error, critical, warning}. Any other value starts from an empty
    /// mask and adds one bit per recognized token; token matching is
    /// case-insensitive and unrecognized tokens are silently ignored, so a
    /// list with no recognized token yields a mask that passes nothing.
    pub fn parse(value: Option<&str>) -> Self {
        let mask = match value {
            None | Some("") => DEFAULT_MASK,
            Some(list) => list
                .split(',')
                .filter_map(recognize_name)
                .fold(0, |mask, bit| mask | bit),
        };
        Self { mask }
    }

    fn from_env() -> Self {
        let value = std::env::var(LEVELS_FILTER_ENV).ok();
        let filter = Self::parse(value.as_deref());
        tracing::debug!(mask = filter.mask, "severity filter ready");
        filter
    }

    /// True iff any severity bit of `level` is selected. `level` is the
    /// raw flags value of the intercepted call and may carry the
    /// recursion/fatal bits alongside the severity bit.
    pub fn allows(&self, level: GLogLevelFlags) -> bool {
        self.mask & level != 0
    }

    /// Whether `token` names a severity, under the same case-insensitive
    /// matching `parse` uses.
    pub fn is_known_name(token: &str) -> bool {
        recognize_name(token).is_some()
    }
}

fn recognize_name(token: &str) -> Option<GLogLevelFlags> {
    LEVEL_NAME_TABLE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|&(_, bit)| bit)
}
