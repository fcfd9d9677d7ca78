//! Record filters deciding which intercepted calls get a stack trace.
//!
//! Two independent caches, each parsed from its env var at most once per
//! process and immutable afterwards:
//! - severity mask from `GLIB_LEVELS_FILTER` ([`level`])
//! - domain set from `GLIB_DOMAIN_FILTERS` ([`domain`])

pub mod domain;
pub mod level;

pub use domain::{DOMAIN_FILTERS_ENV, DomainFilter, domain_filter};
pub use level::{LEVELS_FILTER_ENV, LevelFilter, level_filter};

use crate::glib::GLogLevelFlags;

/// Combined decision for one intercepted record: trace iff both the
/// process-wide severity filter and domain filter allow it.
pub fn should_trace(level: GLogLevelFlags, domain: Option<&str>) -> bool {
    level_filter().allows(level) && domain_filter().allows(domain)
}
