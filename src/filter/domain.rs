//! Domain filtering for intercepted log records.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Env var holding the comma-separated domain names to trace.
pub const DOMAIN_FILTERS_ENV: &str = "GLIB_DOMAIN_FILTERS";

static DOMAIN_FILTER: OnceLock<DomainFilter> = OnceLock::new();

/// Process-wide domain filter, parsed from the environment on first use
/// and cached for the life of the process.
pub fn domain_filter() -> &'static DomainFilter {
    DOMAIN_FILTER.get_or_init(DomainFilter::from_env)
}

/// Set of log domains selected for tracing. The empty set is the
/// "match every domain" sentinel, not "match nothing".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DomainFilter {
    domains: HashSet<String>,
}

impl DomainFilter {
    /// Parse a comma-separated domain list. Tokens are taken verbatim:
    /// no case normalization, no trimming. `None` and the empty string
    /// yield the empty (match-all) set.
    pub fn parse(value: Option<&str>) -> Self {
        let domains = match value {
            None | Some("") => HashSet::new(),
            Some(list) => list.split(',').map(str::to_owned).collect(),
        };
        Self { domains }
    }

    fn from_env() -> Self {
        let value = std::env::var(DOMAIN_FILTERS_ENV).ok();
        let filter = Self::parse(value.as_deref());
        tracing::debug!(domains = filter.domains.len(), "domain filter ready");
        filter
    }

    /// True iff `domain` should be traced: always for the empty set,
    /// otherwise only on an exact, case-sensitive match. An absent domain
    /// (NULL in the intercepted call) never matches a non-empty set.
    pub fn allows(&self, domain: Option<&str>) -> bool {
        if self.domains.is_empty() {
            return true;
        }
        domain.is_some_and(|name| self.domains.contains(name))
    }
}
