use glog_trace::glib::{
    G_LOG_LEVEL_DEBUG, G_LOG_LEVEL_ERROR, G_LOG_LEVEL_INFO, G_LOG_LEVEL_WARNING,
};
use glog_trace::{domain_filter, level_filter, should_trace};
use serial_test::serial;
use std::env;

// Both caches latch whatever the environment holds on first use, so every
// test pins identical values before touching them. Whichever test runs
// first then decides nothing; the cached state is the same either way.
fn pin_caches() {
    unsafe {
        env::set_var("GLIB_LEVELS_FILTER", "warning,info");
        env::set_var("GLIB_DOMAIN_FILTERS", "core,io");
    }
    let _ = level_filter();
    let _ = domain_filter();
}

#[test]
#[serial]
fn cached_mask_reflects_the_pinned_environment() {
    pin_caches();

    assert!(level_filter().allows(G_LOG_LEVEL_WARNING));
    assert!(level_filter().allows(G_LOG_LEVEL_INFO));
    assert!(!level_filter().allows(G_LOG_LEVEL_ERROR));
    assert!(!level_filter().allows(G_LOG_LEVEL_DEBUG));

    assert!(domain_filter().allows(Some("core")));
    assert!(domain_filter().allows(Some("io")));
    assert!(!domain_filter().allows(Some("sound")));
}

#[test]
#[serial]
fn later_env_changes_are_ignored() {
    pin_caches();

    unsafe {
        env::set_var("GLIB_LEVELS_FILTER", "debug");
        env::set_var("GLIB_DOMAIN_FILTERS", "sound");
    }

    assert!(level_filter().allows(G_LOG_LEVEL_WARNING));
    assert!(!level_filter().allows(G_LOG_LEVEL_DEBUG));
    assert!(domain_filter().allows(Some("core")));
    assert!(!domain_filter().allows(Some("sound")));
}

#[test]
#[serial]
fn should_trace_requires_both_filters_to_pass() {
    pin_caches();

    assert!(should_trace(G_LOG_LEVEL_WARNING, Some("core")));
    assert!(!should_trace(G_LOG_LEVEL_WARNING, Some("sound")));
    assert!(!should_trace(G_LOG_LEVEL_DEBUG, Some("core")));
    // A domain list is in force, so records without a domain never match.
    assert!(!should_trace(G_LOG_LEVEL_WARNING, None));
}
