//! Default filter behavior with neither env var set.
//!
//! Lives in its own test binary so no other test can populate the caches
//! with a non-default environment first.

use glog_trace::glib::{
    G_LOG_FLAG_FATAL, G_LOG_LEVEL_CRITICAL, G_LOG_LEVEL_DEBUG, G_LOG_LEVEL_ERROR,
    G_LOG_LEVEL_INFO, G_LOG_LEVEL_MESSAGE, G_LOG_LEVEL_WARNING,
};
use glog_trace::should_trace;
use serial_test::serial;
use std::env;

fn clear_filter_env() {
    unsafe {
        env::remove_var("GLIB_LEVELS_FILTER");
        env::remove_var("GLIB_DOMAIN_FILTERS");
    }
}

#[test]
#[serial]
fn default_traces_warning_and_above_in_any_domain() {
    clear_filter_env();

    assert!(should_trace(G_LOG_LEVEL_ERROR, Some("GLib")));
    assert!(should_trace(G_LOG_LEVEL_CRITICAL, Some("Gtk")));
    assert!(should_trace(G_LOG_LEVEL_WARNING, Some("anything-at-all")));
}

#[test]
#[serial]
fn default_traces_records_without_a_domain() {
    clear_filter_env();

    assert!(should_trace(G_LOG_LEVEL_ERROR | G_LOG_FLAG_FATAL, None));
    assert!(should_trace(G_LOG_LEVEL_WARNING, None));
}

#[test]
#[serial]
fn default_skips_low_severities() {
    clear_filter_env();

    assert!(!should_trace(G_LOG_LEVEL_MESSAGE, Some("GLib")));
    assert!(!should_trace(G_LOG_LEVEL_INFO, Some("GLib")));
    assert!(!should_trace(G_LOG_LEVEL_DEBUG, None));
}
