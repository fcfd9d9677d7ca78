//! Runtime interposer that traces GLib `g_log` calls.
//!
//! Built as `libglog_trace.so`, the library exports a `g_log` that forwards
//! every record to the real `g_logv` in libglib-2.0 and, when the record
//! passes the severity and domain filters, prints a stack trace of the call
//! site to stdout. The `glog-trace` binary wraps the `LD_PRELOAD` setup for
//! interactive use.

#![feature(c_variadic)]
// The gate becomes redundant once c_variadic rides to stable.
#![allow(stable_features)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::missing_errors_doc,  // Internal API
    clippy::missing_panics_doc,  // Internal API
    clippy::must_use_candidate   // Annotated selectively on critical APIs
)]

pub mod abi;
pub mod filter;
pub mod glib;
pub mod launch;
pub mod resolve;
pub mod telemetry;
pub mod trace;

// Re-export main types for easy access
pub use filter::{DomainFilter, LevelFilter, domain_filter, level_filter, should_trace};
pub use resolve::{LibHandle, ResolveError, try_lookup, try_open_library};
pub use trace::print_current_stack;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
