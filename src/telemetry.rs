//! Opt-in diagnostics of the shim itself.
//!
//! An interposer must not perturb its host by default, so nothing is
//! installed unless `GLOG_TRACE_LOG` is set. When it is, a stderr
//! `tracing` subscriber comes up at library load with the usual EnvFilter
//! directive syntax (`debug`, `glog_trace::resolve=trace`, ...). Stdout is
//! never touched; it belongs to the traces and the host program.

use tracing_subscriber::EnvFilter;

/// Env var enabling (and filtering) shim diagnostics on stderr.
pub const TRACE_LOG_ENV: &str = "GLOG_TRACE_LOG";

#[ctor::ctor]
fn init_on_load() {
    init_telemetry();
}

/// Install the stderr subscriber if `GLOG_TRACE_LOG` is set.
///
/// `try_init` leaves an already-installed subscriber (e.g. a Rust host
/// process that set one up before loading us) in charge; invalid
/// directives are ignored rather than rejected.
pub fn init_telemetry() {
    let Ok(directives) = std::env::var(TRACE_LOG_ENV) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .try_init();
}
