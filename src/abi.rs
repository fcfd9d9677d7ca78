//! The interposition boundary: the exported `g_log`.
//!
//! When the shim is preloaded ahead of `libglib-2.0.so.0`, the dynamic
//! loader resolves `g_log` to this definition for every caller in the
//! process. Each call is forwarded, unfiltered, to the real `g_logv`, so
//! host-visible logging behavior (formatting, recursion guards, the
//! abort-on-fatal-level semantics) is exactly what it would be without the
//! shim; the filters only decide whether a stack trace follows.

use std::ffi::{CStr, c_char};

use crate::filter;
use crate::glib::GLogLevelFlags;
use crate::resolve;
use crate::trace;

/// Replacement for GLib's variadic `g_log`.
///
/// # Safety
///
/// Called by foreign code under the C contract of `g_log`: `log_domain` is
/// NULL or NUL-terminated, `format` is a NUL-terminated printf-style
/// string matched by the variadic arguments.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn g_log(
    log_domain: *const c_char,
    log_level: GLogLevelFlags,
    format: *const c_char,
    args: ...
) {
    let real_g_logv = resolve::real_g_logv();
    // Forward first, unconditionally: the real primitive owns formatting
    // and the fatal-level abort, and its output must precede the trace.
    unsafe { real_g_logv(log_domain, log_level, format, args) };

    let domain = unsafe { domain_name(log_domain) };
    if filter::should_trace(log_level, domain) {
        tracing::trace!(level = log_level, domain, "record passed filters");
        trace::print_current_stack();
    }
}

/// Borrow the domain as UTF-8. NULL and non-UTF-8 names map to `None`:
/// neither can match a configured domain, and both pass an empty filter.
unsafe fn domain_name<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}
