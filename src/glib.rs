//! The slice of the GLib ABI this shim touches.
//!
//! Mirrors `glib/gmessages.h`: the `GLogLevelFlags` bits, the soname of the
//! real library and the name of the variadic-consuming logging primitive.
//! Nothing here links against GLib at build time; the real symbols are
//! resolved at runtime by [`crate::resolve`].

use std::ffi::{CStr, VaList, c_char, c_int};

/// `GLogLevelFlags` as it crosses the C ABI (a plain C enum, i.e. `int`).
///
/// A value is a *set* of bits: one severity bit plus, possibly, the
/// recursion/fatal flag bits. Filtering therefore tests bit overlap, never
/// equality.
pub type GLogLevelFlags = c_int;

/// Internal log flags, carried alongside the severity bits.
pub const G_LOG_FLAG_RECURSION: GLogLevelFlags = 1 << 0;
pub const G_LOG_FLAG_FATAL: GLogLevelFlags = 1 << 1;

/// Severity bits, highest priority first.
pub const G_LOG_LEVEL_ERROR: GLogLevelFlags = 1 << 2;
pub const G_LOG_LEVEL_CRITICAL: GLogLevelFlags = 1 << 3;
pub const G_LOG_LEVEL_WARNING: GLogLevelFlags = 1 << 4;
pub const G_LOG_LEVEL_MESSAGE: GLogLevelFlags = 1 << 5;
pub const G_LOG_LEVEL_INFO: GLogLevelFlags = 1 << 6;
pub const G_LOG_LEVEL_DEBUG: GLogLevelFlags = 1 << 7;

/// Versioned soname of the real library, openable without dev symlinks.
pub const GLIB_SONAME: &CStr = c"libglib-2.0.so.0";

/// The primitive every public GLib logging entry funnels into.
pub const G_LOGV_SYMBOL: &CStr = c"g_logv";

/// Prototype of the real `g_logv(log_domain, log_level, format, args)`.
pub type GLogvFn = unsafe extern "C" fn(*const c_char, GLogLevelFlags, *const c_char, VaList);
