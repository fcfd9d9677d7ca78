//! Lazy resolution of the real GLib logging primitive.
//!
//! The real library is `dlopen`ed on first use, not at load time, so the
//! dynamic loader finishes its own initialization of the interposed
//! library first. The handle and the resolved function pointer are cached
//! for the life of the process and never released.
//!
//! Failure has no recovery path: the shim exists to wrap a primitive it
//! cannot find, so resolution errors abort the host process after a single
//! diagnostic line.

use std::ffi::{CStr, c_void};
use std::io::Write;
use std::sync::OnceLock;

use thiserror::Error;

use crate::glib::{G_LOGV_SYMBOL, GLIB_SONAME, GLogvFn};

/// Resolution failures. Terminal at the cached-accessor boundary; the
/// `Result` form exists so the mechanics stay testable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Failed to open {library}: {reason}")]
    LibraryOpen { library: String, reason: String },

    #[error("Failed to find symbol: {reason}")]
    SymbolLookup { symbol: String, reason: String },
}

/// Opaque `dlopen` handle, shared read-only after first resolution.
#[derive(Debug)]
pub struct LibHandle(*mut c_void);

// The pointer is only ever handed back to dlsym, which is thread-safe;
// it is never dereferenced here.
unsafe impl Send for LibHandle {}
unsafe impl Sync for LibHandle {}

static REAL_LIB: OnceLock<LibHandle> = OnceLock::new();
static REAL_G_LOGV: OnceLock<GLogvFn> = OnceLock::new();

/// The real `g_logv`, resolved once and cached.
///
/// Aborts the process if the real library or the symbol cannot be found.
pub(crate) fn real_g_logv() -> GLogvFn {
    *REAL_G_LOGV.get_or_init(|| {
        let ptr = resolve(G_LOGV_SYMBOL);
        // SAFETY: `ptr` was resolved from the real libglib under the
        // `g_logv` name; `GLogvFn` mirrors its C prototype.
        unsafe { std::mem::transmute::<*mut c_void, GLogvFn>(ptr) }
    })
}

/// Resolve `symbol` against the lazily opened real library.
///
/// The library handle is opened on the first call and reused afterwards.
/// Both an unopenable library and an unknown symbol are fatal: one
/// diagnostic line on stdout, then `process::abort`.
pub fn resolve(symbol: &CStr) -> *mut c_void {
    let handle = REAL_LIB.get_or_init(|| match try_open_library(GLIB_SONAME) {
        Ok(handle) => handle,
        Err(err) => fatal(&err),
    });
    match try_lookup(handle, symbol) {
        Ok(ptr) => ptr,
        Err(err) => fatal(&err),
    }
}

/// `dlopen(name, RTLD_LAZY)`, reporting the `dlerror` text on failure.
pub fn try_open_library(name: &CStr) -> Result<LibHandle, ResolveError> {
    // SAFETY: `name` is NUL-terminated; dlopen has no other preconditions.
    let handle = unsafe { libc::dlopen(name.as_ptr(), libc::RTLD_LAZY) };
    if handle.is_null() {
        return Err(ResolveError::LibraryOpen {
            library: name.to_string_lossy().into_owned(),
            reason: take_dl_error().unwrap_or_else(|| "unknown dlopen failure".to_owned()),
        });
    }
    tracing::debug!(library = %name.to_string_lossy(), "opened real library");
    Ok(LibHandle(handle))
}

/// `dlsym` under the `dlerror` protocol: a NULL return alone is not a
/// failure, since NULL can be a valid symbol value.
pub fn try_lookup(handle: &LibHandle, symbol: &CStr) -> Result<*mut c_void, ResolveError> {
    take_dl_error();
    // SAFETY: the handle came from a successful dlopen and is never closed.
    let ptr = unsafe { libc::dlsym(handle.0, symbol.as_ptr()) };
    if let Some(reason) = take_dl_error() {
        return Err(ResolveError::SymbolLookup {
            symbol: symbol.to_string_lossy().into_owned(),
            reason,
        });
    }
    tracing::debug!(symbol = %symbol.to_string_lossy(), "resolved symbol");
    Ok(ptr)
}

/// Consume the thread's pending `dlerror`, if any.
fn take_dl_error() -> Option<String> {
    // SAFETY: dlerror returns NULL or a pointer to a NUL-terminated string
    // owned by the loader, valid until the next dl* call on this thread.
    let error = unsafe { libc::dlerror() };
    if error.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(error) }.to_string_lossy().into_owned())
}

/// Terminal failure: one diagnostic line on stdout, then abort. The host
/// process goes down with the shim; there is no degraded mode.
fn fatal(err: &ResolveError) -> ! {
    tracing::error!(error = %err, "resolution failed, aborting");
    let mut out = std::io::stdout().lock();
    let _ = writeln!(out, "glog-trace: {err}");
    let _ = out.flush();
    std::process::abort();
}
