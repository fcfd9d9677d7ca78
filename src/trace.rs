//! Stack printing for records that pass both filters.
//!
//! Compiled in via the `backtrace` cargo feature (default-on). Without the
//! feature the printer is a no-op and the shim degrades to pure
//! passthrough, keeping every other code path unchanged.

#[cfg(feature = "backtrace")]
use std::io::Write;

/// Walk the current stack and print one line per frame to stdout:
/// `#<index>  <function> + [0x<offset>]`, where the offset is the byte
/// distance of the frame's instruction pointer from the function start.
///
/// Leading frames of the walk itself (unwinder internals, this function)
/// are suppressed, so `#0` is the interception point the host called into.
/// The walk stops early, after a single error line, at the first frame
/// whose function name cannot be resolved.
#[cfg(feature = "backtrace")]
pub fn print_current_stack() {
    let mut out = std::io::stdout().lock();
    let mut index = 0usize;
    let mut in_walk_prologue = true;
    backtrace::trace(|frame| {
        let ip = frame.ip() as usize;
        let mut resolved: Option<(String, usize)> = None;
        backtrace::resolve_frame(frame, |symbol| {
            // Keep the first symbol reported for this frame; inlined
            // siblings would break the one-line-per-frame output.
            if resolved.is_some() {
                return;
            }
            if let Some(name) = symbol.name() {
                let offset = symbol
                    .addr()
                    .map_or(0, |addr| ip.saturating_sub(addr as usize));
                resolved = Some((name.to_string(), offset));
            }
        });
        match resolved {
            Some((name, offset)) => {
                if in_walk_prologue && is_walk_frame(&name) {
                    return true;
                }
                in_walk_prologue = false;
                let _ = writeln!(out, "#{index}  {name} + [0x{offset:08x}]");
                index += 1;
                true
            }
            None => {
                let _ = writeln!(out, "Error getting proc name");
                false
            }
        }
    });
}

/// Whether a demangled symbol belongs to the walk machinery rather than
/// the host: the unwinder entry points and this printer. Only applied to
/// the leading run of frames; the same names deeper in the stack print
/// normally.
#[cfg(feature = "backtrace")]
fn is_walk_frame(name: &str) -> bool {
    name.starts_with("backtrace::")
        || name.starts_with("_Unwind_")
        || name.contains("print_current_stack")
}

/// Stack-walking support not compiled in.
#[cfg(not(feature = "backtrace"))]
pub fn print_current_stack() {}
