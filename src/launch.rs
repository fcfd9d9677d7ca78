//! Launcher for running a target command with the shim preloaded.
//!
//! `glog-trace --levels critical,warning -- some-gtk-app --flag` discovers
//! `libglog_trace.so`, merges it into `LD_PRELOAD`, maps the filter flags
//! onto the shim's env vars and execs the target. The shim itself never
//! needs the launcher; `LD_PRELOAD` by hand works the same.

use std::env;
use std::ffi::{OsStr, OsString};
use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, bail};
use clap::Parser;

use crate::filter::LevelFilter;

/// File name of the interposer shared object produced by this package.
pub const SHIM_FILE_NAME: &str = "libglog_trace.so";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct LaunchArgs {
    /// Comma-separated severity names to trace (error, critical, warning, message, info, debug)
    #[arg(long, env = "GLIB_LEVELS_FILTER")]
    pub levels: Option<String>,

    /// Comma-separated log domains to trace (exact, case-sensitive)
    #[arg(long, env = "GLIB_DOMAIN_FILTERS")]
    pub domains: Option<String>,

    /// Path to libglog_trace.so (discovered next to this binary if unset)
    #[arg(long, env = "GLOG_TRACE_SHIM")]
    pub shim: Option<PathBuf>,

    /// Command to run under the shim
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<OsString>,
}

pub fn main() -> anyhow::Result<()> {
    run(LaunchArgs::parse())
}

fn run(args: LaunchArgs) -> anyhow::Result<()> {
    warn_unknown_levels(args.levels.as_deref());

    let shim = locate_shim(args.shim.as_deref())?;
    let preload = merge_preload(&shim, env::var_os("LD_PRELOAD").as_deref());
    let mut child = build_command(&args, &preload)?;

    let program = child.get_program().to_string_lossy().into_owned();
    tracing::debug!(shim = %shim.display(), program, "execing target under LD_PRELOAD");
    // exec only returns on failure; on success the target replaces us.
    let err = child.exec();
    Err(err).with_context(|| format!("Failed to exec {program}"))
}

/// Maps the launcher flags onto the env vars the shim reads at load time.
fn build_command(args: &LaunchArgs, preload: &OsStr) -> anyhow::Result<Command> {
    let (program, program_args) = args
        .command
        .split_first()
        .context("No command to run under the shim")?;

    let mut child = Command::new(program);
    child.args(program_args).env("LD_PRELOAD", preload);
    if let Some(levels) = &args.levels {
        child.env("GLIB_LEVELS_FILTER", levels);
    }
    if let Some(domains) = &args.domains {
        child.env("GLIB_DOMAIN_FILTERS", domains);
    }
    Ok(child)
}

/// The shim stays silently permissive; the launcher is the place to tell
/// a user their `--levels` list contains a typo.
fn warn_unknown_levels(levels: Option<&str>) {
    let Some(list) = levels else {
        return;
    };
    for token in list.split(',') {
        if !token.is_empty() && !LevelFilter::is_known_name(token) {
            eprintln!("glog-trace: ignoring unknown severity '{token}'");
        }
    }
}

/// Explicit path (flag or `GLOG_TRACE_SHIM`) wins; otherwise the shared
/// object is expected next to the launcher, where cargo places both.
fn locate_shim(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("Shim not found at {}", path.display());
        }
        return Ok(path.to_path_buf());
    }
    let exe = env::current_exe().context("Cannot locate the launcher executable")?;
    exe.parent()
        .map(|dir| dir.join(SHIM_FILE_NAME))
        .filter(|candidate| candidate.exists())
        .with_context(|| {
            format!("{SHIM_FILE_NAME} not found next to the launcher; build it or pass --shim")
        })
}

/// Prepend the shim to `LD_PRELOAD`, preserving whatever was there.
fn merge_preload(shim: &Path, existing: Option<&OsStr>) -> OsString {
    let mut merged = shim.as_os_str().to_owned();
    if let Some(current) = existing {
        if !current.is_empty() {
            merged.push(":");
            merged.push(current);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preload_without_existing_value_is_the_shim() {
        let merged = merge_preload(Path::new("/tmp/libglog_trace.so"), None);

        assert_eq!(merged, OsString::from("/tmp/libglog_trace.so"));
    }

    #[test]
    fn preload_with_empty_existing_value_is_the_shim() {
        let merged = merge_preload(Path::new("/tmp/libglog_trace.so"), Some(OsStr::new("")));

        assert_eq!(merged, OsString::from("/tmp/libglog_trace.so"));
    }

    #[test]
    fn preload_prepends_before_existing_entries() {
        let merged = merge_preload(
            Path::new("/tmp/libglog_trace.so"),
            Some(OsStr::new("/usr/lib/libother.so")),
        );

        assert_eq!(
            merged,
            OsString::from("/tmp/libglog_trace.so:/usr/lib/libother.so")
        );
    }

    #[test]
    fn explicit_shim_path_must_exist() {
        let missing = Path::new("/nonexistent/libglog_trace.so");

        assert!(locate_shim(Some(missing)).is_err());
    }

    #[test]
    fn explicit_shim_path_is_taken_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let shim = dir.path().join(SHIM_FILE_NAME);
        std::fs::write(&shim, b"").unwrap();

        assert_eq!(locate_shim(Some(&shim)).unwrap(), shim);
    }

    #[test]
    fn child_env_carries_filters_and_preload() {
        let args = LaunchArgs {
            levels: Some("warning".to_string()),
            domains: Some("Gtk".to_string()),
            shim: None,
            command: vec![OsString::from("true")],
        };

        let child = build_command(&args, OsStr::new("/tmp/libglog_trace.so")).unwrap();

        let env: Vec<_> = child.get_envs().collect();
        assert_eq!(child.get_program(), "true");
        assert!(env.contains(&(
            OsStr::new("LD_PRELOAD"),
            Some(OsStr::new("/tmp/libglog_trace.so"))
        )));
        assert!(env.contains(&(OsStr::new("GLIB_LEVELS_FILTER"), Some(OsStr::new("warning")))));
        assert!(env.contains(&(OsStr::new("GLIB_DOMAIN_FILTERS"), Some(OsStr::new("Gtk")))));
    }

    #[test]
    fn unset_filters_are_not_forced_on_the_child() {
        let args = LaunchArgs {
            levels: None,
            domains: None,
            shim: None,
            command: vec![OsString::from("true")],
        };

        let child = build_command(&args, OsStr::new("/tmp/libglog_trace.so")).unwrap();

        assert!(
            !child
                .get_envs()
                .any(|(key, _)| key == "GLIB_LEVELS_FILTER" || key == "GLIB_DOMAIN_FILTERS")
        );
    }

    #[test]
    fn command_line_requires_a_command() {
        assert!(LaunchArgs::try_parse_from(["glog-trace"]).is_err());
    }

    #[test]
    fn command_line_passes_target_flags_through() {
        let args = LaunchArgs::try_parse_from([
            "glog-trace",
            "--levels",
            "warning",
            "gtk4-demo",
            "--run",
            "main",
        ])
        .unwrap();

        assert_eq!(args.levels.as_deref(), Some("warning"));
        assert_eq!(
            args.command,
            vec![
                OsString::from("gtk4-demo"),
                OsString::from("--run"),
                OsString::from("main"),
            ]
        );
    }
}
