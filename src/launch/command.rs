//! Shared helpers for building browser commands.

use std::{
    path::Path,
    process::{Command, Stdio},
};

use crate::profile::Profile;

/// Argument vector for launching `browser` bound to `profile`.
///
/// `extra_args` are appended verbatim after the profile flags.
pub fn browser_argv(profile: &Profile, extra_args: &[String]) -> Vec<String> {
    let mut args = profile.browser_args();
    args.extend(extra_args.iter().cloned());
    args
}

/// Build the command that replaces this process in the foreground.
pub fn build_foreground_command(
    browser: &Path,
    profile: &Profile,
    extra_args: &[String],
) -> Command {
    let mut command = Command::new(browser);
    command.args(browser_argv(profile, extra_args));
    command
}

/// Build the detached background command.
///
/// Standard output is discarded and standard error captured so an immediate
/// failure can be surfaced. The child gets its own process group so it
/// survives the invoking terminal.
pub fn build_background_command(
    browser: &Path,
    profile: &Profile,
    extra_args: &[String],
) -> tokio::process::Command {
    let mut command = tokio::process::Command::new(browser);
    command.args(browser_argv(profile, extra_args));
    command.stdin(Stdio::null());
    command.stdout(Stdio::null());
    command.stderr(Stdio::piped());
    command.kill_on_drop(false);
    #[cfg(unix)]
    command.process_group(0);
    command
}
