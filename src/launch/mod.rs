//! Launching the browser bound to a profile.
//!
//! Two control-transfer contracts exist: the foreground path replaces this
//! process through [`ProcessHandoff::exec`], the background path spawns a
//! detached browser and only watches it for a short grace period.
use std::{path::PathBuf, time::Duration};

use tokio::time;
use tracing::{info, warn};

use crate::{
    lib::{errors::LaunchError, telemetry::LaunchSpan},
    profile::{Profile, ProfileStore},
};

mod command;
mod handoff;

pub use command::{browser_argv, build_background_command, build_foreground_command};
pub use handoff::{ExecHandoff, ProcessHandoff};

pub const DEFAULT_BROWSER: &str = "qutebrowser";
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_millis(100);

/// How a background launch ended from this tool's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Still running after the grace period; left running unsupervised.
    Detached { pid: Option<u32> },
    /// Exited successfully within the grace period.
    Exited { stderr: String },
}

impl LaunchOutcome {
    /// Captured stderr worth showing to the user, if any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            LaunchOutcome::Exited { stderr } if !stderr.is_empty() => Some(stderr.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Launcher<H = ExecHandoff> {
    browser: PathBuf,
    grace_period: Duration,
    handoff: H,
}

impl Launcher<ExecHandoff> {
    pub fn new(browser: impl Into<PathBuf>, grace_period: Duration) -> Self {
        Self::with_handoff(browser, grace_period, ExecHandoff)
    }
}

impl<H: ProcessHandoff> Launcher<H> {
    pub fn with_handoff(browser: impl Into<PathBuf>, grace_period: Duration, handoff: H) -> Self {
        Self {
            browser: browser.into(),
            grace_period,
            handoff,
        }
    }

    /// Launch the browser for `profile`.
    ///
    /// Non-strict launches create a missing profile first; strict ones fail
    /// with `NotFound` before anything is spawned. A foreground launch only
    /// returns on failure.
    pub async fn launch(
        &self,
        store: &ProfileStore,
        profile: &Profile,
        strict: bool,
        foreground: bool,
        extra_args: &[String],
    ) -> Result<LaunchOutcome, LaunchError> {
        store.ensure_exists(profile, !strict)?;

        if foreground {
            return Err(self.exec_foreground(profile, extra_args));
        }
        self.spawn_background(profile, extra_args).await
    }

    /// Replace this process with the browser; returns only the failure.
    pub fn exec_foreground(&self, profile: &Profile, extra_args: &[String]) -> LaunchError {
        let span = LaunchSpan::start(profile.name(), true);
        let command = build_foreground_command(&self.browser, profile, extra_args);
        let source = self.handoff.exec(command);
        span.finish("exec_failed", None, None);
        LaunchError::Exec {
            program: self.browser.clone(),
            source,
        }
    }

    /// Spawn a detached browser and watch it for the grace period.
    pub async fn spawn_background(
        &self,
        profile: &Profile,
        extra_args: &[String],
    ) -> Result<LaunchOutcome, LaunchError> {
        let span = LaunchSpan::start(profile.name(), false);
        let mut command = build_background_command(&self.browser, profile, extra_args);
        let child = command.spawn().map_err(|source| LaunchError::Spawn {
            program: self.browser.clone(),
            source,
        })?;
        let pid = child.id();
        info!(
            target: "qbpm::launch",
            profile = profile.name(),
            pid = pid,
            browser = %self.browser.display(),
            "Spawned browser in background"
        );

        let output = match time::timeout(self.grace_period, child.wait_with_output()).await {
            Err(_) => {
                span.finish("detached", pid, None);
                return Ok(LaunchOutcome::Detached { pid });
            }
            Ok(result) => result.map_err(|source| LaunchError::Wait {
                program: self.browser.clone(),
                source,
            })?,
        };

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let code = output.status.code();
        if output.status.success() {
            span.finish("exited", pid, code);
            return Ok(LaunchOutcome::Exited { stderr });
        }

        warn!(
            target: "qbpm::launch",
            profile = profile.name(),
            exit_code = code,
            "Browser exited within the grace period"
        );
        span.finish("early_exit", pid, code);
        Err(LaunchError::EarlyExit { code, stderr })
    }
}
