//! Telemetry initialization and launch span helpers.

use std::time::Instant;

use anyhow::Result;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize `tracing` and format developer logs on stderr.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` selects the level
/// (0 = warn, 1 = info, 2+ = debug).
pub fn init_tracing(verbosity: u8) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Span helper recording the start and finish of a browser launch.
pub struct LaunchSpan {
    span: Span,
    started_at: Instant,
}

impl LaunchSpan {
    /// Start a launch span for a profile.
    pub fn start(profile: &str, foreground: bool) -> Self {
        let span = info_span!(target: "qbpm::launch", "launch", profile, foreground);
        Self {
            span,
            started_at: Instant::now(),
        }
    }

    /// Close the span while recording how the launch ended.
    pub fn finish(self, status: &'static str, pid: Option<u32>, exit_code: Option<i32>) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "qbpm::launch",
            status = status,
            pid = pid,
            exit_code = exit_code,
            elapsed_ms = elapsed_ms,
            "Finished browser launch"
        );
    }
}
