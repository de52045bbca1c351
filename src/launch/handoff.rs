use std::{io, process::Command};

/// Transfers control of the current process to another program.
///
/// `exec` only returns when the handoff failed; on success the caller's
/// process image is gone.
pub trait ProcessHandoff {
    fn exec(&self, command: Command) -> io::Error;
}

/// Replaces the process image via `execvp` on Unix.
///
/// Elsewhere the program runs with inherited stdio and this process exits
/// with its status.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecHandoff;

impl ProcessHandoff for ExecHandoff {
    #[cfg(unix)]
    fn exec(&self, mut command: Command) -> io::Error {
        use std::os::unix::process::CommandExt;

        command.exec()
    }

    #[cfg(not(unix))]
    fn exec(&self, mut command: Command) -> io::Error {
        match command.status() {
            Ok(status) => std::process::exit(status.code().unwrap_or(1)),
            Err(err) => err,
        }
    }
}
