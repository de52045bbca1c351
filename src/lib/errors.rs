use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;

/// Errors that can occur while loading or validating the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures of profile creation, lookup and session import.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid profile name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },
    #[error("profile already exists at {root}")]
    AlreadyExists { root: PathBuf },
    #[error("profile {name} not found at {root}")]
    NotFound { name: String, root: PathBuf },
    #[error("{path} is not a file")]
    SessionNotFound { path: PathBuf },
    #[error("I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProfileError {
    /// Wrap an `io::Error` with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Suggested next step shown under the error message.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            ProfileError::AlreadyExists { .. } => {
                Some("pass --overwrite to reuse the existing profile directory")
            }
            ProfileError::NotFound { .. } => {
                Some("create it with `qbpm new <profile>` or launch with `--new`")
            }
            ProfileError::SessionNotFound { .. } => {
                Some("pass a path ending in .yml or the name of a saved qutebrowser session")
            }
            ProfileError::InvalidName { .. } | ProfileError::Io { .. } => None,
        }
    }
}

/// Failures while handing a profile over to the browser process.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to exec {program}: {source}")]
    Exec {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("browser exited immediately (exit={code:?}): {}", stderr.trim_end())]
    EarlyExit { code: Option<i32>, stderr: String },
}

/// Failures of interactive profile selection.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("{name} is not a valid menu program, please specify one of rofi, dmenu, or applescript")]
    InvalidMenuSelection { name: String },
    #[error("menu {name} cannot be used on a {platform} host")]
    Unsupported {
        name: &'static str,
        platform: &'static str,
    },
    #[error("{name} not found on path")]
    NotInstalled { name: &'static str },
    #[error("no suitable menu program found, please install rofi or dmenu")]
    NoMenuFound,
    #[error("menu {name} failed: {source}")]
    Io {
        name: &'static str,
        #[source]
        source: io::Error,
    },
}
