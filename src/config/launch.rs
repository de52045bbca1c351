use std::{path::Path, time::Duration};

use serde::Deserialize;

use crate::{lib::errors::ConfigError, menu::MenuProgram};

pub const DEFAULT_GRACE_PERIOD_MS: u64 = 100;
pub const MAX_GRACE_PERIOD_MS: u64 = 10_000;

/// Background launch supervision.
#[derive(Debug, Clone)]
pub struct LaunchSection {
    /// How long a background browser is watched for an immediate exit.
    pub grace_period: Duration,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawLaunchSection {
    pub grace_period_ms: Option<u64>,
}

/// Menu used by `qbpm choose` when `--menu` is not given.
#[derive(Debug, Clone, Default)]
pub struct MenuSection {
    /// `None` means auto-detect.
    pub program: Option<MenuProgram>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawMenuSection {
    pub program: Option<String>,
}

pub fn parse_launch_section(
    raw: Option<RawLaunchSection>,
    path: &Path,
) -> Result<LaunchSection, ConfigError> {
    let millis = raw
        .and_then(|raw| raw.grace_period_ms)
        .unwrap_or(DEFAULT_GRACE_PERIOD_MS);
    if millis == 0 || millis > MAX_GRACE_PERIOD_MS {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "launch.grace_period_ms",
            message: format!("Use a value between 1 and {MAX_GRACE_PERIOD_MS}"),
        });
    }

    Ok(LaunchSection {
        grace_period: Duration::from_millis(millis),
    })
}

pub fn parse_menu_section(
    raw: Option<RawMenuSection>,
    path: &Path,
) -> Result<MenuSection, ConfigError> {
    let program = match raw.and_then(|raw| raw.program) {
        None => None,
        Some(value) if value.trim().is_empty() => None,
        Some(value) => Some(value.parse::<MenuProgram>().map_err(|err| {
            ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "menu.program",
                message: err.to_string(),
            }
        })?),
    };

    Ok(MenuSection { program })
}
