use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
    launch::DEFAULT_BROWSER,
    lib::{errors::ConfigError, paths},
};

pub const DEFAULT_ICON: &str = "qutebrowser";

/// Browser binary and the browser's own directories.
#[derive(Debug, Clone)]
pub struct BrowserSection {
    pub binary: PathBuf,
    /// Main configuration directory; its `config.py` is sourced by new profiles.
    pub config_dir: PathBuf,
    /// Data directory holding the browser's saved `sessions/`.
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawBrowserSection {
    pub binary: Option<String>,
    pub config_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

/// Desktop entry settings.
#[derive(Debug, Clone)]
pub struct DesktopSection {
    pub application_dir: PathBuf,
    pub icon: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawDesktopSection {
    pub application_dir: Option<PathBuf>,
    pub icon: Option<String>,
}

pub fn parse_browser_section(
    raw: Option<RawBrowserSection>,
    path: &Path,
) -> Result<BrowserSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let binary = match raw.binary {
        Some(binary) if binary.trim().is_empty() => {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "browser.binary",
                message: "Set the browser executable name or path".into(),
            })
        }
        Some(binary) => paths::expand_home(Path::new(binary.trim())),
        None => PathBuf::from(DEFAULT_BROWSER),
    };

    Ok(BrowserSection {
        binary,
        config_dir: expand_or(raw.config_dir, paths::default_browser_config_dir),
        data_dir: expand_or(raw.data_dir, paths::default_browser_data_dir),
    })
}

pub fn parse_desktop_section(
    raw: Option<RawDesktopSection>,
    path: &Path,
) -> Result<DesktopSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let icon = raw.icon.unwrap_or_else(|| DEFAULT_ICON.to_string());
    if icon.trim().is_empty() || icon.contains('\n') {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "desktop.icon",
            message: "Use a single-line icon name or path".into(),
        });
    }

    Ok(DesktopSection {
        application_dir: expand_or(raw.application_dir, paths::default_application_dir),
        icon,
    })
}

fn expand_or(value: Option<PathBuf>, default: fn() -> PathBuf) -> PathBuf {
    value
        .filter(|value| !value.as_os_str().is_empty())
        .map(|value| paths::expand_home(&value))
        .unwrap_or_else(default)
}
