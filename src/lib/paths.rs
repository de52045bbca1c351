//! Profile base directory resolution and path helpers.

use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Environment variable overriding the profile base directory.
pub const PROFILE_DIR_ENV: &str = "QBPM_PROFILE_DIR";
/// Directory name of the default profile base under the XDG data home.
pub const DEFAULT_PROFILES_DIR_NAME: &str = "qutebrowser-profiles";
/// Directory name of the browser's own data/config directories.
pub const BROWSER_DIR_NAME: &str = "qutebrowser";
/// Name of this tool, used for desktop entries and its own config directory.
pub const TOOL_NAME: &str = "qbpm";

/// Resolve the profile base directory.
///
/// Resolution order:
/// 1. `explicit` (the `--profile-dir` argument).
/// 2. `env_override` (the value of `QBPM_PROFILE_DIR`).
/// 3. `default`.
///
/// Empty values are skipped. The returned path is not required to exist.
pub fn resolve_profile_dir(
    explicit: Option<PathBuf>,
    env_override: Option<PathBuf>,
    default: PathBuf,
) -> PathBuf {
    explicit
        .filter(|path| !path.as_os_str().is_empty())
        .or_else(|| env_override.filter(|path| !path.as_os_str().is_empty()))
        .map(|path| expand_home(&path))
        .unwrap_or(default)
}

/// Read `QBPM_PROFILE_DIR` from the process environment.
pub fn profile_dir_from_env() -> Option<PathBuf> {
    env_path(env::var_os(PROFILE_DIR_ENV))
}

fn env_path(value: Option<OsString>) -> Option<PathBuf> {
    value
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// `<xdg-data-home>/qutebrowser-profiles`.
pub fn default_profile_dir() -> PathBuf {
    data_home().join(DEFAULT_PROFILES_DIR_NAME)
}

/// `<xdg-data-home>/qutebrowser`, the browser's own data directory.
pub fn default_browser_data_dir() -> PathBuf {
    data_home().join(BROWSER_DIR_NAME)
}

/// `<xdg-config-home>/qutebrowser`, the browser's main configuration directory.
pub fn default_browser_config_dir() -> PathBuf {
    config_home().join(BROWSER_DIR_NAME)
}

/// `<xdg-data-home>/applications/qbpm`.
pub fn default_application_dir() -> PathBuf {
    data_home().join("applications").join(TOOL_NAME)
}

/// `<xdg-config-home>/qbpm/config.toml`.
pub fn default_config_file() -> PathBuf {
    config_home().join(TOOL_NAME).join("config.toml")
}

fn data_home() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| home().join(".local").join("share"))
}

fn config_home() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| home().join(".config"))
}

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Expand a leading `~` or `~/` against the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    expand_home_with(path, dirs::home_dir())
}

fn expand_home_with(path: &Path, home: Option<PathBuf>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}
