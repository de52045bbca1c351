//! Load and validate the tool configuration file.
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, error};

use crate::lib::errors::ConfigError;

pub mod browser;
pub mod launch;
pub mod profiles;
pub mod telemetry;

pub use browser::{
    parse_browser_section, parse_desktop_section, BrowserSection, DesktopSection,
    RawBrowserSection, RawDesktopSection, DEFAULT_ICON,
};
pub use launch::{
    parse_launch_section, parse_menu_section, LaunchSection, MenuSection, RawLaunchSection,
    RawMenuSection, DEFAULT_GRACE_PERIOD_MS, MAX_GRACE_PERIOD_MS,
};
pub use profiles::{parse_profiles_section, ProfilesSection, RawProfilesSection};

pub const CONFIG_ENV_KEY: &str = "QBPM_CONFIG_PATH";

/// Which input named the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Flag,
    Env,
    Default,
}

/// Top-level configuration container.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub profiles: ProfilesSection,
    pub browser: BrowserSection,
    pub desktop: DesktopSection,
    pub launch: LaunchSection,
    pub menu: MenuSection,
    /// File the values came from; `None` when built-in defaults are used.
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAppConfig {
    profiles: Option<RawProfilesSection>,
    browser: Option<RawBrowserSection>,
    desktop: Option<RawDesktopSection>,
    launch: Option<RawLaunchSection>,
    menu: Option<RawMenuSection>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_raw(RawAppConfig::default(), None)
            .expect("built-in defaults are valid")
    }
}

impl AppConfig {
    /// Load configuration from `path`.
    ///
    /// When `required` is false a missing file yields the built-in defaults;
    /// an explicitly requested file has to exist.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        if !required && !path.exists() {
            debug!(
                target: "qbpm::config",
                path = %path.display(),
                "No configuration file; using defaults"
            );
            return Ok(Self::default());
        }
        Self::load_from_path(path.to_path_buf())
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        debug!(
            target: "qbpm::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "qbpm::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawAppConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "qbpm::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, Some(path.clone())).map_err(|err| {
            error!(
                target: "qbpm::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(raw: RawAppConfig, path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let origin = path.clone().unwrap_or_default();
        let profiles = parse_profiles_section(raw.profiles);
        let browser = parse_browser_section(raw.browser, &origin)?;
        let desktop = parse_desktop_section(raw.desktop, &origin)?;
        let launch = parse_launch_section(raw.launch, &origin)?;
        let menu = parse_menu_section(raw.menu, &origin)?;

        Ok(Self {
            profiles,
            browser,
            desktop,
            launch,
            menu,
            source_path: path,
        })
    }
}
