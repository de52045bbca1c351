//! Run context and config/editor resolution.
use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{anyhow, Context, Result};

use crate::{
    config::{telemetry, AppConfig, ConfigSource, CONFIG_ENV_KEY},
    desktop::DesktopEntryWriter,
    launch::Launcher,
    lib::{errors::ProfileError, paths},
    profile::{Profile, ProfileStore},
};

const DEFAULT_EDITOR: &str = "vim";

/// Where the configuration file is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    /// False only for the implicit default location.
    pub required: bool,
    pub source: ConfigSource,
}

/// Resolve config path in the order: CLI override → env var → default.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<ConfigLocation> {
    resolve_config_path_from(override_path, env::var_os(CONFIG_ENV_KEY))
}

fn resolve_config_path_from(
    override_path: Option<PathBuf>,
    env_path: Option<OsString>,
) -> Result<ConfigLocation> {
    let env_path = env_path.filter(|value| !value.is_empty()).map(PathBuf::from);
    let (path, source) = match (override_path, env_path) {
        (Some(path), _) => (path, ConfigSource::Flag),
        (None, Some(path)) => (path, ConfigSource::Env),
        (None, None) => (paths::default_config_file(), ConfigSource::Default),
    };
    telemetry::log_config_source(&path, source);

    Ok(ConfigLocation {
        path: absolute(paths::expand_home(&path))?,
        required: source != ConfigSource::Default,
        source,
    })
}

fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(cwd.join(path))
}

/// Everything a subcommand needs: the resolved base directory plus the
/// collaborators built from the configuration.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub base_dir: PathBuf,
    pub set_app_id: bool,
    pub config: AppConfig,
}

impl RunContext {
    /// Resolve the profile base directory: `-P` → `QBPM_PROFILE_DIR` →
    /// `profiles.dir` → XDG default. Relative directories are joined to the
    /// current directory so desktop entries can name them from anywhere.
    pub fn new(profile_dir: Option<PathBuf>, set_app_id: bool, config: AppConfig) -> Result<Self> {
        let default = config
            .profiles
            .dir
            .clone()
            .unwrap_or_else(paths::default_profile_dir);
        let base_dir =
            paths::resolve_profile_dir(profile_dir, paths::profile_dir_from_env(), default);
        Ok(Self {
            base_dir: absolute(base_dir)?,
            set_app_id: set_app_id || config.profiles.set_app_id,
            config,
        })
    }

    pub fn profile(&self, name: &str) -> Result<Profile, ProfileError> {
        Profile::new(name, &self.base_dir, self.set_app_id)
    }

    pub fn desktop_writer(&self) -> DesktopEntryWriter {
        DesktopEntryWriter::new(
            &self.config.desktop.application_dir,
            paths::TOOL_NAME,
            &self.config.desktop.icon,
        )
    }

    pub fn store(&self) -> ProfileStore {
        ProfileStore::new(
            self.desktop_writer(),
            &self.config.browser.config_dir,
            &self.config.browser.data_dir,
        )
    }

    pub fn launcher(&self) -> Launcher {
        Launcher::new(
            &self.config.browser.binary,
            self.config.launch.grace_period,
        )
    }
}

/// Split the editor command from `$VISUAL`, then `$EDITOR`, then `vim`.
pub fn resolve_editor(visual: Option<String>, editor: Option<String>) -> Result<Vec<String>> {
    let raw = [visual, editor]
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string());
    let words = shell_words::split(&raw).with_context(|| format!("invalid editor command `{raw}`"))?;
    if words.is_empty() {
        return Err(anyhow!("invalid editor command `{raw}`"));
    }
    Ok(words)
}

/// Build the editor invocation for a file.
pub fn editor_command(editor: &[String], file: &Path) -> Command {
    let mut command = Command::new(&editor[0]);
    command.args(&editor[1..]).arg(file);
    command
}
