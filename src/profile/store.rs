//! Profile creation, existence checks and enumeration.
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    desktop::DesktopEntryWriter,
    lib::{
        errors::ProfileError,
        fs::{self as profile_fs, SeedStatus},
    },
};

use super::{render_config_py, Profile, CONFIG_FILE_NAME};

/// Operations on profile directory trees.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    desktop: DesktopEntryWriter,
    browser_config_dir: PathBuf,
    browser_data_dir: PathBuf,
}

impl ProfileStore {
    pub fn new(
        desktop: DesktopEntryWriter,
        browser_config_dir: impl Into<PathBuf>,
        browser_data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            desktop,
            browser_config_dir: browser_config_dir.into(),
            browser_data_dir: browser_data_dir.into(),
        }
    }

    pub fn desktop(&self) -> &DesktopEntryWriter {
        &self.desktop
    }

    /// The browser's own data directory, which holds its saved sessions.
    pub fn browser_data_dir(&self) -> &Path {
        &self.browser_data_dir
    }

    /// Create the profile's directory tree and seed its `config.py`.
    ///
    /// `overwrite` only tolerates a pre-existing root; an existing `config.py`
    /// is never replaced.
    pub fn create(
        &self,
        profile: &Profile,
        home_page: Option<&str>,
        write_desktop_file: bool,
        overwrite: bool,
    ) -> Result<Profile, ProfileError> {
        if profile.root().exists() && !overwrite {
            return Err(ProfileError::AlreadyExists {
                root: profile.root().to_path_buf(),
            });
        }

        profile_fs::create_dir_tree(&profile.config_dir())?;
        profile_fs::create_dir_tree(&profile.data_dir())?;

        let main_config_path = self.browser_config_dir.join(CONFIG_FILE_NAME);
        let main_config = main_config_path
            .is_file()
            .then_some(main_config_path.as_path());
        let content = render_config_py(profile, home_page, main_config);
        let status = profile_fs::write_new_file(&profile.config_file(), &content)?;
        if status == SeedStatus::SkippedExisting {
            debug!(
                target: "qbpm::profile",
                path = %profile.config_file().display(),
                "Keeping existing config.py"
            );
        }

        info!(
            target: "qbpm::profile",
            profile = profile.name(),
            root = %profile.root().display(),
            overwrite,
            "Created profile"
        );

        if write_desktop_file {
            self.desktop.write_profile_entry(profile)?;
        }

        Ok(profile.clone())
    }

    /// True iff the profile root is a directory.
    pub fn exists(&self, profile: &Profile) -> bool {
        profile.exists()
    }

    /// Make sure the profile exists, creating it with defaults when allowed.
    ///
    /// Returns whether the profile was created by this call.
    pub fn ensure_exists(
        &self,
        profile: &Profile,
        create_if_missing: bool,
    ) -> Result<bool, ProfileError> {
        if self.exists(profile) {
            return Ok(false);
        }
        if !create_if_missing {
            return Err(ProfileError::NotFound {
                name: profile.name().to_string(),
                root: profile.root().to_path_buf(),
            });
        }

        self.create(profile, None, false, false)?;
        Ok(true)
    }

    /// Names of the profiles under `base_dir`, sorted.
    pub fn list(&self, base_dir: &Path) -> Result<Vec<String>, ProfileError> {
        profile_fs::list_subdirectories(base_dir)
    }
}
