use std::path::PathBuf;

use serde::Deserialize;

use crate::lib::paths;

/// Profile defaults.
#[derive(Debug, Clone, Default)]
pub struct ProfilesSection {
    /// Base directory used when neither `--profile-dir` nor `QBPM_PROFILE_DIR` is set.
    pub dir: Option<PathBuf>,
    /// Default for `--set-app-id`.
    pub set_app_id: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawProfilesSection {
    pub dir: Option<PathBuf>,
    pub set_app_id: Option<bool>,
}

pub fn parse_profiles_section(raw: Option<RawProfilesSection>) -> ProfilesSection {
    let raw = raw.unwrap_or_default();
    ProfilesSection {
        dir: raw
            .dir
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| paths::expand_home(&dir)),
        set_app_id: raw.set_app_id.unwrap_or(false),
    }
}
