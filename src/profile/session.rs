//! Profiles derived from saved browser sessions.
use std::path::{Path, PathBuf};

use tracing::info;

use crate::lib::{errors::ProfileError, fs as profile_fs, paths};

use super::{Profile, ProfileStore};

/// File the browser restores as its session on next start.
pub const AUTOSAVE_SESSION_FILE: &str = "_autosave.yml";
/// Extension of session files written by the browser.
pub const SESSION_EXTENSION: &str = ".yml";

/// A resolved session file and the profile name it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSource {
    pub path: PathBuf,
    pub default_name: String,
}

/// Resolve `source` into a session file.
///
/// A value ending in `.yml` is a path (with `~` expansion) and its file stem
/// names the profile. Anything else is the name of a session saved in
/// `<browser_data_dir>/sessions`.
pub fn resolve_session_source(source: &str, browser_data_dir: &Path) -> SessionSource {
    if source.ends_with(SESSION_EXTENSION) {
        let path = paths::expand_home(Path::new(source));
        let default_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        return SessionSource { path, default_name };
    }

    SessionSource {
        path: browser_data_dir
            .join("sessions")
            .join(format!("{source}{SESSION_EXTENSION}")),
        default_name: source.to_string(),
    }
}

impl ProfileStore {
    /// Create a profile whose first start restores the given session.
    pub fn import_session(
        &self,
        source: &str,
        profile_name: Option<&str>,
        base_dir: &Path,
        tag_process: bool,
        write_desktop_file: bool,
        overwrite: bool,
    ) -> Result<Profile, ProfileError> {
        let session = resolve_session_source(source, self.browser_data_dir());
        if !session.path.is_file() {
            return Err(ProfileError::SessionNotFound { path: session.path });
        }

        let name = profile_name.unwrap_or(&session.default_name);
        let profile = Profile::new(name, base_dir, tag_process)?;
        self.create(&profile, None, write_desktop_file, overwrite)?;

        let sessions_dir = profile.sessions_dir();
        profile_fs::create_dir(&sessions_dir, overwrite)?;
        let bytes = profile_fs::copy_file(&session.path, &profile.autosave_session())?;

        info!(
            target: "qbpm::session",
            profile = profile.name(),
            session = %session.path.display(),
            bytes,
            "Imported session into profile"
        );

        Ok(profile)
    }
}
