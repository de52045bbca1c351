//! Profile descriptor, on-disk layout and lifecycle operations.
use std::path::{Path, PathBuf};

use crate::lib::errors::ProfileError;

mod config_py;
pub mod session;
pub mod store;

pub use config_py::render_config_py;
pub use session::{resolve_session_source, SessionSource, AUTOSAVE_SESSION_FILE};
pub use store::ProfileStore;

/// Name of the seeded configuration file inside `config_dir`.
pub const CONFIG_FILE_NAME: &str = "config.py";

/// A named, isolated browser profile rooted at `base_dir/name`.
///
/// This is a pure descriptor: constructing one touches no files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    base_dir: PathBuf,
    root: PathBuf,
    tag_process: bool,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        base_dir: impl Into<PathBuf>,
        tag_process: bool,
    ) -> Result<Self, ProfileError> {
        let name = name.into();
        validate_name(&name)?;
        let base_dir = base_dir.into();
        let root = base_dir.join(&name);
        Ok(Self {
            name,
            base_dir,
            root,
            tag_process,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the launch binds the window/app identifier to the profile name.
    pub fn tag_process(&self) -> bool {
        self.tag_process
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join("config")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn sessions_dir(&self) -> PathBuf {
        self.data_dir().join("sessions")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join(CONFIG_FILE_NAME)
    }

    /// The session slot the browser restores on its next start.
    pub fn autosave_session(&self) -> PathBuf {
        self.sessions_dir().join(AUTOSAVE_SESSION_FILE)
    }

    /// True iff the profile root is a directory.
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Browser arguments binding an invocation to this profile's directories.
    pub fn browser_args(&self) -> Vec<String> {
        let mut args = vec![
            "--basedir".to_string(),
            self.root.to_string_lossy().into_owned(),
            "--config-py".to_string(),
            self.config_file().to_string_lossy().into_owned(),
            "--qt-arg".to_string(),
            "name".to_string(),
            self.name.clone(),
        ];
        if self.tag_process {
            args.push("--desktop-file-name".to_string());
            args.push(self.name.clone());
        }
        args
    }
}

fn validate_name(name: &str) -> Result<(), ProfileError> {
    let reason = if name.is_empty() {
        Some("name must not be empty")
    } else if name == "." || name == ".." {
        Some("name must not be `.` or `..`")
    } else if name.contains('/') || name.contains('\\') {
        Some("name must not contain path separators")
    } else if name.contains('\0') {
        Some("name must not contain NUL bytes")
    } else if name.trim() != name {
        Some("name must not start or end with whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ProfileError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
