//! XDG desktop entries that re-enter `qbpm` to launch a profile.
//!
//! One entry is written per profile (`<application_dir>/<name>.desktop`) plus an
//! optional chooser entry (`<application_dir>/qbpm.desktop`) that hands an opened
//! URL to whichever profile the user selects. Writing is idempotent: the file is
//! replaced in place.
use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::{
    lib::{errors::ProfileError, fs as entry_fs},
    profile::Profile,
};

/// Desktop-entry categories shared by all generated entries.
pub const CATEGORIES: &[&str] = &["Network"];

/// Contents of a single desktop entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    pub name: String,
    pub icon: String,
    pub exec: Vec<String>,
    pub categories: Vec<String>,
    pub terminal: bool,
    pub startup_notify: bool,
}

impl DesktopEntry {
    /// Render the entry as a `[Desktop Entry]` group.
    pub fn render(&self) -> String {
        let exec = self
            .exec
            .iter()
            .map(|arg| exec_arg(arg))
            .collect::<Vec<_>>()
            .join(" ");
        let categories = self
            .categories
            .iter()
            .map(|category| format!("{};", escape_value(category)))
            .collect::<String>();

        let mut out = String::from("[Desktop Entry]\n");
        let _ = writeln!(out, "Type=Application");
        let _ = writeln!(out, "Name={}", escape_value(&self.name));
        let _ = writeln!(out, "Icon={}", escape_value(&self.icon));
        let _ = writeln!(out, "Exec={}", escape_value(&exec));
        let _ = writeln!(out, "Categories={categories}");
        let _ = writeln!(out, "Terminal={}", self.terminal);
        let _ = writeln!(out, "StartupNotify={}", self.startup_notify);
        out
    }
}

/// Outcome of a desktop entry write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopEntryStatus {
    Written { path: PathBuf },
    ProfileMissing { root: PathBuf },
}

/// Writes desktop entries into a fixed per-user application directory.
#[derive(Debug, Clone)]
pub struct DesktopEntryWriter {
    application_dir: PathBuf,
    tool: String,
    icon: String,
}

impl DesktopEntryWriter {
    pub fn new(
        application_dir: impl Into<PathBuf>,
        tool: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            application_dir: application_dir.into(),
            tool: tool.into(),
            icon: icon.into(),
        }
    }

    pub fn profile_entry_path(&self, profile: &Profile) -> PathBuf {
        self.application_dir
            .join(format!("{}.desktop", profile.name()))
    }

    pub fn chooser_entry_path(&self) -> PathBuf {
        self.application_dir.join(format!("{}.desktop", self.tool))
    }

    /// Entry relaunching this tool bound to `profile`. The name follows
    /// `--` so it is never read as a flag.
    pub fn profile_entry(&self, profile: &Profile) -> DesktopEntry {
        let mut exec = vec![
            self.tool.clone(),
            "--profile-dir".to_string(),
            profile.base_dir().to_string_lossy().into_owned(),
        ];
        if profile.tag_process() {
            exec.push("--set-app-id".to_string());
        }
        exec.extend([
            "launch".to_string(),
            "--".to_string(),
            profile.name().to_string(),
            "%u".to_string(),
        ]);
        self.entry(format!("{} (qutebrowser profile)", profile.name()), exec)
    }

    /// Entry prompting for a profile before opening the URL.
    pub fn chooser_entry(&self) -> DesktopEntry {
        let exec = vec![self.tool.clone(), "choose".to_string(), "%u".to_string()];
        self.entry(self.tool.clone(), exec)
    }

    fn entry(&self, name: String, exec: Vec<String>) -> DesktopEntry {
        DesktopEntry {
            name,
            icon: self.icon.clone(),
            exec,
            categories: CATEGORIES.iter().map(|c| c.to_string()).collect(),
            terminal: false,
            startup_notify: true,
        }
    }

    /// Write the entry for an existing profile.
    ///
    /// Missing profiles are logged and skipped; no file is written.
    pub fn write_profile_entry(
        &self,
        profile: &Profile,
    ) -> Result<DesktopEntryStatus, ProfileError> {
        if !profile.exists() {
            warn!(
                target: "qbpm::desktop",
                profile = profile.name(),
                root = %profile.root().display(),
                "Profile not found; skipping desktop entry"
            );
            return Ok(DesktopEntryStatus::ProfileMissing {
                root: profile.root().to_path_buf(),
            });
        }

        let path = self.profile_entry_path(profile);
        self.write(&path, &self.profile_entry(profile))
    }

    /// Write the chooser entry.
    pub fn write_chooser_entry(&self) -> Result<DesktopEntryStatus, ProfileError> {
        let path = self.chooser_entry_path();
        self.write(&path, &self.chooser_entry())
    }

    fn write(&self, path: &Path, entry: &DesktopEntry) -> Result<DesktopEntryStatus, ProfileError> {
        entry_fs::write_replacing(path, &entry.render())?;
        info!(
            target: "qbpm::desktop",
            path = %path.display(),
            "Wrote desktop entry"
        );
        Ok(DesktopEntryStatus::Written {
            path: path.to_path_buf(),
        })
    }
}

/// Characters that force an Exec argument to be quoted.
const RESERVED: &[char] = &[
    ' ', '\t', '\n', '"', '\'', '\\', '>', '<', '~', '|', '&', ';', '$', '*', '?', '#', '(',
    ')', '`',
];

/// Field codes expanded by the desktop environment.
const FIELD_CODES: &[&str] = &["%u", "%U", "%f", "%F"];

fn exec_arg(arg: &str) -> String {
    if FIELD_CODES.contains(&arg) {
        return arg.to_string();
    }
    quote_exec_arg(&arg.replace('%', "%%"))
}

fn quote_exec_arg(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains(RESERVED) {
        return arg.to_string();
    }
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for ch in arg.chars() {
        if matches!(ch, '"' | '`' | '$' | '\\') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

fn escape_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\t', "\\t")
        .replace('\r', "\\r")
}
