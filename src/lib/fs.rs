//! Filesystem helpers for profile trees, seeded files and desktop entries.

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::lib::errors::ProfileError;

/// Outcome of `write_new_file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStatus {
    Written,
    SkippedExisting,
}

/// Recursively create a directory; existing directories are accepted.
pub fn create_dir_tree(path: &Path) -> Result<(), ProfileError> {
    fs::create_dir_all(path).map_err(|source| ProfileError::io(path, source))
}

/// Create a single directory whose parent already exists.
///
/// With `exist_ok`, an existing directory is accepted; otherwise it is an
/// `AlreadyExists` error.
pub fn create_dir(path: &Path, exist_ok: bool) -> Result<(), ProfileError> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && exist_ok && path.is_dir() => {
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            Err(ProfileError::AlreadyExists {
                root: path.to_path_buf(),
            })
        }
        Err(source) => Err(ProfileError::io(path, source)),
    }
}

/// Write `content` to `path` only if the file does not exist yet.
///
/// Existing files are never truncated, so a user-edited file survives.
pub fn write_new_file(path: &Path, content: &str) -> Result<SeedStatus, ProfileError> {
    let file = OpenOptions::new().write(true).create_new(true).open(path);
    let mut file = match file {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            return Ok(SeedStatus::SkippedExisting)
        }
        Err(source) => return Err(ProfileError::io(path, source)),
    };
    file.write_all(content.as_bytes())
        .map_err(|source| ProfileError::io(path, source))?;
    Ok(SeedStatus::Written)
}

/// Write `content` to `path`, creating parents and replacing any prior file.
pub fn write_replacing(path: &Path, content: &str) -> Result<(), ProfileError> {
    if let Some(parent) = path.parent() {
        create_dir_tree(parent)?;
    }
    fs::write(path, content.as_bytes()).map_err(|source| ProfileError::io(path, source))
}

/// Copy `source` to `destination` byte-for-byte, replacing the destination.
pub fn copy_file(source: &Path, destination: &Path) -> Result<u64, ProfileError> {
    fs::copy(source, destination).map_err(|err| ProfileError::io(source, err))
}

/// Names of the directories directly under `base`, sorted.
///
/// A missing `base` yields an empty list.
pub fn list_subdirectories(base: &Path) -> Result<Vec<String>, ProfileError> {
    if !base.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(base).map_err(|source| ProfileError::io(base, source))? {
        let entry = entry.map_err(|source| ProfileError::io(base, source))?;
        let path: PathBuf = entry.path();
        if path.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
