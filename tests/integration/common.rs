#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use qbpm::{desktop::DesktopEntryWriter, profile::ProfileStore};

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_qbpm");

/// Store whose browser and desktop directories all live under `root`.
pub fn store_in(root: &Path) -> ProfileStore {
    ProfileStore::new(
        DesktopEntryWriter::new(root.join("applications"), "qbpm", "qutebrowser"),
        root.join("qb-config"),
        root.join("qb-data"),
    )
}

pub fn profiles_dir(root: &Path) -> PathBuf {
    root.join("profiles")
}

/// Write an executable `/bin/sh` script standing in for the browser.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::{io::Write, os::unix::fs::PermissionsExt};

    let path = dir.join(name);
    {
        let mut file = fs::File::create(&path).expect("can create script");
        file.write_all(format!("#!/bin/sh\n{body}\n").as_bytes())
            .expect("can write script");
        file.sync_all().expect("can sync script");
    }
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("can chmod script");
    path
}

/// Write a config file pointing every directory into `root`.
pub fn write_config(root: &Path, browser: &str, grace_period_ms: u64) -> PathBuf {
    let path = root.join("qbpm.toml");
    let body = format!(
        "[profiles]\ndir = {profiles:?}\n\n\
         [browser]\nbinary = {browser:?}\nconfig_dir = {config:?}\ndata_dir = {data:?}\n\n\
         [desktop]\napplication_dir = {apps:?}\n\n\
         [launch]\ngrace_period_ms = {grace_period_ms}\n",
        profiles = profiles_dir(root).display().to_string(),
        config = root.join("qb-config").display().to_string(),
        data = root.join("qb-data").display().to_string(),
        apps = root.join("applications").display().to_string(),
    );
    fs::write(&path, body).expect("can write config");
    path
}

/// `qbpm` with a hermetic environment rooted at `root`.
pub fn qbpm(root: &Path, config: &Path) -> Command {
    let mut command = Command::new(BINARY_PATH);
    command
        .arg("--config")
        .arg(config)
        .env("HOME", root)
        .env("XDG_DATA_HOME", root.join("xdg-data"))
        .env("XDG_CONFIG_HOME", root.join("xdg-config"))
        .env_remove("QBPM_PROFILE_DIR")
        .env_remove("QBPM_CONFIG_PATH")
        .env_remove("RUST_LOG");
    command
}
