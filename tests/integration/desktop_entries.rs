use std::fs;

use qbpm::{desktop::DesktopEntryStatus, profile::Profile};
use tempfile::tempdir;

use crate::common::{profiles_dir, store_in};

fn exec_line(entry: &str) -> Vec<String> {
    let line = entry
        .lines()
        .find_map(|line| line.strip_prefix("Exec="))
        .expect("entry has an Exec line");
    shell_words::split(line).expect("Exec line splits")
}

#[test]
fn missing_profile_gets_no_entry() {
    let temp = tempdir().expect("can create temp directory");
    let store = store_in(temp.path());
    let profile = Profile::new("ghost", profiles_dir(temp.path()), false).expect("valid name");

    let status = store
        .desktop()
        .write_profile_entry(&profile)
        .expect("missing profile is not an error");

    assert_eq!(
        status,
        DesktopEntryStatus::ProfileMissing {
            root: profile.root().to_path_buf()
        }
    );
    assert!(!temp.path().join("applications").exists());
}

#[test]
fn exec_names_the_tool_and_exact_profile() {
    let temp = tempdir().expect("can create temp directory");
    let store = store_in(temp.path());
    let base = profiles_dir(temp.path());
    let profile = Profile::new("my work", &base, true).expect("valid name");
    store
        .create(&profile, None, false, false)
        .expect("create succeeds");

    let status = store
        .desktop()
        .write_profile_entry(&profile)
        .expect("entry is written");

    let path = temp.path().join("applications/my work.desktop");
    assert_eq!(status, DesktopEntryStatus::Written { path: path.clone() });
    let entry = fs::read_to_string(&path).expect("entry exists");
    assert!(entry.contains("\nName=my work (qutebrowser profile)\n"));
    assert_eq!(
        exec_line(&entry),
        vec![
            "qbpm".to_string(),
            "--profile-dir".to_string(),
            base.to_string_lossy().into_owned(),
            "--set-app-id".to_string(),
            "launch".to_string(),
            "--".to_string(),
            "my work".to_string(),
            "%u".to_string(),
        ]
    );
}

#[test]
fn exec_of_dash_prefixed_profile_parses_back_to_that_profile() {
    use clap::Parser;
    use qbpm::cli::{Cli, CliCommand};

    let temp = tempdir().expect("can create temp directory");
    let store = store_in(temp.path());
    let profile = Profile::new("-x", profiles_dir(temp.path()), false).expect("valid name");
    store
        .create(&profile, None, false, false)
        .expect("create succeeds");
    store
        .desktop()
        .write_profile_entry(&profile)
        .expect("entry is written");

    let entry = fs::read_to_string(temp.path().join("applications/-x.desktop"))
        .expect("entry exists");
    let argv: Vec<String> = exec_line(&entry)
        .into_iter()
        .map(|arg| {
            if arg == "%u" {
                "https://example.com".to_string()
            } else {
                arg
            }
        })
        .collect();

    let cli = Cli::try_parse_from(&argv).expect("Exec line parses");
    match cli.command {
        CliCommand::Launch(args) => {
            assert_eq!(args.profile_name, "-x");
            assert_eq!(args.qb_args, vec!["https://example.com"]);
        }
        other => panic!("Unexpected command: {other:?}"),
    }
}

#[test]
fn rewriting_an_entry_replaces_it() {
    let temp = tempdir().expect("can create temp directory");
    let store = store_in(temp.path());
    let profile = Profile::new("work", profiles_dir(temp.path()), false).expect("valid name");
    store
        .create(&profile, None, true, false)
        .expect("create succeeds");
    let path = store.desktop().profile_entry_path(&profile);
    fs::write(&path, "stale").expect("can clobber entry");

    store
        .desktop()
        .write_profile_entry(&profile)
        .expect("entry is rewritten");

    let entry = fs::read_to_string(&path).expect("entry exists");
    assert!(entry.starts_with("[Desktop Entry]\n"));
    assert!(!entry.contains("stale"));
}

#[test]
fn chooser_entry_lands_next_to_profile_entries() {
    let temp = tempdir().expect("can create temp directory");
    let store = store_in(temp.path());

    store
        .desktop()
        .write_chooser_entry()
        .expect("chooser is written");

    let entry =
        fs::read_to_string(temp.path().join("applications/qbpm.desktop")).expect("entry exists");
    assert_eq!(exec_line(&entry), vec!["qbpm", "choose", "%u"]);
}
