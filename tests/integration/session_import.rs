use std::fs;

use qbpm::lib::errors::ProfileError;
use tempfile::tempdir;

use crate::common::{profiles_dir, store_in};

const SESSION_BYTES: &[u8] = b"windows:\n- tabs:\n  - history:\n    - url: https://example.com\n\xff\x00tail";

#[test]
fn import_from_path_copies_session_byte_for_byte() {
    let temp = tempdir().expect("can create temp directory");
    let store = store_in(temp.path());
    let session = temp.path().join("reading.yml");
    fs::write(&session, SESSION_BYTES).expect("can write session");

    let profile = store
        .import_session(
            &session.to_string_lossy(),
            None,
            &profiles_dir(temp.path()),
            false,
            false,
            false,
        )
        .expect("import succeeds");

    assert_eq!(profile.name(), "reading");
    assert_eq!(
        fs::read(profile.autosave_session()).expect("autosave exists"),
        SESSION_BYTES
    );
    assert!(profile.config_file().is_file());
}

#[test]
fn import_by_name_reads_browser_sessions_and_honours_profile_name() {
    let temp = tempdir().expect("can create temp directory");
    let store = store_in(temp.path());
    let sessions = temp.path().join("qb-data/sessions");
    fs::create_dir_all(&sessions).expect("can create sessions dir");
    fs::write(sessions.join("research.yml"), SESSION_BYTES).expect("can write session");

    let profile = store
        .import_session(
            "research",
            Some("thesis"),
            &profiles_dir(temp.path()),
            true,
            true,
            false,
        )
        .expect("import succeeds");

    assert_eq!(profile.name(), "thesis");
    assert!(profile.tag_process());
    assert!(profile.autosave_session().is_file());
    assert!(temp.path().join("applications/thesis.desktop").is_file());
}

#[test]
fn missing_session_creates_nothing() {
    let temp = tempdir().expect("can create temp directory");
    let store = store_in(temp.path());

    let err = store
        .import_session(
            "absent",
            None,
            &profiles_dir(temp.path()),
            false,
            false,
            false,
        )
        .expect_err("session does not exist");

    match err {
        ProfileError::SessionNotFound { path } => {
            assert_eq!(path, temp.path().join("qb-data/sessions/absent.yml"))
        }
        other => panic!("Unexpected error: {other:?}"),
    }
    assert!(!profiles_dir(temp.path()).exists());
}

#[test]
fn reimport_requires_overwrite_and_keeps_other_session_files() {
    let temp = tempdir().expect("can create temp directory");
    let store = store_in(temp.path());
    let base = profiles_dir(temp.path());
    let first = temp.path().join("first.yml");
    let second = temp.path().join("second.yml");
    fs::write(&first, "first").expect("can write session");
    fs::write(&second, "second").expect("can write session");

    let profile = store
        .import_session(&first.to_string_lossy(), Some("work"), &base, false, false, false)
        .expect("first import succeeds");
    fs::write(profile.sessions_dir().join("saved.yml"), "keep").expect("can write extra session");

    let err = store
        .import_session(&second.to_string_lossy(), Some("work"), &base, false, false, false)
        .expect_err("profile already exists");
    assert!(matches!(err, ProfileError::AlreadyExists { .. }));

    store
        .import_session(&second.to_string_lossy(), Some("work"), &base, false, false, true)
        .expect("overwrite import succeeds");

    assert_eq!(
        fs::read_to_string(profile.autosave_session()).expect("autosave exists"),
        "second"
    );
    assert_eq!(
        fs::read_to_string(profile.sessions_dir().join("saved.yml")).expect("extra kept"),
        "keep"
    );
}
