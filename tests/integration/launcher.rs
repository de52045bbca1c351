#![cfg(unix)]

use std::{fs, time::Duration};

use qbpm::{
    launch::{LaunchOutcome, Launcher, DEFAULT_GRACE_PERIOD},
    lib::errors::{LaunchError, ProfileError},
    profile::Profile,
};
use tempfile::tempdir;

use crate::common::{profiles_dir, store_in, write_script};

const LONG_GRACE: Duration = Duration::from_secs(5);

#[tokio::test]
async fn strict_launch_of_missing_profile_spawns_nothing() {
    let temp = tempdir().expect("can create temp directory");
    let store = store_in(temp.path());
    let marker = temp.path().join("spawned");
    let browser = write_script(
        temp.path(),
        "browser",
        &format!("touch '{}'", marker.display()),
    );
    let profile = Profile::new("ghost", profiles_dir(temp.path()), false).expect("valid name");

    let err = Launcher::new(&browser, LONG_GRACE)
        .launch(&store, &profile, true, false, &[])
        .await
        .expect_err("strict launch must fail");

    assert!(matches!(
        err,
        LaunchError::Profile(ProfileError::NotFound { .. })
    ));
    assert!(!marker.exists(), "browser must not be spawned");
    assert!(!profile.root().exists());
}

#[tokio::test]
async fn immediate_failure_surfaces_stderr() {
    let temp = tempdir().expect("can create temp directory");
    let store = store_in(temp.path());
    let browser = write_script(temp.path(), "browser", "echo 'bad flag' >&2\nexit 1");
    let profile = Profile::new("work", profiles_dir(temp.path()), false).expect("valid name");

    let err = Launcher::new(&browser, LONG_GRACE)
        .launch(&store, &profile, false, false, &["--nope".to_string()])
        .await
        .expect_err("browser exits nonzero");

    match err {
        LaunchError::EarlyExit { code, stderr } => {
            assert_eq!(code, Some(1));
            assert_eq!(stderr, "bad flag\n");
        }
        other => panic!("Unexpected error: {other:?}"),
    }
    assert!(profile.exists(), "non-strict launch creates the profile first");
}

#[tokio::test]
async fn immediate_failure_is_caught_within_default_grace_period() {
    let temp = tempdir().expect("can create temp directory");
    let store = store_in(temp.path());
    let browser = write_script(temp.path(), "browser", "echo 'bad flag' >&2\nexit 1");
    let profile = Profile::new("work", profiles_dir(temp.path()), false).expect("valid name");

    let err = Launcher::new(&browser, DEFAULT_GRACE_PERIOD)
        .launch(&store, &profile, false, false, &["--nope".to_string()])
        .await
        .expect_err("browser exits nonzero");

    match err {
        LaunchError::EarlyExit { code, stderr } => {
            assert_eq!(code, Some(1));
            assert_eq!(stderr, "bad flag\n");
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn clean_quick_exit_returns_its_stderr() {
    let temp = tempdir().expect("can create temp directory");
    let store = store_in(temp.path());
    let browser = write_script(
        temp.path(),
        "browser",
        "echo 'opened in existing instance' >&2\nexit 0",
    );
    let profile = Profile::new("work", profiles_dir(temp.path()), false).expect("valid name");
    store
        .create(&profile, None, false, false)
        .expect("create succeeds");

    let outcome = Launcher::new(&browser, LONG_GRACE)
        .launch(&store, &profile, true, false, &[])
        .await
        .expect("clean exit is a success");

    assert_eq!(outcome.stderr(), Some("opened in existing instance\n"));
}

#[tokio::test]
async fn long_running_browser_is_detached() {
    let temp = tempdir().expect("can create temp directory");
    let store = store_in(temp.path());
    let browser = write_script(temp.path(), "browser", "sleep 2");
    let profile = Profile::new("work", profiles_dir(temp.path()), false).expect("valid name");

    let outcome = Launcher::new(&browser, Duration::from_millis(100))
        .launch(&store, &profile, false, false, &[])
        .await
        .expect("still running counts as success");

    assert!(matches!(outcome, LaunchOutcome::Detached { pid: Some(_) }));
}

#[tokio::test]
async fn browser_receives_profile_flags_then_extra_args() {
    let temp = tempdir().expect("can create temp directory");
    let store = store_in(temp.path());
    let argv_file = temp.path().join("argv");
    let browser = write_script(
        temp.path(),
        "browser",
        &format!("printf '%s\\n' \"$@\" > '{}'", argv_file.display()),
    );
    let profile = Profile::new("work", profiles_dir(temp.path()), true).expect("valid name");

    Launcher::new(&browser, LONG_GRACE)
        .launch(
            &store,
            &profile,
            false,
            false,
            &["--target".to_string(), "window".to_string()],
        )
        .await
        .expect("launch succeeds");

    let argv = fs::read_to_string(&argv_file).expect("script recorded argv");
    let expected = [
        "--basedir".to_string(),
        profile.root().to_string_lossy().into_owned(),
        "--config-py".to_string(),
        profile.config_file().to_string_lossy().into_owned(),
        "--qt-arg".to_string(),
        "name".to_string(),
        "work".to_string(),
        "--desktop-file-name".to_string(),
        "work".to_string(),
        "--target".to_string(),
        "window".to_string(),
    ];
    assert_eq!(argv.lines().collect::<Vec<_>>(), expected);
}

#[tokio::test]
async fn missing_binary_is_a_spawn_error() {
    let temp = tempdir().expect("can create temp directory");
    let store = store_in(temp.path());
    let profile = Profile::new("work", profiles_dir(temp.path()), false).expect("valid name");

    let err = Launcher::new(temp.path().join("no-such-browser"), LONG_GRACE)
        .launch(&store, &profile, false, false, &[])
        .await
        .expect_err("binary does not exist");

    assert!(matches!(err, LaunchError::Spawn { .. }));
}
