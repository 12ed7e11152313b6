//! Integration tests for the session lifecycle, simulating process
//! restarts by building a fresh `SessionManager` over the same directory.

use std::fs;

use securevault::errors::SecureVaultError;
use securevault::session::{SessionManager, UserProfile};
use tempfile::TempDir;

fn profile(email: &str) -> UserProfile {
    UserProfile {
        first_name: "Sam".to_string(),
        last_name: "Vimes".to_string(),
        email: email.to_string(),
    }
}

#[test]
fn session_survives_a_restart() {
    let dir = TempDir::new().unwrap();

    SessionManager::new(dir.path())
        .login(profile("sam@watch.gov"), "tok-1".to_string())
        .unwrap();

    // "Restart": a brand new manager over the same directory.
    let restored = SessionManager::new(dir.path())
        .restore()
        .unwrap()
        .expect("session should restore after restart");
    assert_eq!(restored.identity(), "sam@watch.gov");
    assert_eq!(restored.token, "tok-1");
}

#[test]
fn logout_is_visible_to_the_next_process() {
    let dir = TempDir::new().unwrap();

    let sm = SessionManager::new(dir.path());
    sm.login(profile("sam@watch.gov"), "tok".to_string()).unwrap();
    sm.logout().unwrap();

    let next = SessionManager::new(dir.path());
    assert!(next.restore().unwrap().is_none());
    assert!(matches!(
        next.require(),
        Err(SecureVaultError::NotAuthenticated)
    ));
}

#[test]
fn corrupt_profile_on_disk_fails_safe_at_restore() {
    let dir = TempDir::new().unwrap();

    SessionManager::new(dir.path())
        .login(profile("sam@watch.gov"), "tok".to_string())
        .unwrap();

    // Corrupt the persisted profile between "runs".
    fs::write(dir.path().join("currentUser.json"), "}{").unwrap();

    let sm = SessionManager::new(dir.path());
    assert!(sm.restore().unwrap().is_none(), "corrupt profile means no session");

    // Fail-safe: both persisted pieces are gone.
    assert!(!dir.path().join("token").exists());
    assert!(!dir.path().join("currentUser.json").exists());
}

#[test]
fn login_with_a_new_identity_replaces_the_old_one() {
    let dir = TempDir::new().unwrap();
    let sm = SessionManager::new(dir.path());

    sm.login(profile("first@x.com"), "tok-1".to_string()).unwrap();
    sm.login(profile("second@x.com"), "tok-2".to_string()).unwrap();

    let session = sm.restore().unwrap().unwrap();
    assert_eq!(session.identity(), "second@x.com");
    assert_eq!(session.token, "tok-2");
}
