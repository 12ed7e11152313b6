//! Session manager — the process's single-slot authentication state.
//!
//! The remote auth API hands back a `(token, profile)` pair on login or
//! registration; this module persists that pair under the data directory
//! as two files (`token` and `currentUser.json`) and restores it on the
//! next run.  At most one identity is active at a time, and every vault
//! command passes through [`SessionManager::require`] before it may
//! touch a vault.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SecureVaultError};

/// Filename of the persisted session token.
const TOKEN_FILE: &str = "token";

/// Filename of the persisted user profile.
const PROFILE_FILE: &str = "currentUser.json";

/// The authenticated user. `email` scopes vault storage; the names are
/// display-only.  Serialized in camelCase to match the auth API payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
}

impl UserProfile {
    /// Display name for greetings: first name if present, else the email.
    pub fn display_name(&self) -> &str {
        if self.first_name.is_empty() {
            &self.email
        } else {
            &self.first_name
        }
    }
}

/// An active authentication state: token plus the identity it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub profile: UserProfile,
}

impl Session {
    /// The identity key used for vault storage.
    pub fn identity(&self) -> &str {
        &self.profile.email
    }
}

/// Persists and restores the single active session.
pub struct SessionManager {
    dir: PathBuf,
}

impl SessionManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn profile_path(&self) -> PathBuf {
        self.dir.join(PROFILE_FILE)
    }

    /// Restore a persisted session, if a complete and parseable one exists.
    ///
    /// A missing token or profile means no session.  A profile that
    /// fails to parse clears the persisted pair (fail-safe) and also
    /// reports no session — never an error the caller has to handle.
    pub fn restore(&self) -> Result<Option<Session>> {
        let token_path = self.token_path();
        let profile_path = self.profile_path();

        if !token_path.exists() || !profile_path.exists() {
            return Ok(None);
        }

        let token = fs::read_to_string(&token_path)?.trim().to_string();
        let profile_raw = fs::read_to_string(&profile_path)?;

        match serde_json::from_str::<UserProfile>(&profile_raw) {
            Ok(profile) if !profile.email.is_empty() => Ok(Some(Session { token, profile })),
            _ => {
                // Unreadable or incomplete profile: clear both files so the
                // next run starts cleanly unauthenticated.
                let _ = fs::remove_file(&token_path);
                let _ = fs::remove_file(&profile_path);
                Ok(None)
            }
        }
    }

    /// Persist a new session, replacing any previous identity.
    pub fn login(&self, profile: UserProfile, token: String) -> Result<Session> {
        fs::create_dir_all(&self.dir)?;

        let profile_json = serde_json::to_string_pretty(&profile)
            .map_err(|e| SecureVaultError::Serialization(format!("user profile: {e}")))?;

        fs::write(self.token_path(), &token)?;
        fs::write(self.profile_path(), profile_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            for path in [self.token_path(), self.profile_path()] {
                let _ = fs::set_permissions(&path, fs::Permissions::from_mode(0o600));
            }
        }

        Ok(Session { token, profile })
    }

    /// Clear the persisted session. Safe to call when already logged out.
    pub fn logout(&self) -> Result<()> {
        for path in [self.token_path(), self.profile_path()] {
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    /// Restore the session or fail with `NotAuthenticated`.
    ///
    /// Every vault command calls this first, so no vault is ever loaded
    /// without an active identity.
    pub fn require(&self) -> Result<Session> {
        self.restore()?.ok_or(SecureVaultError::NotAuthenticated)
    }

    /// Directory the session files live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn profile() -> UserProfile {
        UserProfile {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    #[test]
    fn restore_without_login_is_none() {
        let dir = TempDir::new().unwrap();
        let sm = SessionManager::new(dir.path());
        assert!(sm.restore().unwrap().is_none());
    }

    #[test]
    fn login_then_restore_roundtrips() {
        let dir = TempDir::new().unwrap();
        let sm = SessionManager::new(dir.path());

        sm.login(profile(), "tok-123".to_string()).unwrap();

        let session = sm.restore().unwrap().expect("session should restore");
        assert_eq!(session.token, "tok-123");
        assert_eq!(session.identity(), "ada@example.com");
        assert_eq!(session.profile.display_name(), "Ada");
    }

    #[test]
    fn login_replaces_previous_identity() {
        let dir = TempDir::new().unwrap();
        let sm = SessionManager::new(dir.path());

        sm.login(profile(), "tok-1".to_string()).unwrap();

        let other = UserProfile {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
        };
        sm.login(other, "tok-2".to_string()).unwrap();

        let session = sm.restore().unwrap().unwrap();
        assert_eq!(session.identity(), "grace@example.com");
        assert_eq!(session.token, "tok-2");
    }

    #[test]
    fn logout_clears_session() {
        let dir = TempDir::new().unwrap();
        let sm = SessionManager::new(dir.path());

        sm.login(profile(), "tok".to_string()).unwrap();
        sm.logout().unwrap();

        assert!(sm.restore().unwrap().is_none());
        assert!(matches!(
            sm.require(),
            Err(SecureVaultError::NotAuthenticated)
        ));
    }

    #[test]
    fn logout_when_already_logged_out_is_ok() {
        let dir = TempDir::new().unwrap();
        let sm = SessionManager::new(dir.path());
        assert!(sm.logout().is_ok());
    }

    #[test]
    fn corrupt_profile_clears_both_files() {
        let dir = TempDir::new().unwrap();
        let sm = SessionManager::new(dir.path());

        sm.login(profile(), "tok".to_string()).unwrap();
        fs::write(dir.path().join(PROFILE_FILE), "{ broken").unwrap();

        assert!(sm.restore().unwrap().is_none());
        assert!(!dir.path().join(TOKEN_FILE).exists());
        assert!(!dir.path().join(PROFILE_FILE).exists());
    }

    #[test]
    fn profile_without_email_is_treated_as_no_session() {
        let dir = TempDir::new().unwrap();
        let sm = SessionManager::new(dir.path());

        sm.login(profile(), "tok".to_string()).unwrap();
        fs::write(
            dir.path().join(PROFILE_FILE),
            r#"{"firstName":"Ada","lastName":"Lovelace","email":""}"#,
        )
        .unwrap();

        assert!(sm.restore().unwrap().is_none());
    }

    #[test]
    fn missing_token_alone_means_no_session() {
        let dir = TempDir::new().unwrap();
        let sm = SessionManager::new(dir.path());

        sm.login(profile(), "tok".to_string()).unwrap();
        fs::remove_file(dir.path().join(TOKEN_FILE)).unwrap();

        assert!(sm.restore().unwrap().is_none());
    }
}
