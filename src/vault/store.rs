//! Per-identity vault persistence.
//!
//! Each identity (email) gets one JSON file under the data directory,
//! `passwords_<email>.json`, holding the full ordered record list.  A
//! save always rewrites the whole file; there is no append or patch
//! format.  Writes go through a temp file + rename so a reader can never
//! observe a half-written vault.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Result, SecureVaultError};

use super::record::CredentialRecord;

/// Handle to the on-disk vault files for every identity.
pub struct VaultStore {
    dir: PathBuf,
}

impl VaultStore {
    /// Create a store rooted at `dir`. The directory is created lazily
    /// on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the vault file for one identity.
    ///
    /// The email is sanitized so it is always a safe single filename.
    pub fn path_for(&self, identity: &str) -> PathBuf {
        self.dir.join(format!("passwords_{}.json", sanitize(identity)))
    }

    /// Load the full record list for an identity.
    ///
    /// A missing file is not an error — a fresh identity simply has an
    /// empty vault.  An unreadable or unparseable blob is reported as
    /// `CorruptStore`; the file itself is left untouched so manual
    /// recovery stays possible.
    pub fn load(&self, identity: &str) -> Result<Vec<CredentialRecord>> {
        let path = self.path_for(identity);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let data = fs::read(&path)?;
        serde_json::from_slice(&data).map_err(|_| SecureVaultError::CorruptStore(path))
    }

    /// Serialize the entire record list and replace the prior blob.
    ///
    /// Atomic from the reader's perspective: the JSON is written to a
    /// temp file in the same directory and renamed over the target.
    pub fn save(&self, identity: &str, records: &[CredentialRecord]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(identity);
        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| SecureVaultError::Serialization(format!("vault records: {e}")))?;

        let parent = path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, &json)?;
        fs::rename(&tmp_path, &path)?;

        // Vault files are owner-only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            let _ = fs::set_permissions(&path, perms);
        }

        Ok(())
    }

    /// Copy a corrupt blob aside as `<file>.corrupt` before the caller
    /// continues with an empty vault.  Later saves overwrite the live
    /// file but never this copy.
    pub fn preserve_corrupt_copy(&self, identity: &str) -> Result<PathBuf> {
        let path = self.path_for(identity);
        let backup = path.with_extension("json.corrupt");
        fs::copy(&path, &backup)?;
        Ok(backup)
    }

    /// Root directory of this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Replace any character that is not safe in a filename.
///
/// Emails are mostly filesystem-safe already; this guards against
/// separators and other surprises without making names unreadable.
fn sanitize(identity: &str) -> String {
    identity
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '-' | '+') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn sample_record(id: i64) -> CredentialRecord {
        let now = Utc::now();
        CredentialRecord {
            id,
            application_name: format!("App{id}"),
            username: "user".to_string(),
            password: "ciphertext".to_string(),
            url: None,
            created_date: now,
            last_changed: now,
        }
    }

    #[test]
    fn load_without_prior_save_returns_empty() {
        let dir = TempDir::new().unwrap();
        let store = VaultStore::new(dir.path());
        let records = store.load("new@user.com").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn save_then_load_roundtrips_in_order() {
        let dir = TempDir::new().unwrap();
        let store = VaultStore::new(dir.path());

        let records = vec![sample_record(3), sample_record(1), sample_record(2)];
        store.save("a@x.com", &records).unwrap();

        let loaded = store.load("a@x.com").unwrap();
        let ids: Vec<i64> = loaded.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2], "insertion order must survive persistence");
    }

    #[test]
    fn save_is_total_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = VaultStore::new(dir.path());

        store
            .save("a@x.com", &[sample_record(1), sample_record(2)])
            .unwrap();
        store.save("a@x.com", &[sample_record(9)]).unwrap();

        let loaded = store.load("a@x.com").unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 9);
    }

    #[test]
    fn identities_do_not_share_vaults() {
        let dir = TempDir::new().unwrap();
        let store = VaultStore::new(dir.path());

        store.save("a@x.com", &[sample_record(1)]).unwrap();
        assert!(store.load("b@y.com").unwrap().is_empty());
    }

    #[test]
    fn corrupt_blob_is_reported_and_left_untouched() {
        let dir = TempDir::new().unwrap();
        let store = VaultStore::new(dir.path());

        let path = store.path_for("a@x.com");
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(&path, b"{ not valid json").unwrap();

        let err = store.load("a@x.com").unwrap_err();
        assert!(matches!(err, SecureVaultError::CorruptStore(_)));

        // The original bytes must still be there.
        assert_eq!(fs::read(&path).unwrap(), b"{ not valid json");
    }

    #[test]
    fn preserve_corrupt_copy_keeps_original_bytes() {
        let dir = TempDir::new().unwrap();
        let store = VaultStore::new(dir.path());

        let path = store.path_for("a@x.com");
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(&path, b"garbage").unwrap();

        let backup = store.preserve_corrupt_copy("a@x.com").unwrap();
        assert_eq!(fs::read(&backup).unwrap(), b"garbage");

        // A fresh save replaces the live file but not the backup.
        store.save("a@x.com", &[sample_record(1)]).unwrap();
        assert_eq!(fs::read(&backup).unwrap(), b"garbage");
    }

    #[test]
    fn sanitize_keeps_emails_readable() {
        assert_eq!(sanitize("a@x.com"), "a@x.com");
        assert_eq!(sanitize("weird/..\\name"), "weird_.._name");
    }

    #[cfg(unix)]
    #[test]
    fn vault_file_has_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = VaultStore::new(dir.path());
        store.save("a@x.com", &[sample_record(1)]).unwrap();

        let perms = fs::metadata(store.path_for("a@x.com")).unwrap().permissions();
        assert_eq!(perms.mode() & 0o777, 0o600);
    }
}
