//! High-level vault operations used by CLI commands.
//!
//! `Vault` holds one identity's record list in memory, encrypts through
//! the [`Cipher`] on the way in, and round-trips every mutation back
//! through [`VaultStore::save`].  It can only be opened from an active
//! [`Session`], so vault access is gated on authentication by
//! construction.

use chrono::Utc;
use zeroize::Zeroizing;

use crate::crypto::Cipher;
use crate::errors::{Result, SecureVaultError};
use crate::session::Session;

use super::record::CredentialRecord;
use super::store::VaultStore;

/// One identity's in-memory vault, backed by the store and the cipher.
pub struct Vault {
    identity: String,
    records: Vec<CredentialRecord>,
    store: VaultStore,
    cipher: Cipher,
    recovered_from_corruption: bool,
}

impl Vault {
    /// Load the vault for the session's identity.
    ///
    /// A corrupt stored blob is not fatal: a copy is preserved next to
    /// the original, the vault opens empty, and
    /// [`Vault::recovered_from_corruption`] reports what happened so the
    /// caller can warn the user.
    pub fn open(session: &Session, store: VaultStore, cipher: Cipher) -> Result<Self> {
        let identity = session.identity().to_string();

        let (records, recovered) = match store.load(&identity) {
            Ok(records) => (records, false),
            Err(SecureVaultError::CorruptStore(_)) => {
                store.preserve_corrupt_copy(&identity)?;
                (Vec::new(), true)
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            identity,
            records,
            store,
            cipher,
            recovered_from_corruption: recovered,
        })
    }

    /// True when opening found an unreadable blob and fell back to an
    /// empty vault (the original bytes were copied aside).
    pub fn recovered_from_corruption(&self) -> bool {
        self.recovered_from_corruption
    }

    /// The identity this vault belongs to.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    // ------------------------------------------------------------------
    // CRUD
    // ------------------------------------------------------------------

    /// Add a new credential and persist the vault.
    ///
    /// The password is encrypted before the record ever enters the list,
    /// so plaintext never appears in memory beyond this call's scope.
    pub fn create(
        &mut self,
        application_name: &str,
        username: &str,
        plaintext_password: &str,
        url: Option<&str>,
    ) -> Result<&CredentialRecord> {
        validate_fields(application_name, username, plaintext_password)?;

        let now = Utc::now();
        let id = self.next_id(now.timestamp_millis());
        let record = CredentialRecord {
            id,
            application_name: application_name.to_string(),
            username: username.to_string(),
            password: self.cipher.encrypt(plaintext_password)?,
            url: url.map(str::to_string).filter(|u| !u.is_empty()),
            created_date: now,
            last_changed: now,
        };

        self.records.push(record);
        self.persist()?;

        self.find(id)
    }

    /// Replace all mutable fields of an existing credential and persist.
    ///
    /// `created_date` is untouched; `last_changed` advances to now.
    pub fn update(
        &mut self,
        id: i64,
        application_name: &str,
        username: &str,
        plaintext_password: &str,
        url: Option<&str>,
    ) -> Result<()> {
        validate_fields(application_name, username, plaintext_password)?;

        let encrypted = self.cipher.encrypt(plaintext_password)?;
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(SecureVaultError::RecordNotFound(id))?;

        record.application_name = application_name.to_string();
        record.username = username.to_string();
        record.password = encrypted;
        record.url = url.map(str::to_string).filter(|u| !u.is_empty());
        record.last_changed = Utc::now();

        self.persist()
    }

    /// Delete a credential, guarded by a confirmation phrase.
    ///
    /// The vault is only mutated when `confirmation` equals the record's
    /// application name byte-for-byte; anything else leaves the list
    /// unchanged and signals `ConfirmationMismatch` so the caller can
    /// re-prompt.
    pub fn delete(&mut self, id: i64, confirmation: &str) -> Result<()> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(SecureVaultError::RecordNotFound(id))?;

        if confirmation != self.records[index].application_name {
            return Err(SecureVaultError::ConfirmationMismatch);
        }

        self.records.remove(index);
        self.persist()
    }

    // ------------------------------------------------------------------
    // Read-only operations
    // ------------------------------------------------------------------

    /// Records whose application name or username contains `term`,
    /// case-insensitively, in insertion order.  An empty term returns
    /// the full list.  Never mutates or persists.
    pub fn search(&self, term: &str) -> Vec<&CredentialRecord> {
        if term.is_empty() {
            return self.records.iter().collect();
        }
        self.records.iter().filter(|r| r.matches(term)).collect()
    }

    /// Decrypt one record's password.
    ///
    /// The plaintext comes back in a `Zeroizing` wrapper; treat it as
    /// ephemeral and do not cache it.
    pub fn reveal(&self, id: i64) -> Result<Zeroizing<String>> {
        let record = self.find(id)?;
        self.cipher.decrypt(&record.password)
    }

    /// Look up a record by id.
    pub fn find(&self, id: i64) -> Result<&CredentialRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or(SecureVaultError::RecordNotFound(id))
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Millisecond-timestamp id, bumped past any existing id so two
    /// records created within the same millisecond stay distinct.
    fn next_id(&self, candidate: i64) -> i64 {
        let mut id = candidate;
        while self.records.iter().any(|r| r.id == id) {
            id += 1;
        }
        id
    }

    /// Write the entire current list back through the store.
    fn persist(&self) -> Result<()> {
        self.store.save(&self.identity, &self.records)
    }
}

/// Reject empty required fields on create/update.
fn validate_fields(application_name: &str, username: &str, password: &str) -> Result<()> {
    if application_name.trim().is_empty() {
        return Err(SecureVaultError::Validation("application name"));
    }
    if username.trim().is_empty() {
        return Err(SecureVaultError::Validation("username"));
    }
    if password.is_empty() {
        return Err(SecureVaultError::Validation("password"));
    }
    Ok(())
}
