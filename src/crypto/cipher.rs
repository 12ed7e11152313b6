//! AES-256-GCM authenticated encryption for stored passwords.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext, then base64-encodes the whole blob so
//! it can live inside a JSON string field.  `decrypt` reverses the
//! process and fails with `DecryptionFailed` on any malformed input —
//! callers can never confuse a failed decrypt with an empty password.
//!
//! Layout of the encoded buffer:
//!   base64( [ 12-byte nonce | ciphertext + 16-byte auth tag ] )

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{Result, SecureVaultError};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Size of the symmetric key in bytes (AES-256).
const KEY_LEN: usize = 32;

/// The process-wide symmetric cipher.
///
/// Built once at startup from the configured key and shared by every
/// vault operation.  The same key protects every record and every
/// identity.
// TODO: derive a per-identity key from a user-supplied secret instead of
// sharing one configured key across all identities.
pub struct Cipher {
    key: [u8; KEY_LEN],
}

impl Drop for Cipher {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl Cipher {
    /// Build a cipher from raw key bytes.
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Build a cipher from a base64-encoded 32-byte key.
    ///
    /// This is how the key configured in `.securevault.toml` (or the
    /// built-in default) is turned into a usable cipher at startup.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let mut bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| SecureVaultError::InvalidKey(format!("key is not valid base64: {e}")))?;

        if bytes.len() != KEY_LEN {
            let got = bytes.len();
            bytes.zeroize();
            return Err(SecureVaultError::InvalidKey(format!(
                "key must be {KEY_LEN} bytes, got {got}"
            )));
        }

        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&bytes);
        bytes.zeroize();
        Ok(Self { key })
    }

    /// Encrypt a plaintext password.
    ///
    /// Returns base64(nonce || ciphertext) so the result can be stored
    /// directly in a record's `password` field.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| SecureVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

        // Generate a random 12-byte nonce.
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| SecureVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

        // Prepend the nonce so only one blob needs to be stored.
        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);

        Ok(BASE64.encode(blob))
    }

    /// Decrypt a value produced by [`Cipher::encrypt`].
    ///
    /// The returned plaintext is wrapped in `Zeroizing` so it is wiped
    /// from memory as soon as the caller drops it.
    pub fn decrypt(&self, encoded: &str) -> Result<Zeroizing<String>> {
        let blob = BASE64
            .decode(encoded)
            .map_err(|_| SecureVaultError::DecryptionFailed)?;

        // Make sure there is at least a nonce worth of bytes.
        if blob.len() < NONCE_LEN {
            return Err(SecureVaultError::DecryptionFailed);
        }

        let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|_| SecureVaultError::DecryptionFailed)?;

        let plaintext = cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| SecureVaultError::DecryptionFailed)?;

        // On invalid UTF-8, zeroize the bytes inside the error before discarding.
        String::from_utf8(plaintext).map(Zeroizing::new).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            SecureVaultError::DecryptionFailed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cipher() -> Cipher {
        Cipher::new([0x42u8; 32])
    }

    #[test]
    fn roundtrip_preserves_plaintext() {
        let cipher = test_cipher();
        let ct = cipher.encrypt("Secr3t!").unwrap();
        assert_eq!(cipher.decrypt(&ct).unwrap().as_str(), "Secr3t!");
    }

    #[test]
    fn ciphertext_is_valid_base64_and_not_plaintext() {
        let cipher = test_cipher();
        let ct = cipher.encrypt("hunter2").unwrap();
        assert!(BASE64.decode(&ct).is_ok());
        assert!(!ct.contains("hunter2"));
    }

    #[test]
    fn from_base64_rejects_wrong_length() {
        let short = BASE64.encode([0u8; 16]);
        assert!(Cipher::from_base64(&short).is_err());
    }

    #[test]
    fn from_base64_rejects_garbage() {
        assert!(Cipher::from_base64("not base64 at all!!!").is_err());
    }

    #[test]
    fn decrypt_rejects_non_base64_input() {
        let cipher = test_cipher();
        assert!(matches!(
            cipher.decrypt("%%% not base64 %%%"),
            Err(SecureVaultError::DecryptionFailed)
        ));
    }

    #[test]
    fn decrypt_rejects_truncated_input() {
        let cipher = test_cipher();
        let tiny = BASE64.encode([0u8; 5]);
        assert!(matches!(
            cipher.decrypt(&tiny),
            Err(SecureVaultError::DecryptionFailed)
        ));
    }
}
