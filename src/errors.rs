use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in SecureVault.
#[derive(Debug, Error)]
pub enum SecureVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong key or corrupted data")]
    DecryptionFailed,

    #[error("Invalid encryption key: {0}")]
    InvalidKey(String),

    // --- Vault errors ---
    #[error("{0} is required and cannot be empty")]
    Validation(&'static str),

    #[error("No credential with id {0}")]
    RecordNotFound(i64),

    #[error("Confirmation text does not match the application name — nothing deleted")]
    ConfirmationMismatch,

    #[error("Stored vault at {} is unreadable — treating it as empty", .0.display())]
    CorruptStore(PathBuf),

    // --- Session errors ---
    #[error("Not signed in — run `securevault login` first")]
    NotAuthenticated,

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    // --- Audit errors ---
    #[error("Audit error: {0}")]
    Audit(String),
}

/// Convenience type alias for SecureVault results.
pub type Result<T> = std::result::Result<T, SecureVaultError>;
