//! Project-level configuration, loaded from `.securevault.toml`.
//!
//! Every field has a sensible default so SecureVault works
//! out-of-the-box without any config file at all.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::Cipher;
use crate::errors::{Result, SecureVaultError};

/// Built-in encryption key (base64 of 32 bytes), used when no key is
/// configured.  One static key for the whole process — every record and
/// every identity shares it.
// TODO: derive a per-identity key from a user-supplied secret instead of
// falling back to this shared constant.
const DEFAULT_ENCRYPTION_KEY: &str = "c2VjdXJldmF1bHQtZGVmYXVsdC0zMi1ieXRlLWtleSE=";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) where the session,
    /// vault files, and audit log are stored.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Base URL of the remote authentication API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base64-encoded 32-byte symmetric key for password encryption.
    #[serde(default = "default_encryption_key")]
    pub encryption_key: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    ".securevault".to_string()
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_encryption_key() -> String {
    DEFAULT_ENCRYPTION_KEY.to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            api_base_url: default_api_base_url(),
            encryption_key: default_encryption_key(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".securevault.toml";

    /// Load settings from `<project_dir>/.securevault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            SecureVaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Resolve the data directory against a project root.
    pub fn data_dir_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir)
    }

    /// Build the process-wide cipher from the configured key.
    pub fn cipher(&self) -> Result<Cipher> {
        Cipher::from_base64(&self.encryption_key)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.data_dir, ".securevault");
        assert_eq!(s.api_base_url, "http://localhost:8000");
        assert!(s.cipher().is_ok(), "default key must build a cipher");
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.data_dir, ".securevault");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
data_dir = "secrets"
api_base_url = "https://auth.example.com"
encryption_key = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA="
"#;
        fs::write(tmp.path().join(".securevault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.data_dir, "secrets");
        assert_eq!(settings.api_base_url, "https://auth.example.com");
        assert!(settings.cipher().is_ok());
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".securevault.toml"), "data_dir = \"d\"\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.data_dir, "d");
        assert_eq!(settings.api_base_url, "http://localhost:8000");
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".securevault.toml"), "not valid {{toml").unwrap();

        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn data_dir_path_joins_project_dir() {
        let s = Settings::default();
        let path = s.data_dir_path(Path::new("/home/user/project"));
        assert_eq!(path, PathBuf::from("/home/user/project/.securevault"));
    }
}
