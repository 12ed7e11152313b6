//! The credential record stored inside a vault, plus age-based
//! password-health scoring.
//!
//! The `password` field holds ciphertext at all times — on disk and in
//! memory.  Plaintext only ever exists inside the `Zeroizing` result of
//! `Vault::reveal`.  Field names serialize in camelCase so vault files
//! stay readable next to the session profile blob.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seconds in a day, used for ceiling division in [`CredentialRecord::age_days_at`].
const DAY_SECS: i64 = 86_400;

/// One stored application/username/password/url entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// Unique id, assigned once at creation from the creation time in
    /// milliseconds. Never changes afterwards.
    pub id: i64,

    /// Display label; also the exact phrase required to confirm deletion.
    pub application_name: String,

    /// Username or email for the application.
    pub username: String,

    /// The encrypted password (base64 of nonce || ciphertext).
    pub password: String,

    /// Optional website URL. Not validated.
    #[serde(default)]
    pub url: Option<String>,

    /// When this record was first created. Immutable.
    pub created_date: DateTime<Utc>,

    /// When this record was last edited.
    pub last_changed: DateTime<Utc>,
}

/// Age-derived rotation recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthLevel {
    Good,
    Warning,
    Critical,
}

impl HealthLevel {
    /// Short lowercase label for tables and audit details.
    pub fn label(self) -> &'static str {
        match self {
            HealthLevel::Good => "good",
            HealthLevel::Warning => "warning",
            HealthLevel::Critical => "critical",
        }
    }
}

/// A health classification plus its user-facing recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub level: HealthLevel,
    pub message: &'static str,
}

impl CredentialRecord {
    /// Password age in whole days at `now`: `ceil(|now - created| / 1 day)`.
    ///
    /// Uses the absolute difference so a `created_date` in the future
    /// (clock skew) still yields a non-negative age.
    pub fn age_days_at(&self, now: DateTime<Utc>) -> i64 {
        let secs = (now - self.created_date).num_seconds().abs();
        (secs + DAY_SECS - 1) / DAY_SECS
    }

    /// Password age in whole days as of the current wall clock.
    pub fn age_days(&self) -> i64 {
        self.age_days_at(Utc::now())
    }

    /// Three-tier health classification from age alone, recomputed on
    /// every call and never cached in the record.
    pub fn health_at(&self, now: DateTime<Utc>) -> HealthStatus {
        let age = self.age_days_at(now);
        if age > 90 {
            HealthStatus {
                level: HealthLevel::Critical,
                message: "Change immediately",
            }
        } else if age > 60 {
            HealthStatus {
                level: HealthLevel::Warning,
                message: "Consider changing",
            }
        } else {
            HealthStatus {
                level: HealthLevel::Good,
                message: "Password is fresh",
            }
        }
    }

    /// Health classification as of the current wall clock.
    pub fn health(&self) -> HealthStatus {
        self.health_at(Utc::now())
    }

    /// True when `term` is a case-insensitive substring of the
    /// application name or the username.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.application_name.to_lowercase().contains(&needle)
            || self.username.to_lowercase().contains(&needle)
    }
}
