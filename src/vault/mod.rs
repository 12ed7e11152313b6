//! The credential vault: record model, per-identity persistence, and the
//! CRUD/search operations the CLI commands drive.

pub mod ops;
pub mod record;
pub mod store;

pub use ops::Vault;
pub use record::{CredentialRecord, HealthLevel, HealthStatus};
pub use store::VaultStore;
