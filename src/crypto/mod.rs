//! Cryptographic layer for SecureVault.
//!
//! One component lives here: the [`Cipher`], which protects every stored
//! password with AES-256-GCM under a single process-wide key.

pub mod cipher;

pub use cipher::Cipher;
