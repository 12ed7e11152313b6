//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod notice;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, SecureVaultError};
use crate::session::{Session, SessionManager};
use crate::vault::{Vault, VaultStore};

/// SecureVault CLI: encrypted password manager.
#[derive(Parser)]
#[command(
    name = "securevault",
    about = "Encrypted password manager with a login-gated credential vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory for session, vaults, and audit log
    /// (default: .securevault, or the value in .securevault.toml)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Base URL of the auth API (overrides .securevault.toml)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new account and sign in
    Register {
        /// First name (omit for interactive prompt)
        #[arg(long)]
        first_name: Option<String>,
        /// Last name (omit for interactive prompt)
        #[arg(long)]
        last_name: Option<String>,
        /// Email address (omit for interactive prompt)
        #[arg(long)]
        email: Option<String>,
    },

    /// Sign in with an existing account
    Login {
        /// Email address (omit for interactive prompt)
        email: Option<String>,
    },

    /// Sign out and clear the saved session
    Logout,

    /// Show the currently signed-in user
    Whoami,

    /// Add a new credential to the vault
    Add {
        /// Application name (e.g. GitHub)
        application: Option<String>,
        /// Username or email for the application
        username: Option<String>,
        /// Website URL
        #[arg(long)]
        url: Option<String>,
    },

    /// List credentials, optionally filtered by a search term
    List {
        /// Case-insensitive search over application name and username
        term: Option<String>,
    },

    /// Show one credential
    Show {
        /// Credential id (see `list`)
        id: i64,
        /// Print the decrypted password instead of a mask
        #[arg(long)]
        reveal: bool,
    },

    /// Edit an existing credential
    Edit {
        /// Credential id (see `list`)
        id: i64,
    },

    /// Delete a credential (asks you to type the application name)
    Delete {
        /// Credential id (see `list`)
        id: i64,
    },

    /// Copy a credential's password (or username) to the clipboard
    Copy {
        /// Credential id (see `list`)
        id: i64,
        /// Copy the username instead of the password
        #[arg(short, long)]
        username: bool,
    },

    /// Print a credential's URL and username, with the password on the clipboard
    Open {
        /// Credential id (see `list`)
        id: i64,
    },

    /// View the audit log of vault operations
    #[cfg(feature = "audit-log")]
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolved runtime context: settings merged with CLI overrides.
pub struct Context {
    pub settings: Settings,
    pub data_dir: PathBuf,
}

impl Context {
    /// Session manager over this context's data directory.
    pub fn sessions(&self) -> SessionManager {
        SessionManager::new(&self.data_dir)
    }

    /// Base URL for the auth API.
    pub fn api_base_url(&self) -> &str {
        &self.settings.api_base_url
    }
}

/// Load settings from the working directory and apply CLI overrides.
pub fn load_context(cli: &Cli) -> Result<Context> {
    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(&cwd)?;

    if let Some(url) = &cli.api_url {
        settings.api_base_url = url.clone();
    }
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = dir.clone();
    }

    let data_dir = settings.data_dir_path(&cwd);
    Ok(Context { settings, data_dir })
}

/// Open the signed-in user's vault, or fail with `NotAuthenticated`.
///
/// This is the single path every vault command takes: restore the
/// session, build the cipher from the configured key, load the records.
/// A corrupt stored blob opens as an empty vault with a warning; the
/// original bytes are preserved next to the live file.
pub fn open_vault(ctx: &Context) -> Result<(Session, Vault)> {
    let session = ctx.sessions().require()?;

    let cipher = ctx.settings.cipher()?;
    let store = VaultStore::new(&ctx.data_dir);
    let vault = Vault::open(&session, store, cipher)?;

    if vault.recovered_from_corruption() {
        output::warning(
            "Stored vault was unreadable — starting from an empty vault. \
             The original file was copied aside with a .corrupt suffix.",
        );
    }

    Ok((session, vault))
}

/// Prompt for a password without echoing it.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| SecureVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a line of visible input.
pub fn prompt_input(prompt: &str) -> Result<String> {
    dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(|e| SecureVaultError::CommandFailed(format!("input prompt: {e}")))
}

/// Prompt for a line of visible input with a pre-filled default.
pub fn prompt_input_with_default(prompt: &str, default: &str) -> Result<String> {
    dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()
        .map_err(|e| SecureVaultError::CommandFailed(format!("input prompt: {e}")))
}

/// Use the provided value or fall back to an interactive prompt.
pub fn value_or_prompt(value: Option<&str>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v.to_string()),
        None => prompt_input(prompt),
    }
}

/// Record an audit event when the feature is enabled; a no-op otherwise.
pub fn audit_event(
    ctx: &Context,
    identity: &str,
    op: &str,
    record: Option<&str>,
    details: Option<&str>,
) {
    #[cfg(feature = "audit-log")]
    crate::audit::log_audit(&ctx.data_dir, identity, op, record, details);

    #[cfg(not(feature = "audit-log"))]
    let _ = (ctx, identity, op, record, details);
}
