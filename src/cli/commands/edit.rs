//! `securevault edit` — update an existing credential.
//!
//! Prompts pre-fill with the current values; leaving the password blank
//! keeps the stored one (it is decrypted and re-encrypted so
//! `last_changed` still advances, matching the update contract).

use crate::cli::{
    audit_event, load_context, open_vault, output, prompt_input_with_default, Cli,
};
use crate::errors::{Result, SecureVaultError};

/// Execute the `edit` command.
pub fn execute(cli: &Cli, id: i64) -> Result<()> {
    let ctx = load_context(cli)?;
    let (session, mut vault) = open_vault(&ctx)?;

    let current = vault.find(id)?.clone();

    let application =
        prompt_input_with_default("Application name", &current.application_name)?;
    let username = prompt_input_with_default("Username or email", &current.username)?;
    let url = prompt_input_with_default("URL", current.url.as_deref().unwrap_or(""))?;

    let entered = dialoguer::Password::new()
        .with_prompt("New password (leave blank to keep current)")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| SecureVaultError::CommandFailed(format!("password prompt: {e}")))?;

    let password = if entered.is_empty() {
        vault.reveal(id)?
    } else {
        zeroize::Zeroizing::new(entered)
    };

    vault.update(id, &application, &username, &password, Some(&url))?;

    audit_event(&ctx, session.identity(), "update", Some(&application), None);
    output::success(&format!("Updated '{application}'"));

    Ok(())
}
