//! `securevault open` — hand over what's needed to sign in somewhere:
//! print the URL and username, and put the decrypted password on the
//! clipboard. Actually launching a browser is left to the user.

use std::thread;
use std::time::Duration;

use crate::cli::notice::NoticeBoard;
use crate::cli::{audit_event, load_context, open_vault, output, Cli};
use crate::errors::{Result, SecureVaultError};

/// Execute the `open` command.
pub fn execute(cli: &Cli, id: i64) -> Result<()> {
    let ctx = load_context(cli)?;
    let (session, vault) = open_vault(&ctx)?;

    let record = vault.find(id)?;
    let name = record.application_name.clone();

    let url = record
        .url
        .clone()
        .ok_or_else(|| SecureVaultError::CommandFailed(format!("'{name}' has no URL stored")))?;

    let password = vault.reveal(id)?;

    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| SecureVaultError::Clipboard(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(password.to_string())
        .map_err(|e| SecureVaultError::Clipboard(format!("copy failed: {e}")))?;

    output::info(&format!("URL:      {url}"));
    output::info(&format!("Username: {}", record.username));
    output::success("Password copied to clipboard.");

    // Same notice window as `copy` so the clipboard survives long enough.
    let mut notices = NoticeBoard::new();
    notices.post(id, "Password copied!");
    while notices.active(id).is_some() {
        thread::sleep(Duration::from_millis(50));
    }

    audit_event(&ctx, session.identity(), "copy", Some(&name), Some("open"));

    Ok(())
}
