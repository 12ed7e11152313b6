//! `securevault copy` — put a credential's password (or username) on
//! the clipboard.
//!
//! The process stays alive for the two-second notice window. On X11 the
//! clipboard belongs to the process that set it, so exiting immediately
//! would drop the contents before they can be pasted.

use std::thread;
use std::time::Duration;

use zeroize::Zeroizing;

use crate::cli::notice::NoticeBoard;
use crate::cli::{audit_event, load_context, open_vault, output, Cli};
use crate::errors::{Result, SecureVaultError};

/// Polling interval while waiting out the notice window.
const POLL: Duration = Duration::from_millis(50);

/// Execute the `copy` command.
pub fn execute(cli: &Cli, id: i64, copy_username: bool) -> Result<()> {
    let ctx = load_context(cli)?;
    let (session, vault) = open_vault(&ctx)?;

    let record = vault.find(id)?;
    let name = record.application_name.clone();

    let (text, what) = if copy_username {
        (Zeroizing::new(record.username.clone()), "Username")
    } else {
        (vault.reveal(id)?, "Password")
    };

    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| SecureVaultError::Clipboard(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| SecureVaultError::Clipboard(format!("copy failed: {e}")))?;

    let mut notices = NoticeBoard::new();
    notices.post(id, format!("{what} copied!"));

    if let Some(msg) = notices.active(id) {
        output::success(&format!("{msg} ({name})"));
    }

    // Hold the clipboard until the notice expires, then clear the notice.
    while notices.active(id).is_some() {
        thread::sleep(POLL);
    }
    notices.clear(id);

    audit_event(
        &ctx,
        session.identity(),
        "copy",
        Some(&name),
        Some(if copy_username { "username" } else { "password" }),
    );

    Ok(())
}
