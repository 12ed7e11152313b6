//! `securevault add` — store a new credential in the vault.

use std::io::{self, IsTerminal, Read};

use crate::cli::{audit_event, load_context, open_vault, output, value_or_prompt, Cli};
use crate::errors::{Result, SecureVaultError};

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    application: Option<&str>,
    username: Option<&str>,
    url: Option<&str>,
) -> Result<()> {
    let ctx = load_context(cli)?;
    let (session, mut vault) = open_vault(&ctx)?;

    let application = value_or_prompt(application, "Application name (e.g. GitHub)")?;
    let username = value_or_prompt(username, "Username or email")?;

    // The password never appears on the command line; it comes from a
    // hidden prompt, or from stdin when piped.
    let password = if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        dialoguer::Password::new()
            .with_prompt(format!("Password for {application}"))
            .interact()
            .map_err(|e| SecureVaultError::CommandFailed(format!("password prompt: {e}")))?
    };

    let record = vault.create(&application, &username, &password, url)?;
    let record_name = record.application_name.clone();

    audit_event(&ctx, session.identity(), "add", Some(&record_name), None);
    output::success(&format!(
        "Saved '{record_name}' ({} credential(s) in your vault)",
        vault.len()
    ));
    output::tip("See it with: securevault list");

    Ok(())
}
