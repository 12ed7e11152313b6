//! `securevault delete` — remove a credential, guarded by typing the
//! application name.
//!
//! The confirmation check itself lives in the vault core, not here: the
//! typed text is passed through verbatim, and anything but an exact
//! match leaves the vault untouched.

use crate::cli::{audit_event, load_context, open_vault, output, prompt_input, Cli};
use crate::errors::Result;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: i64) -> Result<()> {
    let ctx = load_context(cli)?;
    let (session, mut vault) = open_vault(&ctx)?;

    let name = vault.find(id)?.application_name.clone();

    output::warning(&format!(
        "This permanently deletes the credential for '{name}'."
    ));
    let confirmation = prompt_input(&format!("Type \"{name}\" to confirm"))?;

    vault.delete(id, &confirmation)?;

    audit_event(&ctx, session.identity(), "delete", Some(&name), None);
    output::success(&format!("Deleted '{name}'"));

    Ok(())
}
