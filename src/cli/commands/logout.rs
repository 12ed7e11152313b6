//! `securevault logout` — clear the persisted session.

use crate::cli::{audit_event, load_context, output, Cli};
use crate::errors::Result;

/// Execute the `logout` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = load_context(cli)?;
    let sessions = ctx.sessions();

    match sessions.restore()? {
        Some(session) => {
            sessions.logout()?;
            audit_event(&ctx, session.identity(), "logout", None, None);
            output::success(&format!("Signed out {}", session.identity()));
        }
        None => {
            output::info("Not signed in — nothing to do.");
        }
    }

    Ok(())
}
