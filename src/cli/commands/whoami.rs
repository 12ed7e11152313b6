//! `securevault whoami` — show the current session, if any.

use crate::cli::{load_context, output, Cli};
use crate::errors::Result;

/// Execute the `whoami` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = load_context(cli)?;

    match ctx.sessions().restore()? {
        Some(session) => {
            output::info(&format!(
                "Signed in as {} {} <{}>",
                session.profile.first_name, session.profile.last_name, session.identity()
            ));
            output::tip(&format!("Data directory: {}", ctx.data_dir.display()));
        }
        None => {
            output::info("Not signed in.");
            output::tip("Run `securevault login` or `securevault register`.");
        }
    }

    Ok(())
}
