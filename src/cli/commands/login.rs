//! `securevault login` — sign in and persist the session.

use crate::api::AuthClient;
use crate::cli::{audit_event, load_context, output, prompt_password, value_or_prompt, Cli};
use crate::errors::Result;

/// Execute the `login` command.
pub fn execute(cli: &Cli, email: Option<&str>) -> Result<()> {
    let ctx = load_context(cli)?;

    let email = value_or_prompt(email, "Email")?;
    let password = prompt_password("Account password")?;

    let client = AuthClient::new(ctx.api_base_url());
    let (token, profile) = client.login(&email, &password)?;

    // Replaces any previously signed-in identity — single-slot session.
    let session = ctx.sessions().login(profile, token)?;

    audit_event(&ctx, session.identity(), "login", None, None);
    output::success(&format!(
        "Signed in as {} ({})",
        session.profile.display_name(),
        session.identity()
    ));

    Ok(())
}
