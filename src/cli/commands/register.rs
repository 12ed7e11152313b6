//! `securevault register` — create a new account and sign in.

use zeroize::Zeroizing;

use crate::api::AuthClient;
use crate::cli::{audit_event, load_context, output, value_or_prompt, Cli};
use crate::errors::{Result, SecureVaultError};

/// Execute the `register` command.
pub fn execute(
    cli: &Cli,
    first_name: Option<&str>,
    last_name: Option<&str>,
    email: Option<&str>,
) -> Result<()> {
    let ctx = load_context(cli)?;

    let first_name = value_or_prompt(first_name, "First name")?;
    let last_name = value_or_prompt(last_name, "Last name")?;
    let email = value_or_prompt(email, "Email")?;

    // Account password for the remote service, with confirmation.
    let password = Zeroizing::new(
        dialoguer::Password::new()
            .with_prompt("Choose account password")
            .with_confirmation("Confirm account password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| SecureVaultError::CommandFailed(format!("password prompt: {e}")))?,
    );

    let client = AuthClient::new(ctx.api_base_url());
    let (token, profile) = client.register(&first_name, &last_name, &email, &password)?;

    let session = ctx.sessions().login(profile, token)?;

    audit_event(&ctx, session.identity(), "register", None, None);
    output::success(&format!(
        "Account created. Welcome, {}!",
        session.profile.display_name()
    ));
    output::tip("Add your first credential: securevault add");

    Ok(())
}
