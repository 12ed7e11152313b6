//! `securevault show` — display one credential, optionally revealing
//! the decrypted password.

use crate::cli::{load_context, open_vault, output, Cli};
use crate::errors::Result;

/// Placeholder shown instead of the password unless `--reveal` is passed.
const MASK: &str = "\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}";

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: i64, reveal: bool) -> Result<()> {
    let ctx = load_context(cli)?;
    let (_session, vault) = open_vault(&ctx)?;

    let record = vault.find(id)?;

    if reveal {
        // Decrypted only for this one print; the Zeroizing wrapper wipes
        // the plaintext as soon as it goes out of scope.
        let password = vault.reveal(id)?;
        output::print_record_detail(record, &password);
    } else {
        output::print_record_detail(record, MASK);
        output::tip("Add --reveal to print the password.");
    }

    Ok(())
}
