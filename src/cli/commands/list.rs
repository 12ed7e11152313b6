//! `securevault list` — display credentials in a table, with optional search.

use crate::cli::{load_context, open_vault, output, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, term: Option<&str>) -> Result<()> {
    let ctx = load_context(cli)?;
    let (session, vault) = open_vault(&ctx)?;

    let term = term.unwrap_or("");
    let records = vault.search(term);

    if term.is_empty() {
        output::info(&format!(
            "{} — {} credential(s)",
            session.identity(),
            records.len()
        ));
    } else {
        output::info(&format!(
            "{} — {} of {} credential(s) match '{term}'",
            session.identity(),
            records.len(),
            vault.len()
        ));
    }

    output::print_records_table(&records);

    Ok(())
}
