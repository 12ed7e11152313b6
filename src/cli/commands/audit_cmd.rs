//! `securevault audit` — view the audit log for the signed-in identity.

use crate::audit::AuditLog;
use crate::cli::{load_context, output, Cli};
use crate::errors::{Result, SecureVaultError};

/// Execute the `audit` command.
pub fn execute(cli: &Cli, last: usize) -> Result<()> {
    let ctx = load_context(cli)?;
    let session = ctx.sessions().require()?;

    let audit = AuditLog::open(&ctx.data_dir).ok_or_else(|| {
        SecureVaultError::Audit(format!(
            "could not open audit log at {}",
            AuditLog::db_path(&ctx.data_dir).display()
        ))
    })?;

    let entries = audit.query(session.identity(), last)?;

    output::info(&format!(
        "{} — last {} of {} entries shown",
        session.identity(),
        entries.len(),
        last
    ));
    output::print_audit_table(&entries);

    Ok(())
}
