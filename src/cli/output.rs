//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use chrono::Utc;
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{CredentialRecord, HealthLevel};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Render a health level with its color.
fn styled_health(level: HealthLevel, message: &str) -> String {
    let text = format!("{} — {message}", level.label());
    match level {
        HealthLevel::Good => style(text).green().to_string(),
        HealthLevel::Warning => style(text).yellow().to_string(),
        HealthLevel::Critical => style(text).red().bold().to_string(),
    }
}

/// Print a table of credentials (Id, Application, Username, URL, Age, Health).
///
/// Passwords are never shown here — only `show --reveal` decrypts.
pub fn print_records_table(records: &[&CredentialRecord]) {
    if records.is_empty() {
        info("No credentials to show.");
        tip("Run `securevault add` to store your first password.");
        return;
    }

    let now = Utc::now();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Application", "Username", "URL", "Age (days)", "Health"]);

    for r in records {
        let health = r.health_at(now);
        table.add_row(vec![
            r.id.to_string(),
            r.application_name.clone(),
            r.username.clone(),
            r.url.clone().unwrap_or_default(),
            r.age_days_at(now).to_string(),
            styled_health(health.level, health.message),
        ]);
    }

    println!("{table}");
}

/// Print one credential in detail. The password column shows a mask
/// unless the caller already decrypted it.
pub fn print_record_detail(record: &CredentialRecord, password_display: &str) {
    let now = Utc::now();
    let health = record.health_at(now);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["Id".to_string(), record.id.to_string()]);
    table.add_row(vec![
        "Application".to_string(),
        record.application_name.clone(),
    ]);
    table.add_row(vec!["Username".to_string(), record.username.clone()]);
    table.add_row(vec!["Password".to_string(), password_display.to_string()]);
    table.add_row(vec![
        "URL".to_string(),
        record.url.clone().unwrap_or_default(),
    ]);
    table.add_row(vec![
        "Created".to_string(),
        record.created_date.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]);
    table.add_row(vec![
        "Last changed".to_string(),
        record.last_changed.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]);
    table.add_row(vec![
        "Health".to_string(),
        styled_health(health.level, health.message),
    ]);

    println!("{table}");
}

/// Print audit log entries, newest first.
#[cfg(feature = "audit-log")]
pub fn print_audit_table(entries: &[crate::audit::AuditEntry]) {
    if entries.is_empty() {
        info("No audit entries yet.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Record", "Details"]);

    for e in entries {
        table.add_row(vec![
            e.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            e.operation.clone(),
            e.record.clone().unwrap_or_default(),
            e.details.clone().unwrap_or_default(),
        ]);
    }

    println!("{table}");
}
