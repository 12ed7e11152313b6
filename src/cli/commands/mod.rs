//! One module per subcommand, dispatched from `main.rs`.

pub mod add;
pub mod completions;
pub mod copy;
pub mod delete;
pub mod edit;
pub mod list;
pub mod login;
pub mod logout;
pub mod open;
pub mod register;
pub mod show;
pub mod whoami;

#[cfg(feature = "audit-log")]
pub mod audit_cmd;
