use clap::Parser;
use securevault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Register {
            ref first_name,
            ref last_name,
            ref email,
        } => securevault::cli::commands::register::execute(
            &cli,
            first_name.as_deref(),
            last_name.as_deref(),
            email.as_deref(),
        ),
        Commands::Login { ref email } => {
            securevault::cli::commands::login::execute(&cli, email.as_deref())
        }
        Commands::Logout => securevault::cli::commands::logout::execute(&cli),
        Commands::Whoami => securevault::cli::commands::whoami::execute(&cli),
        Commands::Add {
            ref application,
            ref username,
            ref url,
        } => securevault::cli::commands::add::execute(
            &cli,
            application.as_deref(),
            username.as_deref(),
            url.as_deref(),
        ),
        Commands::List { ref term } => {
            securevault::cli::commands::list::execute(&cli, term.as_deref())
        }
        Commands::Show { id, reveal } => {
            securevault::cli::commands::show::execute(&cli, id, reveal)
        }
        Commands::Edit { id } => securevault::cli::commands::edit::execute(&cli, id),
        Commands::Delete { id } => securevault::cli::commands::delete::execute(&cli, id),
        Commands::Copy { id, username } => {
            securevault::cli::commands::copy::execute(&cli, id, username)
        }
        Commands::Open { id } => securevault::cli::commands::open::execute(&cli, id),
        #[cfg(feature = "audit-log")]
        Commands::Audit { last } => securevault::cli::commands::audit_cmd::execute(&cli, last),
        Commands::Completions { ref shell } => {
            securevault::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        securevault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
