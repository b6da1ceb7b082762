mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::logging::init_logging;

#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, default_value = "/etc/dshbd.yaml", env = "DSHBD_CONFIG")]
    config: PathBuf,
}

#[derive(clap::Subcommand)]
pub(crate) enum Commands {
    /// Validate config file
    Check,
    /// Apply pending database migrations
    Migrate,
    /// Create an account record for a login
    CreateAccount { login: String },
    /// Show the lockout state of an account without changing it
    Status { login: String },
    /// Register a failed login attempt for an account
    RecordFailure { login: String },
    /// Check whether an account is locked (clears an expired lock)
    IsLocked { login: String },
    /// Clear failed attempts and any lock on an account
    Unlock { login: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Check => crate::commands::check::command(&cli).await,
        Commands::Migrate => crate::commands::migrate::command(&cli).await,
        Commands::CreateAccount { login } => {
            crate::commands::create_account::command(&cli, login).await
        }
        Commands::Status { login } => crate::commands::status::command(&cli, login).await,
        Commands::RecordFailure { login } => {
            crate::commands::record_failure::command(&cli, login).await
        }
        Commands::IsLocked { login } => crate::commands::is_locked::command(&cli, login).await,
        Commands::Unlock { login } => crate::commands::unlock::command(&cli, login).await,
    }
}
