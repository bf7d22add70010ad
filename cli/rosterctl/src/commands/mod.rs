//! CLI commands.

mod admin;
mod assignments;
mod chat;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::client::ApiClient;
use crate::output::OutputFormat;

/// laneroster CLI - manage the team lane assignment grid.
#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Base URL of the roster service.
    #[arg(
        long,
        global = true,
        env = "ROSTER_SERVER",
        default_value = "http://127.0.0.1:8080"
    )]
    server: String,

    /// Send the privileged flag with requests.
    #[arg(long, global = true, env = "ROSTER_ADMIN")]
    admin: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Assign a member to a lane.
    Assign(assignments::AssignCommand),

    /// Remove a member from their lane.
    Remove(assignments::RemoveCommand),

    /// List current assignments.
    List(assignments::ListCommand),

    /// Show the full team grid, empty lanes included.
    Status(assignments::StatusCommand),

    /// Clear the whole grid.
    Reset(admin::ResetCommand),

    /// Copy the snapshot file to its backup sibling.
    Backup(admin::BackupCommand),

    /// Send a raw chat command and print the reply.
    Chat(chat::ChatCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub async fn run(self) -> Result<()> {
        let format = match self.format.as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        };

        let ctx = CommandContext {
            server: self.server,
            admin: self.admin,
            format,
        };

        match self.command {
            Commands::Assign(cmd) => cmd.run(ctx).await,
            Commands::Remove(cmd) => cmd.run(ctx).await,
            Commands::List(cmd) => cmd.run(ctx).await,
            Commands::Status(cmd) => cmd.run(ctx).await,
            Commands::Reset(cmd) => cmd.run(ctx).await,
            Commands::Backup(cmd) => cmd.run(ctx).await,
            Commands::Chat(cmd) => cmd.run(ctx).await,
            Commands::Version => {
                println!("roster {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub server: String,
    pub admin: bool,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Get an API client.
    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.server, self.admin)
    }
}
