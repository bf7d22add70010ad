//! Privileged maintenance commands (reset, backup).

use anyhow::Result;
use clap::Args;
use serde::Deserialize;

use crate::output::print_success;

use super::CommandContext;

/// Clear the whole grid.
#[derive(Debug, Args)]
pub struct ResetCommand {
    /// Skip the confirmation prompt.
    #[arg(long)]
    yes: bool,
}

/// Copy the snapshot file to its backup sibling.
#[derive(Debug, Args)]
pub struct BackupCommand {}

#[derive(Debug, Deserialize)]
struct BackupResponse {
    path: String,
}

impl ResetCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        if !self.yes {
            anyhow::bail!("reset clears every assignment; re-run with --yes to confirm");
        }

        let client = ctx.client()?;
        client.post_no_content("/v1/reset").await?;

        print_success("all assignments have been reset");
        Ok(())
    }
}

impl BackupCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let client = ctx.client()?;
        let response: BackupResponse = client.post_empty("/v1/backup").await?;

        print_success(&format!("backup created at {}", response.path));
        Ok(())
    }
}
