//! Raw chat-command passthrough.
//!
//! Sends a command line through the service's chat adapter exactly as a
//! platform bot would, which makes scripted parity checks easy.

use anyhow::Result;
use clap::Args;
use serde::{Deserialize, Serialize};

use super::CommandContext;

/// Send a raw chat command and print the reply.
#[derive(Debug, Args)]
pub struct ChatCommand {
    /// Command text, e.g. "assign --team 1 --lane 3".
    text: String,

    /// Author name the command runs as.
    #[arg(long, default_value = "operator")]
    author: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    text: &'a str,
    author: &'a str,
    is_admin: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    reply: String,
}

impl ChatCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let client = ctx.client()?;

        let response: ChatResponse = client
            .post(
                "/v1/chat",
                &ChatRequest {
                    text: &self.text,
                    author: &self.author,
                    is_admin: ctx.admin,
                },
            )
            .await?;

        println!("{}", response.reply);
        Ok(())
    }
}
