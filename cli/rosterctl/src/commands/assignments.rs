//! Assignment commands (place, remove, list, status).

use anyhow::Result;
use clap::Args;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{print_output, print_single, print_success};

use super::CommandContext;

/// Assign a member to a lane.
#[derive(Debug, Args)]
pub struct AssignCommand {
    /// Member to assign.
    member: String,

    /// Team number (1-3).
    #[arg(long)]
    team: Option<i64>,

    /// Lane number (1-8).
    #[arg(long)]
    lane: Option<i64>,

    /// Assign to the first free lane anywhere instead.
    #[arg(long, conflicts_with_all = ["team", "lane"])]
    random: bool,
}

/// Remove a member from their lane.
#[derive(Debug, Args)]
pub struct RemoveCommand {
    /// Member to remove.
    member: String,
}

/// List current assignments.
#[derive(Debug, Args)]
pub struct ListCommand {}

/// Show the full team grid.
#[derive(Debug, Args)]
pub struct StatusCommand {}

// =============================================================================
// API types
// =============================================================================

#[derive(Debug, Serialize)]
struct CreateAssignmentRequest<'a> {
    user: &'a str,
    team: i64,
    lane: i64,
}

#[derive(Debug, Serialize)]
struct AssignAnyRequest<'a> {
    user: &'a str,
}

#[derive(Debug, Deserialize)]
struct SlotBody {
    team: u8,
    lane: u8,
}

#[derive(Debug, Deserialize)]
struct CreateAssignmentResponse {
    placed: bool,
    #[serde(default)]
    suggestion: Option<SlotBody>,
}

#[derive(Debug, Deserialize)]
struct AssignAnyResponse {
    slot: SlotBody,
}

/// Assignment row from the API.
#[derive(Debug, Serialize, Deserialize, Tabled)]
struct AssignmentRow {
    #[tabled(rename = "User")]
    user: String,

    #[tabled(rename = "Team")]
    team: u8,

    #[tabled(rename = "Lane")]
    lane: u8,
}

#[derive(Debug, Serialize, Deserialize)]
struct ListAssignmentsResponse {
    items: Vec<AssignmentRow>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TeamStatusResponse {
    teams: Vec<TeamLanes>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TeamLanes {
    team: u8,
    filled: usize,
    lanes: Vec<LaneOccupant>,
}

#[derive(Debug, Serialize, Deserialize)]
struct LaneOccupant {
    lane: u8,
    #[serde(default)]
    user: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

impl AssignCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let client = ctx.client()?;

        if self.random {
            let response: AssignAnyResponse = client
                .post("/v1/assignments/any", &AssignAnyRequest { user: &self.member })
                .await?;
            print_success(&format!(
                "{} assigned to Team {} Lane {}",
                self.member, response.slot.team, response.slot.lane
            ));
            return Ok(());
        }

        let (Some(team), Some(lane)) = (self.team, self.lane) else {
            anyhow::bail!("provide --team and --lane, or --random");
        };

        let response: CreateAssignmentResponse = client
            .post(
                "/v1/assignments",
                &CreateAssignmentRequest {
                    user: &self.member,
                    team,
                    lane,
                },
            )
            .await?;

        if response.placed {
            print_success(&format!(
                "{} assigned to Team {team} Lane {lane}",
                self.member
            ));
        } else if let Some(slot) = response.suggestion {
            println!("Lane taken. Suggested: Team {} Lane {}", slot.team, slot.lane);
        } else {
            println!("All lanes are full.");
        }
        Ok(())
    }
}

impl RemoveCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let client = ctx.client()?;

        client
            .delete(&format!("/v1/assignments/{}", self.member))
            .await
            .map_err(|e| match e {
                CliError::Api { status: 404, .. } => {
                    CliError::NotFound(format!("{} is not assigned to any lane", self.member))
                }
                other => other,
            })?;

        print_success(&format!("{} removed from lane", self.member));
        Ok(())
    }
}

impl ListCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let client = ctx.client()?;

        let response: ListAssignmentsResponse = client.get("/v1/assignments").await?;

        match ctx.format {
            crate::output::OutputFormat::Table => print_output(&response.items, ctx.format),
            crate::output::OutputFormat::Json => print_single(&response, ctx.format),
        }
        Ok(())
    }
}

impl StatusCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let client = ctx.client()?;

        let response: TeamStatusResponse = client.get("/v1/teams").await?;

        match ctx.format {
            crate::output::OutputFormat::Table => {
                for team in &response.teams {
                    println!(
                        "Team {} ({}/{} lanes filled)",
                        team.team,
                        team.filled,
                        team.lanes.len()
                    );
                    for lane in &team.lanes {
                        println!(
                            "  Lane {}: {}",
                            lane.lane,
                            lane.user.as_deref().unwrap_or("-")
                        );
                    }
                    println!();
                }
            }
            crate::output::OutputFormat::Json => print_single(&response, ctx.format),
        }
        Ok(())
    }
}
