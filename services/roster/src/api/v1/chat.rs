//! Chat-command passthrough endpoint.
//!
//! Lets a platform bot forward raw command text and relay the rendered
//! reply without linking against this service.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::chat::CommandRouter;
use crate::state::AppState;

/// Create chat routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(dispatch_command))
}

/// A chat command to execute.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Raw command text, e.g. `assign --team 1 --lane 3`.
    pub text: String,

    /// Name of the user who issued the command.
    pub author: String,

    /// Whether the issuing user is privileged.
    #[serde(default)]
    pub is_admin: bool,
}

/// The rendered reply.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

async fn dispatch_command(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let reply = CommandRouter::new(state.service()).dispatch(&req.text, &req.author, req.is_admin);
    Json(ChatResponse { reply })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::JsonFile;
    use crate::service::AllocationService;
    use crate::store::OccupancyStore;

    #[tokio::test]
    async fn test_dispatch_command() {
        let state = AppState::new(
            AllocationService::new(OccupancyStore::new()),
            JsonFile::new("assignments.json"),
        );
        let Json(response) = dispatch_command(
            State(state),
            Json(ChatRequest {
                text: "assign --team 1 --lane 3".to_string(),
                author: "alice".to_string(),
                is_admin: false,
            }),
        )
        .await;
        assert_eq!(response.reply, "Successfully assigned alice to Team 1, Lane 3.");
    }
}
