//! Team status endpoint: the whole grid, lane by lane.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Create team routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(team_status))
}

/// Response for the team status grid.
#[derive(Debug, Serialize)]
pub struct TeamStatusResponse {
    /// One entry per team, ascending.
    pub teams: Vec<TeamLanes>,
}

/// One team's lanes.
#[derive(Debug, Serialize)]
pub struct TeamLanes {
    /// Team number.
    pub team: u8,

    /// Number of occupied lanes on this team.
    pub filled: usize,

    /// All lanes, ascending; empty lanes have no user.
    pub lanes: Vec<LaneOccupant>,
}

/// One lane and its occupant, if any.
#[derive(Debug, Serialize)]
pub struct LaneOccupant {
    /// Lane number.
    pub lane: u8,

    /// Occupying user, absent when the lane is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

async fn team_status(State(state): State<AppState>) -> Json<TeamStatusResponse> {
    let teams = state
        .service()
        .team_status()
        .into_iter()
        .map(|(team, lanes)| TeamLanes {
            team,
            filled: lanes.values().filter(|user| user.is_some()).count(),
            lanes: lanes
                .into_iter()
                .map(|(lane, user)| LaneOccupant { lane, user })
                .collect(),
        })
        .collect();
    Json(TeamStatusResponse { teams })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::JsonFile;
    use crate::service::AllocationService;
    use crate::store::OccupancyStore;

    #[tokio::test]
    async fn test_team_status_shape() {
        let state = AppState::new(
            AllocationService::new(OccupancyStore::new()),
            JsonFile::new("assignments.json"),
        );
        state.service().assign_to_slot("alice", 2, 5).unwrap();

        let Json(response) = team_status(State(state)).await;
        assert_eq!(response.teams.len(), 3);
        let team2 = &response.teams[1];
        assert_eq!(team2.team, 2);
        assert_eq!(team2.filled, 1);
        assert_eq!(team2.lanes.len(), 8);
        assert_eq!(team2.lanes[4].user.as_deref(), Some("alice"));
    }
}
