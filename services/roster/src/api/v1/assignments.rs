//! Assignment endpoints: place, free-place, look up, remove, list.
//!
//! These are a direct mapping of the allocation service's contract; in
//! particular the `suggestion` field of a placement response carries the
//! same committed-or-advisory ambiguity as the core's return value.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use roster_grid::{Assignment, Slot};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::state::AppState;

/// Create assignment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_assignment).get(list_assignments))
        .route("/any", post(assign_any_free))
        .route("/{user}", get(get_assignment).delete(remove_assignment))
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Request to place a user at a specific slot.
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    /// User to place.
    pub user: String,

    /// Requested team number.
    pub team: i64,

    /// Requested lane number.
    pub lane: i64,
}

/// Outcome of a placement request.
#[derive(Debug, Serialize)]
pub struct CreateAssignmentResponse {
    /// True when the requested slot itself was taken.
    pub placed: bool,

    /// Fallback slot: committed for a same-team fallback, advisory for a
    /// grid-wide one. The shape intentionally does not distinguish the two.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Slot>,
}

/// Request to place a user at any free slot.
#[derive(Debug, Deserialize)]
pub struct AssignAnyRequest {
    /// User to place.
    pub user: String,
}

/// Outcome of a free-placement request.
#[derive(Debug, Serialize)]
pub struct AssignAnyResponse {
    /// The slot the user now occupies.
    pub slot: Slot,
}

/// Response for listing assignments.
#[derive(Debug, Serialize)]
pub struct ListAssignmentsResponse {
    /// Assignments in scan order.
    pub items: Vec<Assignment>,
}

// =============================================================================
// Handlers
// =============================================================================

async fn create_assignment(
    State(state): State<AppState>,
    Json(req): Json<CreateAssignmentRequest>,
) -> Result<Json<CreateAssignmentResponse>, ApiError> {
    let (placed, suggestion) = state
        .service()
        .assign_to_slot(&req.user, req.team, req.lane)?;
    Ok(Json(CreateAssignmentResponse { placed, suggestion }))
}

async fn assign_any_free(
    State(state): State<AppState>,
    Json(req): Json<AssignAnyRequest>,
) -> Result<Json<AssignAnyResponse>, ApiError> {
    match state.service().assign_any_free(&req.user) {
        Some(slot) => Ok(Json(AssignAnyResponse { slot })),
        None => Err(ApiError::conflict("grid-full", "no empty lanes available")),
    }
}

async fn list_assignments(State(state): State<AppState>) -> Json<ListAssignmentsResponse> {
    let items = state.service().list_all().into_values().collect();
    Json(ListAssignmentsResponse { items })
}

async fn get_assignment(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<Assignment>, ApiError> {
    state
        .service()
        .find_assignment(&user)
        .map(Json)
        .ok_or_else(|| {
            ApiError::not_found("not-assigned", format!("{user} is not assigned to any lane"))
        })
}

async fn remove_assignment(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.service().remove(&user) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(
            "not-assigned",
            format!("{user} is not assigned to any lane"),
        ))
    }
}
