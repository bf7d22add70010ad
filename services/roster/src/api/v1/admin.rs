//! Privileged maintenance endpoints: reset and backup.
//!
//! Authorization is the caller-supplied boolean the system is scoped to:
//! the front end that terminates real auth sets `x-roster-admin: true`.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::state::AppState;

const ADMIN_HEADER: &str = "x-roster-admin";

/// Create admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reset", post(reset))
        .route("/backup", post(backup))
}

/// Response for a completed backup.
#[derive(Debug, Serialize)]
pub struct BackupResponse {
    /// Path of the backup file.
    pub path: String,
}

fn require_admin(headers: &HeaderMap) -> Result<(), ApiError> {
    let is_admin = headers
        .get(ADMIN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "true")
        .unwrap_or(false);
    if is_admin {
        Ok(())
    } else {
        Err(ApiError::forbidden(
            "admin-required",
            "this operation requires the admin flag",
        ))
    }
}

async fn reset(State(state): State<AppState>, headers: HeaderMap) -> Result<StatusCode, ApiError> {
    require_admin(&headers)?;
    state.service().reset();
    Ok(StatusCode::NO_CONTENT)
}

async fn backup(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<BackupResponse>, ApiError> {
    require_admin(&headers)?;
    let path = state.snapshot_file().backup()?;
    Ok(Json(BackupResponse {
        path: path.display().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::JsonFile;
    use crate::service::AllocationService;
    use crate::store::OccupancyStore;

    fn state() -> AppState {
        AppState::new(
            AllocationService::new(OccupancyStore::new()),
            JsonFile::new("assignments.json"),
        )
    }

    #[tokio::test]
    async fn test_reset_requires_admin_flag() {
        let state = state();
        state.service().assign_to_slot("alice", 1, 1).unwrap();

        let err = reset(State(state.clone()), HeaderMap::new())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(state.service().occupied(), 1);

        let mut headers = HeaderMap::new();
        headers.insert(ADMIN_HEADER, "true".parse().unwrap());
        let status = reset(State(state.clone()), headers).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(state.service().occupied(), 0);
    }
}
