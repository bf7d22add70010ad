//! Health check endpoints.
//!
//! Used by supervisors and load balancers to decide whether the service
//! should receive traffic.

use std::fs;
use std::path::Path;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct HealthResponse {
    /// Service status: "ok" or "degraded".
    pub status: String,

    /// Service name.
    pub service: String,

    /// Service version.
    pub version: String,

    /// Detailed component health (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<ComponentHealth>,
}

/// Component health details.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ComponentHealth {
    /// Snapshot file location status.
    pub snapshot_dir: ComponentStatus,
}

/// Individual component status.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ComponentStatus {
    /// Status: "ok" or "unavailable".
    pub status: String,

    /// Optional message with details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Create health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}

/// Basic health check - is the service running?
async fn healthz() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "roster".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        components: None,
    })
}

/// Readiness check - can mutations be persisted?
///
/// The snapshot file itself may not exist yet on a fresh install; its
/// directory must. Returns 503 when the directory is unusable.
async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let path = state.snapshot_file().path();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let dir_result = fs::metadata(dir);
    let dir_ok = dir_result.as_ref().map(|m| m.is_dir()).unwrap_or(false);
    let message = match dir_result {
        Ok(m) if !m.is_dir() => Some(format!("{} is not a directory", dir.display())),
        Err(e) => Some(e.to_string()),
        Ok(_) => None,
    };

    let response = HealthResponse {
        status: if dir_ok { "ok" } else { "degraded" }.to_string(),
        service: "roster".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        components: Some(ComponentHealth {
            snapshot_dir: ComponentStatus {
                status: if dir_ok { "ok" } else { "unavailable" }.to_string(),
                message,
            },
        }),
    };

    if dir_ok {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
