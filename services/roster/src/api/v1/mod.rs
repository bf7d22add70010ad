//! API v1 routes.

mod admin;
mod assignments;
mod chat;
mod teams;

use axum::Router;

use crate::state::AppState;

/// Create the v1 API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/assignments", assignments::routes())
        .nest("/teams", teams::routes())
        .nest("/chat", chat::routes())
        .merge(admin::routes())
}
