use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub mod revisions;
pub mod sessions;
pub mod suggestions;

/// API routes; the binary adds tracing/CORS layers and the docs UI on top.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/sessions/start", post(sessions::start_session))
        .route("/api/sessions/{id}/pause", post(sessions::pause_session))
        .route("/api/sessions/{id}/stop", post(sessions::stop_session))
        .route("/api/sessions/active", get(sessions::get_active_session))
        .route("/api/sessions", get(sessions::list_sessions))
        .route("/api/sessions/summary", get(sessions::get_summary))
        .route("/api/sessions/sweep", post(sessions::sweep_sessions))
        .route("/api/suggestions", get(suggestions::get_suggestions))
        .route("/api/revisions/next", post(revisions::next_revision))
        .with_state(state)
}
