use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::error::AppError;
use crate::models::session::{
    ActiveSessionQuery, SessionListQuery, SessionResponse, SessionStatusResponse,
    StartSessionRequest,
};
use crate::services::aggregate::{summarize_sessions, WorkSummary};
use crate::services::sweeper::SweepReport;
use crate::state::AppState;
use crate::types::SessionId;

pub async fn start_session(
    State(state): State<AppState>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.start(payload).await?;
    Ok(Json(session.into()))
}

pub async fn pause_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.pause(&SessionId::from(id)).await?;
    Ok(Json(session.into()))
}

pub async fn stop_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.stop(&SessionId::from(id)).await?;
    Ok(Json(session.into()))
}

/// Recovery endpoint: a reloading client asks for the operator's open
/// session and rebuilds its local timer state from the answer.
pub async fn get_active_session(
    State(state): State<AppState>,
    Query(query): Query<ActiveSessionQuery>,
) -> Result<Json<SessionStatusResponse>, AppError> {
    let status = state.sessions.active_status(&query.operator).await?;
    Ok(Json(status))
}

pub async fn list_sessions(
    State(state): State<AppState>,
    Query(query): Query<SessionListQuery>,
) -> Result<Json<Vec<SessionResponse>>, AppError> {
    let sessions = state.repo.list(&query.into()).await?;
    Ok(Json(sessions.into_iter().map(Into::into).collect()))
}

pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<SessionListQuery>,
) -> Result<Json<WorkSummary>, AppError> {
    let include_open = query.include_open;
    let sessions = state.repo.list(&query.into()).await?;
    let summary = summarize_sessions(&sessions, state.clock.now_utc(), include_open);
    Ok(Json(summary))
}

pub async fn sweep_sessions(
    State(state): State<AppState>,
) -> Result<Json<SweepReport>, AppError> {
    let report = state.sweeper.sweep().await?;
    Ok(Json(report))
}
