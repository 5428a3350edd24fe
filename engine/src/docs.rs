#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    handlers::revisions::{NextRevisionRequest, NextRevisionResponse},
    models::{
        session::{
            ActiveSessionQuery, SessionListQuery, SessionResponse, SessionState,
            SessionStatusResponse, StartSessionRequest,
        },
        suggestion::{Suggestion, SuggestionKind, SuggestionQuery},
    },
    services::{
        aggregate::{GroupTotals, WorkSummary},
        sweeper::{SweepFailure, SweepReport},
    },
    types::SessionId,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        start_session_doc,
        pause_session_doc,
        stop_session_doc,
        active_session_doc,
        list_sessions_doc,
        summary_doc,
        sweep_doc,
        suggestions_doc,
        next_revision_doc
    ),
    components(
        schemas(
            SessionId,
            StartSessionRequest,
            SessionResponse,
            SessionState,
            SessionStatusResponse,
            ActiveSessionQuery,
            SessionListQuery,
            WorkSummary,
            GroupTotals,
            SweepReport,
            SweepFailure,
            Suggestion,
            SuggestionKind,
            SuggestionQuery,
            NextRevisionRequest,
            NextRevisionResponse
        )
    ),
    tags(
        (name = "Sessions", description = "Work-session lifecycle and recovery"),
        (name = "Summary", description = "Hours grouped by job and work center"),
        (name = "Suggestions", description = "Prefix lookups for traveler autofill"),
        (name = "Revisions", description = "Traveler revision labels")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    post,
    path = "/api/sessions/start",
    request_body = StartSessionRequest,
    responses(
        (status = 200, description = "Session opened", body = SessionResponse),
        (status = 400, description = "Missing or blank fields"),
        (status = 409, description = "Operator already has an open session")
    ),
    tag = "Sessions"
)]
fn start_session_doc() {}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/pause",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, body = SessionResponse),
        (status = 404, description = "No such open session"),
        (status = 409, description = "Already paused")
    ),
    tag = "Sessions"
)]
fn pause_session_doc() {}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/stop",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session completed with hours persisted", body = SessionResponse),
        (status = 404, description = "No such open session")
    ),
    tag = "Sessions"
)]
fn stop_session_doc() {}

#[utoipa::path(
    get,
    path = "/api/sessions/active",
    params(ActiveSessionQuery),
    responses((status = 200, body = SessionStatusResponse)),
    tag = "Sessions"
)]
fn active_session_doc() {}

#[utoipa::path(
    get,
    path = "/api/sessions",
    params(SessionListQuery),
    responses((status = 200, body = [SessionResponse])),
    tag = "Sessions"
)]
fn list_sessions_doc() {}

#[utoipa::path(
    get,
    path = "/api/sessions/summary",
    params(SessionListQuery),
    responses((status = 200, body = WorkSummary)),
    tag = "Summary"
)]
fn summary_doc() {}

#[utoipa::path(
    post,
    path = "/api/sessions/sweep",
    responses((status = 200, description = "Force-close report", body = SweepReport)),
    tag = "Sessions"
)]
fn sweep_doc() {}

#[utoipa::path(
    get,
    path = "/api/suggestions",
    params(SuggestionQuery),
    responses((status = 200, body = [Suggestion])),
    tag = "Suggestions"
)]
fn suggestions_doc() {}

#[utoipa::path(
    post,
    path = "/api/revisions/next",
    request_body = NextRevisionRequest,
    responses((status = 200, body = NextRevisionResponse)),
    tag = "Revisions"
)]
fn next_revision_doc() {}
