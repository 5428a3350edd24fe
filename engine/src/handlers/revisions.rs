use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::utils::revision;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NextRevisionRequest {
    pub current: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NextRevisionResponse {
    pub current: String,
    pub next: String,
}

/// Successor label for a traveler derived from a prior revision.
pub async fn next_revision(
    Json(payload): Json<NextRevisionRequest>,
) -> Json<NextRevisionResponse> {
    let next = revision::next_revision(&payload.current);
    Json(NextRevisionResponse {
        current: payload.current,
        next,
    })
}
