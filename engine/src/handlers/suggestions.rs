use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::AppError;
use crate::models::suggestion::{Suggestion, SuggestionQuery};
use crate::state::AppState;

/// Server side of the autofill flow: the client's coordinator debounces and
/// dispatches here with the typed prefix.
pub async fn get_suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<Vec<Suggestion>>, AppError> {
    let suggestions = state.lookup.lookup_by_prefix(query.kind, &query.q).await?;
    Ok(Json(suggestions))
}
