//! Autofill suggestion payloads.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Which traveler field a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Job,
    WorkCenter,
    Operator,
}

impl SuggestionKind {
    /// Column the lookup reads for this kind.
    pub fn column(&self) -> &'static str {
        match self {
            SuggestionKind::Job => "job_number",
            SuggestionKind::WorkCenter => "work_center",
            SuggestionKind::Operator => "operator_name",
        }
    }
}

/// One prior value matching the typed prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct SuggestionQuery {
    pub kind: SuggestionKind,
    /// Prefix typed so far.
    pub q: String,
}
