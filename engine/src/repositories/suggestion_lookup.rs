//! Prefix lookup over prior traveler field values, feeding the autofill
//! coordinator.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::suggestion::{Suggestion, SuggestionKind};
use crate::repositories::session::SessionRepository;

const SUGGESTION_LIMIT: i64 = 10;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionLookupTrait: Send + Sync {
    /// Distinct prior values of the given kind starting with `text`.
    async fn lookup_by_prefix(
        &self,
        kind: SuggestionKind,
        text: &str,
    ) -> Result<Vec<Suggestion>, AppError>;
}

#[async_trait]
impl SuggestionLookupTrait for SessionRepository {
    async fn lookup_by_prefix(
        &self,
        kind: SuggestionKind,
        text: &str,
    ) -> Result<Vec<Suggestion>, AppError> {
        let column = kind.column();
        let query = format!(
            "SELECT DISTINCT {column} FROM sessions WHERE {column} ILIKE $1 || '%' \
             ORDER BY {column} LIMIT $2"
        );
        let values: Vec<String> = sqlx::query_scalar(&query)
            .bind(text)
            .bind(SUGGESTION_LIMIT)
            .fetch_all(self.pool())
            .await?;
        Ok(values
            .into_iter()
            .map(|value| Suggestion { kind, value })
            .collect())
    }
}
