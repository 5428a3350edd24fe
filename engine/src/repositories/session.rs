//! Session record store: the trait the engine is written against, plus the
//! Postgres implementation.
//!
//! The trait is designed to be mocked with mockall in unit tests; the
//! integration suite runs an in-memory implementation instead.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::AppError;
use crate::models::session::{Session, SessionChanges, SessionFilter};
use crate::types::SessionId;

/// Store contract for session records.
///
/// Every method is a single async round trip; errors carry the store's own
/// failure (wrapped in `AppError`) and imply no partial local state change.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepositoryTrait: Send + Sync {
    /// Persist a freshly constructed session.
    async fn create(&self, session: &Session) -> Result<Session, AppError>;

    /// Apply a partial update and return the stored row.
    async fn update(
        &self,
        id: &SessionId,
        changes: &SessionChanges,
        now: DateTime<Utc>,
    ) -> Result<Session, AppError>;

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, AppError>;

    /// The open (uncompleted) session for an operator, if any.
    async fn find_open_by_operator(&self, operator: &str) -> Result<Option<Session>, AppError>;

    /// Open sessions started at or before the given instant; the cutoff
    /// sweeper's candidate query.
    async fn find_open_started_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Session>, AppError>;

    async fn list(&self, filter: &SessionFilter) -> Result<Vec<Session>, AppError>;
}

const SELECT_COLUMNS: &str = "id, job_number, work_center, operator_name, start_time, pause_time, \
     end_time, hours_worked, is_completed, created_at, updated_at";

/// Postgres-backed implementation of the store contract.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SessionRepositoryTrait for SessionRepository {
    async fn create(&self, session: &Session) -> Result<Session, AppError> {
        let query = format!(
            "INSERT INTO sessions (id, job_number, work_center, operator_name, start_time, \
             pause_time, end_time, hours_worked, is_completed, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {}",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Session>(&query)
            .bind(session.id.as_str())
            .bind(&session.job_number)
            .bind(&session.work_center)
            .bind(&session.operator_name)
            .bind(session.start_time)
            .bind(session.pause_time)
            .bind(session.end_time)
            .bind(session.hours_worked)
            .bind(session.is_completed)
            .bind(session.created_at)
            .bind(session.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: &SessionId,
        changes: &SessionChanges,
        now: DateTime<Utc>,
    ) -> Result<Session, AppError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE sessions SET updated_at = ");
        builder.push_bind(now);
        if let Some(pause_time) = changes.pause_time {
            builder.push(", pause_time = ").push_bind(pause_time);
        }
        if let Some(end_time) = changes.end_time {
            builder.push(", end_time = ").push_bind(end_time);
        }
        if let Some(hours_worked) = changes.hours_worked {
            builder.push(", hours_worked = ").push_bind(hours_worked);
        }
        if let Some(is_completed) = changes.is_completed {
            builder.push(", is_completed = ").push_bind(is_completed);
        }
        builder.push(" WHERE id = ").push_bind(id.as_str());
        builder.push(" RETURNING ").push(SELECT_COLUMNS);

        let row = builder
            .build_query_as::<Session>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Session not found".into()))?;
        Ok(row)
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, AppError> {
        let query = format!("SELECT {} FROM sessions WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query_as::<_, Session>(&query)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_open_by_operator(&self, operator: &str) -> Result<Option<Session>, AppError> {
        let query = format!(
            "SELECT {} FROM sessions WHERE operator_name = $1 AND end_time IS NULL \
             ORDER BY start_time DESC LIMIT 1",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Session>(&query)
            .bind(operator)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_open_started_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Session>, AppError> {
        let query = format!(
            "SELECT {} FROM sessions WHERE end_time IS NULL AND start_time <= $1 \
             ORDER BY start_time",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, Session>(&query)
            .bind(cutoff)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list(&self, filter: &SessionFilter) -> Result<Vec<Session>, AppError> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM sessions WHERE TRUE",
            SELECT_COLUMNS
        ));
        if let Some(job_number) = &filter.job_number {
            builder.push(" AND job_number = ").push_bind(job_number);
        }
        if let Some(work_center) = &filter.work_center {
            builder.push(" AND work_center = ").push_bind(work_center);
        }
        if let Some(operator_name) = &filter.operator_name {
            builder.push(" AND operator_name = ").push_bind(operator_name);
        }
        if let Some(after) = filter.started_after {
            builder.push(" AND start_time >= ").push_bind(after);
        }
        if let Some(before) = filter.started_before {
            builder.push(" AND start_time <= ").push_bind(before);
        }
        if !filter.include_open {
            builder.push(" AND end_time IS NOT NULL");
        }
        builder.push(" ORDER BY start_time DESC");

        let rows = builder
            .build_query_as::<Session>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
