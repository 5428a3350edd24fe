//! Work-session model and the API payloads built from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::types::SessionId;

/// One operator's continuous (possibly paused) presence at a job/work
/// center, as persisted in the record store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: SessionId,
    pub job_number: String,
    pub work_center: String,
    pub operator_name: String,
    /// Set once at creation, immutable thereafter.
    pub start_time: DateTime<Utc>,
    /// Set at most once; a resume never clears it (pause-to-end model).
    pub pause_time: Option<DateTime<Utc>>,
    /// Presence is exactly what makes a session completed.
    pub end_time: Option<DateTime<Utc>>,
    /// Derived from the timestamps, never hand-edited.
    pub hours_worked: Option<f64>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Active,
    Paused,
    Completed,
}

impl Session {
    pub fn new(
        job_number: String,
        work_center: String,
        operator_name: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SessionId::new(),
            job_number,
            work_center,
            operator_name,
            start_time: now,
            pause_time: None,
            end_time: None,
            hours_worked: None,
            is_completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_none() && !self.is_completed
    }

    pub fn state(&self) -> SessionState {
        if !self.is_open() {
            SessionState::Completed
        } else if self.pause_time.is_some() {
            SessionState::Paused
        } else {
            SessionState::Active
        }
    }
}

/// Partial update applied to a stored session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionChanges {
    pub pause_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub hours_worked: Option<f64>,
    pub is_completed: Option<bool>,
}

/// Store-side filter for listing sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionFilter {
    pub job_number: Option<String>,
    pub work_center: Option<String>,
    pub operator_name: Option<String>,
    pub started_after: Option<DateTime<Utc>>,
    pub started_before: Option<DateTime<Utc>>,
    /// When false, only completed sessions are returned.
    pub include_open: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StartSessionRequest {
    #[validate(length(min = 1, max = 100))]
    pub job_number: String,
    #[validate(length(min = 1, max = 100))]
    pub work_center: String,
    #[validate(length(min = 1, max = 100))]
    pub operator_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub id: SessionId,
    pub job_number: String,
    pub work_center: String,
    pub operator_name: String,
    pub start_time: DateTime<Utc>,
    pub pause_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub hours_worked: Option<f64>,
    pub state: SessionState,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        let state = session.state();
        SessionResponse {
            id: session.id,
            job_number: session.job_number,
            work_center: session.work_center,
            operator_name: session.operator_name,
            start_time: session.start_time,
            pause_time: session.pause_time,
            end_time: session.end_time,
            hours_worked: session.hours_worked,
            state,
        }
    }
}

/// Reply for the active-session (recovery) endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionStatusResponse {
    /// `none`, `active` or `paused`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionResponse>,
    /// Wall-clock hours since start, for the live display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_hours: Option<f64>,
}

impl SessionStatusResponse {
    pub fn none() -> Self {
        Self {
            status: "none".into(),
            session: None,
            elapsed_hours: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct ActiveSessionQuery {
    pub operator: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct SessionListQuery {
    pub job_number: Option<String>,
    pub work_center: Option<String>,
    pub operator: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    #[serde(default)]
    pub include_open: bool,
}

impl From<SessionListQuery> for SessionFilter {
    fn from(query: SessionListQuery) -> Self {
        SessionFilter {
            job_number: query.job_number,
            work_center: query.work_center,
            operator_name: query.operator,
            started_after: query.from,
            started_before: query.to,
            include_open: query.include_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(now: DateTime<Utc>) -> Session {
        Session::new("1001".into(), "SMT".into(), "jane".into(), now)
    }

    #[test]
    fn new_session_starts_active_and_open() {
        let now = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
        let session = sample(now);
        assert!(session.is_open());
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.start_time, now);
        assert!(session.pause_time.is_none());
        assert!(session.hours_worked.is_none());
    }

    #[test]
    fn state_follows_pause_and_end_markers() {
        let now = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
        let mut session = sample(now);

        session.pause_time = Some(now + chrono::Duration::hours(1));
        assert_eq!(session.state(), SessionState::Paused);

        session.end_time = Some(now + chrono::Duration::hours(2));
        session.is_completed = true;
        assert_eq!(session.state(), SessionState::Completed);
        assert!(!session.is_open());
    }

    #[test]
    fn session_state_serde_snake_case() {
        let s: SessionState = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(s, SessionState::Paused);
        let v = serde_json::to_value(SessionState::Active).unwrap();
        assert_eq!(v, serde_json::json!("active"));
    }
}
