#![allow(dead_code)]
//! Shared fixtures: an in-memory record store honoring the same contract as
//! the Postgres repository (including the one-open-session-per-operator
//! uniqueness backstop) and a manually advanced clock.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use floortrack_engine::config::Config;
use floortrack_engine::error::AppError;
use floortrack_engine::models::session::{Session, SessionChanges, SessionFilter};
use floortrack_engine::models::suggestion::{Suggestion, SuggestionKind};
use floortrack_engine::repositories::{SessionRepositoryTrait, SuggestionLookupTrait};
use floortrack_engine::state::AppState;
use floortrack_engine::types::SessionId;
use floortrack_engine::utils::clock::Clock;

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<Vec<Session>>,
    failing: AtomicBool,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent store call fail with an I/O error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn insert(&self, session: Session) {
        self.sessions.lock().unwrap().push(session);
    }

    pub fn get(&self, id: &SessionId) -> Option<Session> {
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.id == id)
            .cloned()
    }

    fn check_failing(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::Io(anyhow::anyhow!("simulated store outage")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SessionRepositoryTrait for InMemorySessionRepository {
    async fn create(&self, session: &Session) -> Result<Session, AppError> {
        self.check_failing()?;
        let mut sessions = self.sessions.lock().unwrap();
        // Mirror of the partial unique index on open sessions.
        if sessions
            .iter()
            .any(|s| s.operator_name == session.operator_name && s.end_time.is_none())
        {
            return Err(AppError::Conflict(
                "An open session already exists for this operator".to_string(),
            ));
        }
        sessions.push(session.clone());
        Ok(session.clone())
    }

    async fn update(
        &self,
        id: &SessionId,
        changes: &SessionChanges,
        now: DateTime<Utc>,
    ) -> Result<Session, AppError> {
        self.check_failing()?;
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
        if let Some(pause_time) = changes.pause_time {
            session.pause_time = Some(pause_time);
        }
        if let Some(end_time) = changes.end_time {
            session.end_time = Some(end_time);
        }
        if let Some(hours_worked) = changes.hours_worked {
            session.hours_worked = Some(hours_worked);
        }
        if let Some(is_completed) = changes.is_completed {
            session.is_completed = is_completed;
        }
        session.updated_at = now;
        Ok(session.clone())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, AppError> {
        self.check_failing()?;
        Ok(self.get(id))
    }

    async fn find_open_by_operator(&self, operator: &str) -> Result<Option<Session>, AppError> {
        self.check_failing()?;
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.operator_name == operator && s.end_time.is_none())
            .max_by_key(|s| s.start_time)
            .cloned())
    }

    async fn find_open_started_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Session>, AppError> {
        self.check_failing()?;
        let mut open: Vec<Session> = self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.end_time.is_none() && s.start_time <= cutoff)
            .cloned()
            .collect();
        open.sort_by_key(|s| s.start_time);
        Ok(open)
    }

    async fn list(&self, filter: &SessionFilter) -> Result<Vec<Session>, AppError> {
        self.check_failing()?;
        let mut matches: Vec<Session> = self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| {
                filter
                    .job_number
                    .as_ref()
                    .map_or(true, |job| &s.job_number == job)
                    && filter
                        .work_center
                        .as_ref()
                        .map_or(true, |wc| &s.work_center == wc)
                    && filter
                        .operator_name
                        .as_ref()
                        .map_or(true, |op| &s.operator_name == op)
                    && filter.started_after.map_or(true, |t| s.start_time >= t)
                    && filter.started_before.map_or(true, |t| s.start_time <= t)
                    && (filter.include_open || s.end_time.is_some())
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(matches)
    }
}

#[async_trait]
impl SuggestionLookupTrait for InMemorySessionRepository {
    async fn lookup_by_prefix(
        &self,
        kind: SuggestionKind,
        text: &str,
    ) -> Result<Vec<Suggestion>, AppError> {
        self.check_failing()?;
        let prefix = text.to_lowercase();
        let mut values: Vec<String> = self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .map(|s| match kind {
                SuggestionKind::Job => s.job_number.clone(),
                SuggestionKind::WorkCenter => s.work_center.clone(),
                SuggestionKind::Operator => s.operator_name.clone(),
            })
            .filter(|value| value.to_lowercase().starts_with(&prefix))
            .collect();
        values.sort();
        values.dedup();
        values.truncate(10);
        Ok(values
            .into_iter()
            .map(|value| Suggestion { kind, value })
            .collect())
    }
}

pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self(Mutex::new(start))
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.0.lock().unwrap() = to;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now_utc(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, h, m, 0).unwrap()
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        time_zone: chrono_tz::UTC,
        cutoff_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        sweep_interval_secs: 300,
        autofill_debounce_ms: 300,
    }
}

pub fn app_state(
    repo: Arc<InMemorySessionRepository>,
    clock: Arc<ManualClock>,
) -> AppState {
    AppState::new(repo.clone(), repo, clock, test_config())
}
