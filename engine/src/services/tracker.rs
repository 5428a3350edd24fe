//! Per-operator/device session tracking.
//!
//! One `SessionTracker` is constructed per operator when a client comes up
//! and dropped on teardown; it is never shared as ambient global state. The
//! tracker's cache exists to keep the live display running and to survive a
//! reload via `recover`; the store stays authoritative throughout.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::models::session::{Session, StartSessionRequest};
use crate::services::session::SessionService;
use crate::types::SessionId;
use crate::utils::clock::Clock;
use crate::utils::hours::elapsed_hours;

/// Locally cached view of the operator's open session.
#[derive(Debug, Clone)]
struct LiveSession {
    session_id: SessionId,
    job_number: String,
    work_center: String,
    start_time: DateTime<Utc>,
    is_paused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerState {
    None,
    Active,
    Paused,
}

/// View-state handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct TrackerSnapshot {
    pub state: TrackerState,
    pub session_id: Option<SessionId>,
    pub job_number: Option<String>,
    pub work_center: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    /// Wall-clock hours since start; keeps counting through a pause.
    pub elapsed_hours: f64,
}

impl TrackerSnapshot {
    fn none() -> Self {
        Self {
            state: TrackerState::None,
            session_id: None,
            job_number: None,
            work_center: None,
            start_time: None,
            elapsed_hours: 0.0,
        }
    }
}

pub struct SessionTracker {
    operator_name: String,
    service: Arc<SessionService>,
    clock: Arc<dyn Clock>,
    current: Mutex<Option<LiveSession>>,
}

impl SessionTracker {
    pub fn new(
        operator_name: impl Into<String>,
        service: Arc<SessionService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            operator_name: operator_name.into(),
            service,
            clock,
            current: Mutex::new(None),
        }
    }

    pub fn operator_name(&self) -> &str {
        &self.operator_name
    }

    /// Starts a session for this operator. The cache is only touched after
    /// the store accepts the session.
    pub async fn start(
        &self,
        job_number: impl Into<String>,
        work_center: impl Into<String>,
    ) -> Result<TrackerSnapshot, AppError> {
        let mut current = self.current.lock().await;
        if let Some(live) = current.as_ref() {
            return Err(AppError::Conflict(format!(
                "A session on job {} is already being tracked",
                live.job_number
            )));
        }
        let session = self
            .service
            .start(StartSessionRequest {
                job_number: job_number.into(),
                work_center: work_center.into(),
                operator_name: self.operator_name.clone(),
            })
            .await?;
        *current = Some(LiveSession {
            session_id: session.id.clone(),
            job_number: session.job_number.clone(),
            work_center: session.work_center.clone(),
            start_time: session.start_time,
            is_paused: false,
        });
        Ok(self.snapshot_of(current.as_ref()))
    }

    /// Persists the pause instant, then flips the local flag.
    pub async fn pause(&self) -> Result<TrackerSnapshot, AppError> {
        let mut current = self.current.lock().await;
        let live = current
            .as_mut()
            .ok_or_else(|| AppError::NotFound("No session is being tracked".to_string()))?;
        self.service.pause(&live.session_id).await?;
        live.is_paused = true;
        Ok(self.snapshot_of(current.as_ref()))
    }

    /// Purely local state flip: the stored `pause_time` is deliberately not
    /// cleared, so hours credited at stop still end at the recorded pause.
    /// Work done between a resume and the final stop is therefore excluded
    /// (the pause-to-end model).
    pub async fn resume(&self) -> Result<TrackerSnapshot, AppError> {
        let mut current = self.current.lock().await;
        let live = current
            .as_mut()
            .ok_or_else(|| AppError::NotFound("No session is being tracked".to_string()))?;
        live.is_paused = false;
        Ok(self.snapshot_of(current.as_ref()))
    }

    /// Completes the tracked session and clears the cache.
    pub async fn stop(&self) -> Result<Session, AppError> {
        let mut current = self.current.lock().await;
        let live = current
            .as_ref()
            .ok_or_else(|| AppError::NotFound("No session is being tracked".to_string()))?;
        let completed = self.service.stop(&live.session_id).await?;
        *current = None;
        Ok(completed)
    }

    /// Reconciles the cache with the store after a reload: an open session
    /// is re-adopted with its stored start and paused flag; otherwise the
    /// tracker returns to `None`.
    pub async fn recover(&self) -> Result<TrackerSnapshot, AppError> {
        let mut current = self.current.lock().await;
        *current = self
            .service
            .recover_active_session(&self.operator_name)
            .await?
            .map(|session| LiveSession {
                session_id: session.id,
                job_number: session.job_number,
                work_center: session.work_center,
                start_time: session.start_time,
                is_paused: session.pause_time.is_some(),
            });
        Ok(self.snapshot_of(current.as_ref()))
    }

    /// Current view-state, for the periodic display tick.
    pub async fn snapshot(&self) -> TrackerSnapshot {
        let current = self.current.lock().await;
        self.snapshot_of(current.as_ref())
    }

    fn snapshot_of(&self, live: Option<&LiveSession>) -> TrackerSnapshot {
        match live {
            Some(live) => TrackerSnapshot {
                state: if live.is_paused {
                    TrackerState::Paused
                } else {
                    TrackerState::Active
                },
                session_id: Some(live.session_id.clone()),
                job_number: Some(live.job_number.clone()),
                work_center: Some(live.work_center.clone()),
                start_time: Some(live.start_time),
                elapsed_hours: elapsed_hours(live.start_time, self.clock.now_utc()),
            },
            None => TrackerSnapshot::none(),
        }
    }
}
