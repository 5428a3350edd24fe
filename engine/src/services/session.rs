//! Session state machine over the record store.
//!
//! The stored record is the source of truth: a session is open while
//! `end_time` is absent, paused while an open session carries a
//! `pause_time`. Each transition validates against the stored state, so a
//! failed store call leaves the session exactly where it was.

use std::sync::Arc;

use validator::Validate;

use crate::error::AppError;
use crate::models::session::{
    Session, SessionChanges, SessionState, SessionStatusResponse, StartSessionRequest,
};
use crate::repositories::SessionRepositoryTrait;
use crate::types::SessionId;
use crate::utils::clock::Clock;
use crate::utils::hours::{elapsed_hours, worked_hours};
use crate::validation::rules;

pub struct SessionService {
    repo: Arc<dyn SessionRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl SessionService {
    pub fn new(repo: Arc<dyn SessionRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Opens a session for the operator.
    ///
    /// The open-session pre-check gives a friendly `Conflict` on the common
    /// path; the store's partial unique index closes the race two devices
    /// could otherwise win simultaneously.
    pub async fn start(&self, request: StartSessionRequest) -> Result<Session, AppError> {
        request.validate()?;
        let mut blank = Vec::new();
        for (field, value) in [
            ("job_number", &request.job_number),
            ("work_center", &request.work_center),
            ("operator_name", &request.operator_name),
        ] {
            if rules::non_blank(value).is_err() {
                blank.push(format!("{}: must_not_be_blank", field));
            }
        }
        if !blank.is_empty() {
            return Err(AppError::Validation(blank));
        }

        if let Some(open) = self
            .repo
            .find_open_by_operator(&request.operator_name)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Operator {} already has an open session on job {}",
                request.operator_name, open.job_number
            )));
        }

        let now = self.clock.now_utc();
        let session = Session::new(
            request.job_number,
            request.work_center,
            request.operator_name,
            now,
        );
        tracing::info!(
            session_id = %session.id,
            operator = %session.operator_name,
            job = %session.job_number,
            "starting session"
        );
        self.repo.create(&session).await
    }

    /// Records the pause instant on an open session.
    pub async fn pause(&self, id: &SessionId) -> Result<Session, AppError> {
        let session = self.require_open(id).await?;
        if session.pause_time.is_some() {
            return Err(AppError::InvalidState(
                "Session is already paused".to_string(),
            ));
        }
        let now = self.clock.now_utc();
        let changes = SessionChanges {
            pause_time: Some(now),
            ..Default::default()
        };
        tracing::info!(session_id = %id, "pausing session");
        self.repo.update(id, &changes, now).await
    }

    /// Completes a session; this is the point where `hours_worked` becomes
    /// authoritative.
    pub async fn stop(&self, id: &SessionId) -> Result<Session, AppError> {
        let session = self.require_open(id).await?;
        let now = self.clock.now_utc();
        let hours = worked_hours(session.start_time, session.pause_time, now)
            .map_err(|err| AppError::InvalidState(err.to_string()))?;
        let changes = SessionChanges {
            end_time: Some(now),
            hours_worked: Some(hours),
            is_completed: Some(true),
            ..Default::default()
        };
        tracing::info!(session_id = %id, hours, "stopping session");
        self.repo.update(id, &changes, now).await
    }

    /// The operator's open session, if one survived a reload or network
    /// interruption. Local state is a cache; this is the reconciliation
    /// point.
    pub async fn recover_active_session(&self, operator: &str) -> Result<Option<Session>, AppError> {
        self.repo.find_open_by_operator(operator).await
    }

    /// Recovery plus the live elapsed display, shaped for the status
    /// endpoint.
    pub async fn active_status(&self, operator: &str) -> Result<SessionStatusResponse, AppError> {
        match self.recover_active_session(operator).await? {
            Some(session) => {
                let elapsed = elapsed_hours(session.start_time, self.clock.now_utc());
                let status = match session.state() {
                    SessionState::Paused => "paused",
                    _ => "active",
                };
                Ok(SessionStatusResponse {
                    status: status.to_string(),
                    elapsed_hours: Some(elapsed),
                    session: Some(session.into()),
                })
            }
            None => Ok(SessionStatusResponse::none()),
        }
    }

    async fn require_open(&self, id: &SessionId) -> Result<Session, AppError> {
        let session = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No session with id {}", id)))?;
        if !session.is_open() {
            return Err(AppError::NotFound(format!(
                "Session {} is already completed",
                id
            )));
        }
        Ok(session)
    }
}
