//! Daily cutoff sweep: force-closes sessions left open past the configured
//! wall-clock boundary.
//!
//! The sweep runs opportunistically (service start, a periodic tick, an
//! explicit endpoint, the `cutoff_sweep` binary). A session discovered late
//! is still closed at a cutoff boundary, never at "now", so lateness never
//! inflates credited hours.

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::models::session::SessionChanges;
use crate::repositories::SessionRepositoryTrait;
use crate::types::SessionId;
use crate::utils::clock::Clock;
use crate::utils::hours::worked_hours;
use crate::utils::time::{first_cutoff_at_or_after, latest_cutoff_at_or_before};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SweepFailure {
    pub session_id: SessionId,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct SweepReport {
    /// Sessions force-closed by this run.
    pub closed: usize,
    /// Per-session failures; the rest of the batch still completes.
    pub failed: Vec<SweepFailure>,
}

pub struct CutoffSweeper {
    repo: Arc<dyn SessionRepositoryTrait>,
    clock: Arc<dyn Clock>,
    time_zone: Tz,
    cutoff: NaiveTime,
}

impl CutoffSweeper {
    pub fn new(
        repo: Arc<dyn SessionRepositoryTrait>,
        clock: Arc<dyn Clock>,
        time_zone: Tz,
        cutoff: NaiveTime,
    ) -> Self {
        Self {
            repo,
            clock,
            time_zone,
            cutoff,
        }
    }

    /// Closes every open session whose start lies at or before the most
    /// recent cutoff boundary. Idempotent: a second run finds no candidates.
    pub async fn sweep(&self) -> Result<SweepReport, AppError> {
        let now = self.clock.now_utc();
        let boundary = latest_cutoff_at_or_before(now, &self.time_zone, self.cutoff);
        let candidates = self.repo.find_open_started_before(boundary).await?;

        let mut report = SweepReport::default();
        for session in candidates {
            // Each session closes at the first boundary after its own start:
            // identical to today@cutoff for the normal same-day case, and
            // still a boundary (not "now") for multi-day stragglers.
            let end_at = first_cutoff_at_or_after(session.start_time, &self.time_zone, self.cutoff);
            let outcome = match worked_hours(session.start_time, session.pause_time, end_at) {
                Ok(hours) => {
                    let changes = SessionChanges {
                        end_time: Some(end_at),
                        hours_worked: Some(hours),
                        is_completed: Some(true),
                        ..Default::default()
                    };
                    self.repo.update(&session.id, &changes, now).await.map(|_| ())
                }
                Err(err) => Err(AppError::InvalidState(err.to_string())),
            };
            match outcome {
                Ok(()) => {
                    tracing::info!(
                        session_id = %session.id,
                        operator = %session.operator_name,
                        end_time = %end_at,
                        "force-closed session past cutoff"
                    );
                    report.closed += 1;
                }
                Err(err) => {
                    tracing::warn!(
                        session_id = %session.id,
                        error = %err,
                        "failed to close session past cutoff"
                    );
                    report.failed.push(SweepFailure {
                        session_id: session.id,
                        error: err.to_string(),
                    });
                }
            }
        }
        Ok(report)
    }
}
