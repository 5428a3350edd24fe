//! Grouping of sessions into per-(job, work center) hour totals.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::models::session::Session;
use crate::utils::hours::worked_hours;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GroupTotals {
    pub job_number: String,
    pub work_center: String,
    pub total_hours: f64,
    pub session_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct WorkSummary {
    /// Totals in first-occurrence order; no numeric sort is implied.
    pub groups: Vec<GroupTotals>,
    /// Sessions excluded because their timestamps produce a negative span.
    pub anomalies: usize,
}

/// Sums worked hours per (job, work center).
///
/// Hours are recomputed from timestamps, never read from the stored
/// `hours_worked`, so a hand-edited or corrupt record cannot skew totals:
/// an entry the calculator rejects is counted as an anomaly instead of being
/// silently included. With `include_open`, in-progress sessions contribute
/// their elapsed-so-far using `now` as the end.
pub fn summarize_sessions(
    sessions: &[Session],
    now: DateTime<Utc>,
    include_open: bool,
) -> WorkSummary {
    let mut summary = WorkSummary::default();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for session in sessions {
        let end = match session.end_time {
            Some(end) => end,
            None if include_open => now,
            None => continue,
        };
        match worked_hours(session.start_time, session.pause_time, end) {
            Ok(hours) => {
                let key = (session.job_number.clone(), session.work_center.clone());
                let slot = *index.entry(key).or_insert_with(|| {
                    summary.groups.push(GroupTotals {
                        job_number: session.job_number.clone(),
                        work_center: session.work_center.clone(),
                        total_hours: 0.0,
                        session_count: 0,
                    });
                    summary.groups.len() - 1
                });
                let group = &mut summary.groups[slot];
                group.total_hours += hours;
                group.session_count += 1;
            }
            Err(_) => summary.anomalies += 1,
        }
    }

    summary
}
