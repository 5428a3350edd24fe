//! Worked-hours calculation from raw session timestamps.
//!
//! All arithmetic happens on absolute UTC instants; conversion to a viewer's
//! local zone is a presentation concern and never happens here.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Raised when timestamps cannot produce a non-negative duration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HoursError {
    #[error("credited end time {end} is earlier than start time {start}")]
    EndBeforeStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Computes worked hours for a session.
///
/// When a pause was recorded before the credited end, the interval from the
/// pause through to the end counts as non-worked time, so the credited span
/// is `start..pause_time` ("pause-to-end" deduction). For an in-progress
/// display the caller passes its own `now` as `end`; nothing is persisted
/// here.
///
/// An end earlier than the start is a data error and is reported instead of
/// being clamped, so aggregation can exclude the corrupt record.
pub fn worked_hours(
    start: DateTime<Utc>,
    pause_time: Option<DateTime<Utc>>,
    end: DateTime<Utc>,
) -> Result<f64, HoursError> {
    let credited_end = match pause_time {
        Some(pause) if pause < end => pause,
        _ => end,
    };
    if credited_end < start {
        return Err(HoursError::EndBeforeStart {
            start,
            end: credited_end,
        });
    }
    let duration = credited_end - start;
    Ok(duration.num_minutes() as f64 / 60.0)
}

/// Wall-clock hours since `start`, for the live elapsed display.
///
/// The display keeps running through a pause; only the persisted hours apply
/// the pause deduction. A `now` before `start` (clock skew after recovery)
/// displays as zero rather than counting backwards.
pub fn elapsed_hours(start: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    worked_hours(start, None, now).unwrap_or(0.0)
}
