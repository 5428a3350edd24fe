use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Returns the current time in the configured timezone.
pub fn now_in_timezone(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Returns today's date in the configured timezone.
pub fn today_local(tz: &Tz) -> NaiveDate {
    now_in_timezone(tz).date_naive()
}

/// Resolves a wall-clock datetime in `tz` to an absolute instant.
///
/// DST folds resolve to the earlier instant; a wall-clock time that falls
/// into a spring-forward gap resolves to the first valid instant after it.
fn resolve_in_zone(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        LocalResult::None => {
            let mut probe = local;
            for _ in 0..8 {
                probe += Duration::minutes(30);
                if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
                    return dt.with_timezone(&Utc);
                }
            }
            // No real timezone has gaps this wide; interpret as UTC.
            local.and_utc()
        }
    }
}

/// Returns the most recent daily cutoff boundary at or before `now`.
pub fn latest_cutoff_at_or_before(now: DateTime<Utc>, tz: &Tz, cutoff: NaiveTime) -> DateTime<Utc> {
    let mut date = now.with_timezone(tz).date_naive();
    loop {
        let boundary = resolve_in_zone(tz, date.and_time(cutoff));
        if boundary <= now {
            return boundary;
        }
        match date.pred_opt() {
            Some(prev) => date = prev,
            None => return boundary,
        }
    }
}

/// Returns the first daily cutoff boundary at or after `instant`.
pub fn first_cutoff_at_or_after(instant: DateTime<Utc>, tz: &Tz, cutoff: NaiveTime) -> DateTime<Utc> {
    let mut date = instant.with_timezone(tz).date_naive();
    loop {
        let boundary = resolve_in_zone(tz, date.and_time(cutoff));
        if boundary >= instant {
            return boundary;
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => return boundary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Chicago;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn cutoff() -> NaiveTime {
        NaiveTime::from_hms_opt(17, 0, 0).unwrap()
    }

    #[test]
    fn now_in_timezone_returns_datetime_in_tz() {
        let tz = chrono_tz::UTC;
        let result = now_in_timezone(&tz);
        assert_eq!(result.timezone(), tz);
    }

    #[test]
    fn latest_cutoff_is_today_when_past_cutoff() {
        let tz = chrono_tz::UTC;
        let now = utc(2024, 3, 4, 18, 30);
        assert_eq!(
            latest_cutoff_at_or_before(now, &tz, cutoff()),
            utc(2024, 3, 4, 17, 0)
        );
    }

    #[test]
    fn latest_cutoff_steps_back_a_day_before_cutoff() {
        let tz = chrono_tz::UTC;
        let now = utc(2024, 3, 4, 9, 0);
        assert_eq!(
            latest_cutoff_at_or_before(now, &tz, cutoff()),
            utc(2024, 3, 3, 17, 0)
        );
    }

    #[test]
    fn first_cutoff_same_day_start() {
        let tz = chrono_tz::UTC;
        let start = utc(2024, 3, 4, 9, 0);
        assert_eq!(
            first_cutoff_at_or_after(start, &tz, cutoff()),
            utc(2024, 3, 4, 17, 0)
        );
    }

    #[test]
    fn first_cutoff_evening_start_rolls_to_next_day() {
        let tz = chrono_tz::UTC;
        let start = utc(2024, 3, 4, 18, 0);
        assert_eq!(
            first_cutoff_at_or_after(start, &tz, cutoff()),
            utc(2024, 3, 5, 17, 0)
        );
    }

    #[test]
    fn cutoff_boundary_respects_business_timezone() {
        // 17:00 in Chicago is 23:00 UTC during CST (UTC-6).
        let start = utc(2024, 1, 10, 15, 0);
        assert_eq!(
            first_cutoff_at_or_after(start, &Chicago, cutoff()),
            utc(2024, 1, 10, 23, 0)
        );
    }

    #[test]
    fn boundary_in_dst_gap_resolves_forward() {
        // 2024-03-10 02:30 does not exist in Chicago (spring forward).
        let gap = NaiveTime::from_hms_opt(2, 30, 0).unwrap();
        let start = utc(2024, 3, 10, 0, 0);
        let boundary = first_cutoff_at_or_after(start, &Chicago, gap);
        // Resolves to 03:00 CDT == 08:00 UTC.
        assert_eq!(boundary, utc(2024, 3, 10, 8, 0));
    }
}
