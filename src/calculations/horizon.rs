use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::error::{ScheduleError, ScheduleResult};

/// Lower bound for [`default_horizon_days`].
pub const MIN_HORIZON_DAYS: u32 = 60;
/// Days projected past the end of the current month.
pub const MONTH_END_PADDING_DAYS: u32 = 7;
/// Largest horizon a caller may request (about ten years).
pub const MAX_HORIZON_DAYS: u32 = 3660;

/// Horizon long enough to cover the month containing `now`, with a week of
/// padding, and never shorter than [`MIN_HORIZON_DAYS`]. Capped at
/// [`MAX_HORIZON_DAYS`] when `start` lies far in the past.
pub fn default_horizon_days(start: NaiveDateTime, now: NaiveDateTime) -> u32 {
    let Some(month_end) = end_of_month(now.date()) else {
        return MIN_HORIZON_DAYS;
    };

    let remaining = month_end - start;
    let day_ms = Duration::days(1).num_milliseconds();
    let ms = remaining.num_milliseconds().max(0);
    // ceiling division on non-negative values
    let days = (ms + day_ms - 1) / day_ms;
    let days = u32::try_from(days).unwrap_or(u32::MAX);

    days.saturating_add(MONTH_END_PADDING_DAYS)
        .clamp(MIN_HORIZON_DAYS, MAX_HORIZON_DAYS)
}

/// Reject horizons above [`MAX_HORIZON_DAYS`].
pub fn check_horizon_days(days: u32) -> ScheduleResult<u32> {
    if days > MAX_HORIZON_DAYS {
        return Err(ScheduleError::invalid(
            "horizon_days",
            format!("must be at most {MAX_HORIZON_DAYS} (got {days})"),
        ));
    }
    Ok(days)
}

/// Last second (23:59:59) of the month containing `date`.
fn end_of_month(date: NaiveDate) -> Option<NaiveDateTime> {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)?
    };
    let last_day = first_of_next - Duration::days(1);
    last_day.and_hms_opt(23, 59, 59)
}
