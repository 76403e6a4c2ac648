use chrono::NaiveDateTime;
use serde::Serialize;

use crate::interval::{Interval, IntervalKind};

/// What a schedule says about a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "interval", rename_all = "snake_case")]
pub enum ShiftStatus {
    Working(Interval),
    Resting(Interval),
    RestDay(Interval),
    Unknown,
}

impl ShiftStatus {
    pub fn interval(&self) -> Option<&Interval> {
        match self {
            ShiftStatus::Working(interval)
            | ShiftStatus::Resting(interval)
            | ShiftStatus::RestDay(interval) => Some(interval),
            ShiftStatus::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Working(_) => "working",
            ShiftStatus::Resting(_) => "resting",
            ShiftStatus::RestDay(_) => "rest_day",
            ShiftStatus::Unknown => "unknown",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ShiftStatus::Working(_) => "Currently on shift",
            ShiftStatus::Resting(_) => "Currently resting",
            ShiftStatus::RestDay(_) => "Today is a rest day",
            ShiftStatus::Unknown => "Outside the scheduled range",
        }
    }
}

impl From<Interval> for ShiftStatus {
    fn from(interval: Interval) -> Self {
        match interval.kind {
            IntervalKind::Work => ShiftStatus::Working(interval),
            IntervalKind::Rest => ShiftStatus::Resting(interval),
            IntervalKind::Weekend => ShiftStatus::RestDay(interval),
        }
    }
}

/// Status at `now`: the first interval, in sequence order, containing it.
pub fn current_status(intervals: &[Interval], now: NaiveDateTime) -> ShiftStatus {
    intervals
        .iter()
        .find(|interval| interval.contains(now))
        .copied()
        .map(ShiftStatus::from)
        .unwrap_or(ShiftStatus::Unknown)
}

/// First work interval starting at or after `now`.
pub fn next_work_start(intervals: &[Interval], now: NaiveDateTime) -> Option<&Interval> {
    intervals
        .iter()
        .find(|interval| interval.kind == IntervalKind::Work && interval.start_time >= now)
}
