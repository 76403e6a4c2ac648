use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalKind {
    Work,
    Rest,
    /// A designated rest day (or run of rest days) taken as a whole.
    Weekend,
}

impl IntervalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalKind::Work => "work",
            IntervalKind::Rest => "rest",
            IntervalKind::Weekend => "weekend",
        }
    }
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open span `[start_time, end_time)` of local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub kind: IntervalKind,
}

impl Interval {
    pub fn new(start_time: NaiveDateTime, end_time: NaiveDateTime, kind: IntervalKind) -> Self {
        Self {
            start_time,
            end_time,
            kind,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / 3_600_000.0
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start_time <= instant && instant < self.end_time
    }
}
