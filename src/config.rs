use chrono::{Duration, Local, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::calendar::RestDayCalendar;
use crate::error::{ScheduleError, ScheduleResult};

pub const DEFAULT_WORK_HOURS: f64 = 12.0;
pub const DEFAULT_REST_HOURS: f64 = 24.0;
pub const FIXED_POLICY_WORK_HOURS: f64 = 8.0;
pub const FIXED_POLICY_START_HOUR: u32 = 8;

pub const WORK_HOURS_RANGE: RangeInclusive<f64> = 1.0..=24.0;
pub const REST_HOURS_RANGE: RangeInclusive<f64> = 1.0..=168.0;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Whether the configured start instant marks the beginning or the end of a
/// work shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartTimeType {
    #[default]
    Work,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestDayType {
    #[default]
    None,
    Single,
    Double,
    Custom,
}

impl StartTimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StartTimeType::Work => "work",
            StartTimeType::Off => "off",
        }
    }
}

impl fmt::Display for StartTimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StartTimeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(StartTimeType::Work),
            "off" => Ok(StartTimeType::Off),
            other => Err(format!("unknown start time type '{other}' (expected work|off)")),
        }
    }
}

impl RestDayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestDayType::None => "none",
            RestDayType::Single => "single",
            RestDayType::Double => "double",
            RestDayType::Custom => "custom",
        }
    }

    /// Fixed policies follow a one-shift-per-calendar-day cadence and ignore
    /// the configured rest length.
    pub fn is_fixed(&self) -> bool {
        matches!(self, RestDayType::Single | RestDayType::Double)
    }
}

impl fmt::Display for RestDayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RestDayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(RestDayType::None),
            "single" => Ok(RestDayType::Single),
            "double" => Ok(RestDayType::Double),
            "custom" => Ok(RestDayType::Custom),
            other => Err(format!(
                "unknown rest day type '{other}' (expected none|single|double|custom)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_work_hours")]
    pub work_hours: f64,
    #[serde(default = "default_rest_hours")]
    pub rest_hours: f64,
    pub start_date: NaiveDateTime,
    #[serde(default)]
    pub start_time_type: StartTimeType,
    #[serde(default)]
    pub rest_day_type: RestDayType,
    /// Weekday indices, 0 = Sunday through 6 = Saturday. Only read under
    /// [`RestDayType::Custom`].
    #[serde(default)]
    pub custom_rest_days: BTreeSet<u8>,
}

fn default_work_hours() -> f64 {
    DEFAULT_WORK_HOURS
}

fn default_rest_hours() -> f64 {
    DEFAULT_REST_HOURS
}

impl Default for ScheduleConfig {
    /// Starts at the top of the current local hour.
    fn default() -> Self {
        let now = Local::now().naive_local();
        let start = now
            .date()
            .and_hms_opt(now.hour(), 0, 0)
            .unwrap_or(now);
        Self::new(start)
    }
}

impl ScheduleConfig {
    pub fn new(start_date: NaiveDateTime) -> Self {
        Self {
            work_hours: DEFAULT_WORK_HOURS,
            rest_hours: DEFAULT_REST_HOURS,
            start_date,
            start_time_type: StartTimeType::Work,
            rest_day_type: RestDayType::None,
            custom_rest_days: BTreeSet::new(),
        }
    }

    pub fn with_hours(mut self, work_hours: f64, rest_hours: f64) -> Self {
        self.work_hours = work_hours;
        self.rest_hours = rest_hours;
        self
    }

    pub fn with_start_time_type(mut self, start_time_type: StartTimeType) -> Self {
        self.start_time_type = start_time_type;
        self
    }

    /// Switch the rest-day policy.
    ///
    /// Moving to `Single` or `Double` also applies the office-hours preset:
    /// 8 hour shifts that start at 08:00 on the configured start date.
    pub fn with_rest_day_type(mut self, rest_day_type: RestDayType) -> Self {
        self.rest_day_type = rest_day_type;
        if rest_day_type.is_fixed() {
            self.work_hours = FIXED_POLICY_WORK_HOURS;
            self.start_time_type = StartTimeType::Work;
            if let Some(start) = self
                .start_date
                .date()
                .and_hms_opt(FIXED_POLICY_START_HOUR, 0, 0)
            {
                self.start_date = start;
            }
        }
        self
    }

    pub fn with_custom_rest_days<I>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        self.rest_day_type = RestDayType::Custom;
        self.custom_rest_days = days.into_iter().collect();
        self
    }

    /// Add the day when absent, remove it when present.
    pub fn toggle_custom_rest_day(&mut self, day: u8) {
        if !self.custom_rest_days.remove(&day) {
            self.custom_rest_days.insert(day);
        }
    }

    pub fn work_duration(&self) -> Duration {
        hours_to_duration(self.work_hours)
    }

    pub fn rest_duration(&self) -> Duration {
        hours_to_duration(self.rest_hours)
    }

    /// True first work-start instant. An `Off` start is moved back by one
    /// shift length.
    pub fn anchor(&self) -> NaiveDateTime {
        match self.start_time_type {
            StartTimeType::Work => self.start_date,
            StartTimeType::Off => self
                .start_date
                .checked_sub_signed(self.work_duration())
                .unwrap_or(self.start_date),
        }
    }

    /// Hour and minute of the anchor, seconds dropped.
    pub fn anchor_time(&self) -> NaiveTime {
        clock_time(self.anchor())
    }

    pub fn rest_day_calendar(&self) -> RestDayCalendar {
        RestDayCalendar::from_config(self)
    }

    /// Check the configuration against the ranges accepted for interactive
    /// input. Generation itself never calls this.
    pub fn validate(&self) -> ScheduleResult<()> {
        check_hours("work_hours", self.work_hours, &WORK_HOURS_RANGE)?;
        check_hours("rest_hours", self.rest_hours, &REST_HOURS_RANGE)?;

        if let Some(day) = self.custom_rest_days.iter().find(|day| **day > 6) {
            return Err(ScheduleError::invalid(
                "custom_rest_days",
                format!("contains weekday index {day} (expected 0..=6)"),
            ));
        }

        if self.rest_day_type == RestDayType::Custom && !self.rest_day_calendar().has_working_day()
        {
            return Err(ScheduleError::invalid(
                "custom_rest_days",
                "must leave at least one working weekday",
            ));
        }

        Ok(())
    }
}

fn check_hours(field: &'static str, value: f64, range: &RangeInclusive<f64>) -> ScheduleResult<()> {
    if !value.is_finite() {
        return Err(ScheduleError::invalid(field, format!("must be finite (got {value})")));
    }
    if !range.contains(&value) {
        return Err(ScheduleError::invalid(
            field,
            format!(
                "must be between {} and {} (got {value})",
                range.start(),
                range.end()
            ),
        ));
    }
    Ok(())
}

/// Whole-millisecond duration for a (possibly fractional) hour count.
/// Non-finite or out-of-range input collapses to zero.
pub fn hours_to_duration(hours: f64) -> Duration {
    if !hours.is_finite() {
        return Duration::zero();
    }
    Duration::try_milliseconds((hours * MILLIS_PER_HOUR).round() as i64)
        .unwrap_or_else(Duration::zero)
}

pub(crate) fn clock_time(instant: NaiveDateTime) -> NaiveTime {
    NaiveTime::from_hms_opt(instant.hour(), instant.minute(), 0).unwrap_or(instant.time())
}
