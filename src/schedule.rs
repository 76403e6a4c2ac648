use chrono::NaiveDateTime;
use tracing::info;

use crate::calculations::{check_horizon_days, default_horizon_days, generate};
use crate::config::ScheduleConfig;
use crate::error::ScheduleResult;
use crate::interval::Interval;
use crate::status::{ShiftStatus, current_status, next_work_start};

/// A configuration together with its generated intervals.
///
/// Every change to the configuration or the horizon replaces the whole
/// interval list; nothing is patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftSchedule {
    config: ScheduleConfig,
    horizon_days: u32,
    intervals: Vec<Interval>,
}

impl ShiftSchedule {
    pub fn new(config: ScheduleConfig, horizon_days: u32) -> Self {
        let intervals = generate(&config, horizon_days);
        Self {
            config,
            horizon_days,
            intervals,
        }
    }

    /// Horizon sized to cover the month containing `now`.
    pub fn covering(config: ScheduleConfig, now: NaiveDateTime) -> Self {
        let days = default_horizon_days(config.start_date, now);
        Self::new(config, days)
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Replace the configuration after validating it. The previous
    /// configuration stays in place when validation fails.
    pub fn set_config(&mut self, config: ScheduleConfig) -> ScheduleResult<()> {
        config.validate()?;
        self.config = config;
        self.refresh();
        Ok(())
    }

    /// Apply `edit` to a copy of the configuration and keep it if it validates.
    pub fn update_config<F>(&mut self, edit: F) -> ScheduleResult<()>
    where
        F: FnOnce(&mut ScheduleConfig),
    {
        let mut next = self.config.clone();
        edit(&mut next);
        self.set_config(next)
    }

    /// Regenerate over a new horizon. Horizons above the cap are rejected
    /// and leave the schedule untouched.
    pub fn set_horizon_days(&mut self, horizon_days: u32) -> ScheduleResult<()> {
        self.horizon_days = check_horizon_days(horizon_days)?;
        self.refresh();
        Ok(())
    }

    pub fn status_at(&self, now: NaiveDateTime) -> ShiftStatus {
        current_status(&self.intervals, now)
    }

    pub fn next_work_start(&self, now: NaiveDateTime) -> Option<&Interval> {
        next_work_start(&self.intervals, now)
    }

    fn refresh(&mut self) {
        self.intervals = generate(&self.config, self.horizon_days);
        info!(
            horizon_days = self.horizon_days,
            intervals = self.intervals.len(),
            "schedule refreshed"
        );
    }
}
