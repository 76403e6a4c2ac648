use chrono::{Duration, NaiveDateTime, NaiveTime};
use tracing::{debug, warn};

use crate::calendar::RestDayCalendar;
use crate::config::{RestDayType, ScheduleConfig, clock_time};
use crate::interval::{Interval, IntervalKind};

/// Project `config` forward over `horizon_days` days from its anchor.
pub fn generate(config: &ScheduleConfig, horizon_days: u32) -> Vec<Interval> {
    ScheduleGenerator::new(config).generate(horizon_days)
}

/// State-stepping walk over a single cursor instant.
///
/// Each step emits either one `Weekend` interval or a `Work`/`Rest` pair and
/// hands back the next cursor. The anchor's clock time is threaded through
/// every step so work starts never drift while rolling past rest days.
///
/// For an `Off` start that clock time comes from the recovered shift start,
/// not from the configured end time, so the first shift and every later one
/// begin at the same hour.
pub struct ScheduleGenerator<'a> {
    config: &'a ScheduleConfig,
    calendar: RestDayCalendar,
    work: Duration,
    rest: Duration,
}

impl<'a> ScheduleGenerator<'a> {
    pub fn new(config: &'a ScheduleConfig) -> Self {
        Self {
            config,
            calendar: config.rest_day_calendar(),
            work: config.work_duration(),
            rest: config.rest_duration(),
        }
    }

    pub fn generate(&self, horizon_days: u32) -> Vec<Interval> {
        let anchor = self.config.anchor();
        let Some(horizon) = anchor.checked_add_signed(Duration::days(i64::from(horizon_days)))
        else {
            warn!(%anchor, horizon_days, "horizon out of range");
            return Vec::new();
        };

        if !self.has_positive_cadence() {
            warn!(
                work_hours = self.config.work_hours,
                rest_hours = self.config.rest_hours,
                rest_day_type = %self.config.rest_day_type,
                "non-positive shift cadence, nothing to generate"
            );
            return Vec::new();
        }

        if horizon_days > 0 && !self.calendar.has_working_day() {
            warn!("every weekday is a rest day");
            return vec![Interval::new(anchor, horizon, IntervalKind::Weekend)];
        }

        let anchor_time = clock_time(anchor);
        let mut intervals = Vec::new();
        let mut cursor = anchor;
        while cursor < horizon {
            match self.step(cursor, anchor_time) {
                Some((emitted, next)) => {
                    intervals.extend(emitted);
                    cursor = next;
                }
                None => break,
            }
        }

        debug!(
            %anchor,
            %horizon,
            horizon_days,
            intervals = intervals.len(),
            "schedule generated"
        );
        intervals
    }

    fn has_positive_cadence(&self) -> bool {
        let zero = Duration::zero();
        if self.work <= zero {
            return false;
        }
        self.config.rest_day_type.is_fixed() || self.rest > zero
    }

    /// One iteration of the walk. Returns the emitted intervals and the next
    /// cursor, or `None` when the calendar arithmetic leaves chrono's range.
    fn step(
        &self,
        cursor: NaiveDateTime,
        anchor_time: NaiveTime,
    ) -> Option<(Vec<Interval>, NaiveDateTime)> {
        if self.calendar.is_rest_day(cursor.date()) {
            let next_day = cursor.date().checked_add_signed(Duration::days(1))?;
            let resume = self
                .calendar
                .next_working_day(next_day)?
                .and_time(anchor_time);
            return Some((
                vec![Interval::new(cursor, resume, IntervalKind::Weekend)],
                resume,
            ));
        }

        let work_end = cursor.checked_add_signed(self.work)?;
        let next_start = match self.config.rest_day_type {
            RestDayType::None | RestDayType::Custom => self.next_start_continuous(work_end)?,
            RestDayType::Single | RestDayType::Double => {
                self.next_start_fixed(cursor, work_end, anchor_time)?
            }
        };

        Some((
            vec![
                Interval::new(cursor, work_end, IntervalKind::Work),
                Interval::new(work_end, next_start, IntervalKind::Rest),
            ],
            next_start,
        ))
    }

    /// `work_end + rest`, pushed past rest days at the tentative clock time.
    fn next_start_continuous(&self, work_end: NaiveDateTime) -> Option<NaiveDateTime> {
        let tentative = work_end.checked_add_signed(self.rest)?;
        if !self.calendar.is_rest_day(tentative.date()) {
            return Some(tentative);
        }
        let clock = clock_time(tentative);
        let next_day = tentative.date().checked_add_signed(Duration::days(1))?;
        Some(self.calendar.next_working_day(next_day)?.and_time(clock))
    }

    /// Next working date after the work start, at the anchor clock time.
    ///
    /// Shifts of a day or longer keep rolling until the start lands strictly
    /// after `work_end`, so the rest interval is never empty or inverted.
    fn next_start_fixed(
        &self,
        work_start: NaiveDateTime,
        work_end: NaiveDateTime,
        anchor_time: NaiveTime,
    ) -> Option<NaiveDateTime> {
        let mut day = work_start.date().checked_add_signed(Duration::days(1))?;
        loop {
            let candidate = self.calendar.next_working_day(day)?.and_time(anchor_time);
            if candidate > work_end {
                return Some(candidate);
            }
            day = candidate.date().checked_add_signed(Duration::days(1))?;
        }
    }
}
