use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashSet;

use crate::config::{RestDayType, ScheduleConfig};

/// Weekday lookup for the rest-day policies.
///
/// Built once per generation run from a [`ScheduleConfig`]; classification only
/// looks at the local calendar date, never at the time of day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestDayCalendar {
    rest_days: HashSet<Weekday>,
}

impl RestDayCalendar {
    const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    pub fn from_policy<I>(policy: RestDayType, custom_rest_days: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let rest_days = match policy {
            RestDayType::None => HashSet::new(),
            RestDayType::Single => HashSet::from([Weekday::Sun]),
            RestDayType::Double => HashSet::from([Weekday::Sat, Weekday::Sun]),
            RestDayType::Custom => custom_rest_days
                .into_iter()
                .filter_map(weekday_from_index)
                .collect(),
        };
        Self { rest_days }
    }

    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self::from_policy(
            config.rest_day_type,
            config.custom_rest_days.iter().copied(),
        )
    }

    pub fn is_rest_day(&self, date: NaiveDate) -> bool {
        self.rest_days.contains(&date.weekday())
    }

    /// False when every weekday is a rest day.
    pub fn has_working_day(&self) -> bool {
        self.rest_days.len() < Self::ALL_WEEKDAYS.len()
    }

    /// First date at or after `from` that is not a rest day
    pub fn next_working_day(&self, from: NaiveDate) -> Option<NaiveDate> {
        if !self.has_working_day() {
            return None;
        }
        let mut current = from;
        while self.is_rest_day(current) {
            current = current.checked_add_signed(Duration::days(1))?;
        }
        Some(current)
    }

    /// Rest days ordered Sunday first.
    pub fn rest_days(&self) -> Vec<Weekday> {
        Self::ALL_WEEKDAYS
            .iter()
            .copied()
            .filter(|day| self.rest_days.contains(day))
            .collect()
    }
}

/// Classify `date` under the rest-day policy of `config`.
pub fn is_rest_day(date: NaiveDate, config: &ScheduleConfig) -> bool {
    RestDayCalendar::from_config(config).is_rest_day(date)
}

/// Weekday for an index counted from Sunday (0) to Saturday (6).
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    RestDayCalendar::ALL_WEEKDAYS.get(usize::from(index)).copied()
}

pub fn weekday_index(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

/// Parse a weekday given either as its Sunday-based index or as an English
/// name (`sun`, `Sunday`, ...).
pub fn parse_weekday(input: &str) -> Option<u8> {
    let trimmed = input.trim();
    if let Ok(index) = trimmed.parse::<u8>() {
        return weekday_from_index(index).map(weekday_index);
    }
    trimmed.parse::<Weekday>().ok().map(weekday_index)
}
