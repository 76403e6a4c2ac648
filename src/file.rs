use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::config::ScheduleConfig;
use crate::error::ScheduleResult;
use crate::interval::Interval;

const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn save_config_to_json<P: AsRef<Path>>(config: &ScheduleConfig, path: P) -> ScheduleResult<()> {
    config.validate()?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}

pub fn load_config_from_json<P: AsRef<Path>>(path: P) -> ScheduleResult<ScheduleConfig> {
    let file = File::open(path)?;
    let config: ScheduleConfig = serde_json::from_reader(file)?;
    config.validate()?;
    Ok(config)
}

pub fn export_intervals_to_json<P: AsRef<Path>>(
    intervals: &[Interval],
    path: P,
) -> ScheduleResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, intervals)?;
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
struct IntervalCsvRecord {
    start_time: String,
    end_time: String,
    kind: String,
    duration_hours: f64,
}

impl From<&Interval> for IntervalCsvRecord {
    fn from(interval: &Interval) -> Self {
        Self {
            start_time: format_datetime(interval.start_time),
            end_time: format_datetime(interval.end_time),
            kind: interval.kind.as_str().to_string(),
            duration_hours: interval.duration_hours(),
        }
    }
}

pub fn export_intervals_to_csv<P: AsRef<Path>>(
    intervals: &[Interval],
    path: P,
) -> ScheduleResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for interval in intervals {
        writer.serialize(IntervalCsvRecord::from(interval))?;
    }
    writer.flush()?;
    Ok(())
}

fn format_datetime(value: NaiveDateTime) -> String {
    value.format(CSV_DATETIME_FORMAT).to_string()
}
