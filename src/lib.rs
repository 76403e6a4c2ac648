pub mod calculations;
pub mod calendar;
pub mod config;
pub mod error;
pub mod file;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod interval;
pub mod schedule;
pub mod status;

pub use calculations::{
    MAX_HORIZON_DAYS, ScheduleGenerator, check_horizon_days, default_horizon_days, generate,
};
pub use calendar::{RestDayCalendar, is_rest_day, parse_weekday};
pub use config::{RestDayType, ScheduleConfig, StartTimeType};
pub use error::{ScheduleError, ScheduleResult};
pub use file::{
    export_intervals_to_csv, export_intervals_to_json, load_config_from_json, save_config_to_json,
};
pub use interval::{Interval, IntervalKind};
pub use schedule::ShiftSchedule;
pub use status::{ShiftStatus, current_status, next_work_start};
