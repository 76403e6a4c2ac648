pub mod generator;
pub mod horizon;

pub use generator::{ScheduleGenerator, generate};
pub use horizon::{MAX_HORIZON_DAYS, check_horizon_days, default_horizon_days};
