use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScheduleError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field for configuration errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ScheduleError::InvalidConfiguration { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
