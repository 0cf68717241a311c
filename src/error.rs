use crate::task_validation::TaskValidationError;
use chrono::NaiveDate;

/// Errors surfaced by the calendar and analytics engine.
///
/// Division by a zero baseline is never an error: the affected ratios
/// collapse to 0 instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("invalid month {month} for year {year} (expected 1-12)")]
    InvalidMonth { year: i32, month: u32 },

    #[error("cannot parse '{input}' as a YYYY-MM-DD date or timestamp")]
    UnparseableDate { input: String },

    #[error("date range starting at {start} cannot be advanced by {days} business days")]
    DateOutOfRange { start: NaiveDate, days: u32 },

    #[error("unknown work item status '{0}'")]
    UnknownStatus(String),

    #[error("invalid work item: {0}")]
    InvalidWorkItem(String),

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<TaskValidationError> for EngineError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidWorkItem(value.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
