//! Error type shared by the schedule, projection and scenario modules

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while building or loading a loan scenario
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("end year {end_year} precedes start year {start_year}")]
    InvalidRange { start_year: i32, end_year: i32 },

    #[error("year {0} cannot be represented as a calendar date")]
    YearOutOfRange(i32),

    #[error("non-finite value in {schedule} schedule at {date}")]
    NonFiniteValue { schedule: &'static str, date: NaiveDate },

    #[error("non-finite {0}")]
    NonFiniteInitial(&'static str),

    #[error("rate {rate}% at {date} is at or below -100%")]
    RateOutOfRange { date: NaiveDate, rate: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
