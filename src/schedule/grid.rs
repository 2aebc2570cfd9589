//! Monthly time grid covering an inclusive span of calendar years

use chrono::NaiveDate;
use log::debug;

use crate::error::{ProjectionError, Result};

/// Build the first-of-month anchor for every month from January of `start_year`
/// through December of `end_year`, in chronological order.
///
/// Fails with [`ProjectionError::InvalidRange`] when `end_year < start_year`, and with
/// [`ProjectionError::YearOutOfRange`] when either endpoint is not a representable year.
pub fn build_grid(start_year: i32, end_year: i32) -> Result<Vec<NaiveDate>> {
    if end_year < start_year {
        return Err(ProjectionError::InvalidRange { start_year, end_year });
    }
    for year in [start_year, end_year] {
        NaiveDate::from_ymd_opt(year, 1, 1).ok_or(ProjectionError::YearOutOfRange(year))?;
    }

    // Both endpoints are valid chrono years, so the span cannot overflow.
    let years = (i64::from(end_year) - i64::from(start_year) + 1) as usize;
    let mut anchors = Vec::with_capacity(12 * years);

    for year in start_year..=end_year {
        for month in 1..=12 {
            let anchor = NaiveDate::from_ymd_opt(year, month, 1)
                .ok_or(ProjectionError::YearOutOfRange(year))?;
            anchors.push(anchor);
        }
    }

    debug!("built grid {}..={} with {} periods", start_year, end_year, anchors.len());
    Ok(anchors)
}

/// Whole days between two anchors
pub fn elapsed_days(prior: NaiveDate, current: NaiveDate) -> i64 {
    (current - prior).num_days()
}
