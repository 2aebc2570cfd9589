//! Sparse "effective from" schedules and their carry-forward resolution onto a grid

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Values keyed by the date they become effective, each holding until superseded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SparseSchedule {
    entries: BTreeMap<NaiveDate, f64>,
}

impl SparseSchedule {
    /// Create an empty schedule (resolves to zero everywhere)
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule holding a single value from `date` onwards
    pub fn constant_from(date: NaiveDate, value: f64) -> Self {
        let mut schedule = Self::new();
        schedule.insert(date, value);
        schedule
    }

    /// Set the value effective from `date`, replacing any value already on that date
    pub fn insert(&mut self, date: NaiveDate, value: f64) -> Option<f64> {
        self.entries.insert(date, value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending date order
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &f64)> {
        self.entries.iter()
    }

    /// Value of the latest entry dated on or before `date`, or 0.0 if `date`
    /// precedes every entry
    pub fn value_at(&self, date: NaiveDate) -> f64 {
        self.entries
            .range(..=date)
            .next_back()
            .map(|(_, &value)| value)
            .unwrap_or(0.0)
    }

    /// Dense values aligned to `grid`
    pub fn resolve(&self, grid: &[NaiveDate]) -> Vec<f64> {
        grid.iter().map(|&anchor| self.value_at(anchor)).collect()
    }

    /// First entry whose value is NaN or infinite
    pub fn first_non_finite(&self) -> Option<NaiveDate> {
        self.entries
            .iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(&date, _)| date)
    }
}

impl FromIterator<(NaiveDate, f64)> for SparseSchedule {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// As-of join of `schedule` onto `grid` with forward fill and a leading zero fill
pub fn resolve_series(grid: &[NaiveDate], schedule: &SparseSchedule) -> Vec<f64> {
    schedule.resolve(grid)
}
