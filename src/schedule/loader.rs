//! CSV-based schedule loader
//!
//! Each schedule file holds `date,value` rows, dates as `YYYY-MM-DD`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, warn};
use serde::Deserialize;

use super::SparseSchedule;
use crate::error::Result;

pub const RATES_FILE: &str = "rates.csv";
pub const LOAN_CONTRIBUTIONS_FILE: &str = "loan_contributions.csv";
pub const BALANCE_CONTRIBUTIONS_FILE: &str = "balance_contributions.csv";

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    value: f64,
}

/// Load a schedule from any reader (file, string buffer, ...)
pub fn load_schedule_from_reader<R: Read>(reader: R) -> Result<SparseSchedule> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut schedule = SparseSchedule::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        if schedule.insert(row.date, row.value).is_some() {
            warn!("duplicate schedule entry for {}, keeping the later row", row.date);
        }
    }

    Ok(schedule)
}

/// Load a schedule from a CSV file
pub fn load_schedule<P: AsRef<Path>>(path: P) -> Result<SparseSchedule> {
    let file = File::open(path.as_ref())?;
    let schedule = load_schedule_from_reader(file)?;
    debug!("loaded {} entries from {}", schedule.len(), path.as_ref().display());
    Ok(schedule)
}

/// Load a schedule file, treating a missing file as an empty schedule
fn load_optional(dir: &Path, name: &str) -> Result<SparseSchedule> {
    let path = dir.join(name);
    if !path.exists() {
        warn!("{} not found, using an empty schedule", path.display());
        return Ok(SparseSchedule::new());
    }
    load_schedule(path)
}

/// The three time-varying inputs of a scenario
#[derive(Debug, Clone, Default)]
pub struct LoadedSchedules {
    pub rates: SparseSchedule,
    pub loan_contributions: SparseSchedule,
    pub balance_contributions: SparseSchedule,
}

impl LoadedSchedules {
    /// Load `rates.csv`, `loan_contributions.csv` and `balance_contributions.csv` from `dir`
    pub fn load_from(dir: &Path) -> Result<Self> {
        Ok(Self {
            rates: load_optional(dir, RATES_FILE)?,
            loan_contributions: load_optional(dir, LOAN_CONTRIBUTIONS_FILE)?,
            balance_contributions: load_optional(dir, BALANCE_CONTRIBUTIONS_FILE)?,
        })
    }
}
