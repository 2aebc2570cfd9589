//! Scenario inputs, loadable from JSON
//!
//! ```json
//! {
//!   "initial_loan": 1200.0,
//!   "start_year": 2024,
//!   "end_year": 2024,
//!   "rates": { "2024-01-01": 12.0 },
//!   "loan_contributions": { "2024-01-01": -100.0 }
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schedule::{LoadedSchedules, SparseSchedule};

/// Everything needed to build a [`crate::LoanScenario`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInputs {
    /// Loan principal at the first period
    pub initial_loan: f64,

    /// Cumulative balance at the first period
    #[serde(default)]
    pub initial_balance: f64,

    pub start_year: i32,
    pub end_year: i32,

    /// Annual rate in percent, by effective date
    #[serde(default)]
    pub rates: SparseSchedule,

    #[serde(default)]
    pub loan_contributions: SparseSchedule,

    #[serde(default)]
    pub balance_contributions: SparseSchedule,
}

impl ScenarioInputs {
    /// Inputs with empty schedules
    pub fn new(initial_loan: f64, initial_balance: f64, start_year: i32, end_year: i32) -> Self {
        Self {
            initial_loan,
            initial_balance,
            start_year,
            end_year,
            rates: SparseSchedule::new(),
            loan_contributions: SparseSchedule::new(),
            balance_contributions: SparseSchedule::new(),
        }
    }

    pub fn with_rates(mut self, rates: SparseSchedule) -> Self {
        self.rates = rates;
        self
    }

    pub fn with_loan_contributions(mut self, schedule: SparseSchedule) -> Self {
        self.loan_contributions = schedule;
        self
    }

    pub fn with_balance_contributions(mut self, schedule: SparseSchedule) -> Self {
        self.balance_contributions = schedule;
        self
    }

    /// Attach schedules loaded from CSV files
    pub fn with_schedules(self, loaded: LoadedSchedules) -> Self {
        self.with_rates(loaded.rates)
            .with_loan_contributions(loaded.loan_contributions)
            .with_balance_contributions(loaded.balance_contributions)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
