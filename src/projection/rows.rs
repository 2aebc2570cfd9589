//! Per-period output rows and schedule summary

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single month of the projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRow {
    // Timing
    pub period: usize,
    pub date: NaiveDate,

    // Resolved inputs
    /// Annual rate in percent
    pub rate: f64,
    pub loan_contribution: f64,
    pub balance_contribution: f64,

    // Compounding (zero for period 0, which has no predecessor)
    pub elapsed_days: i64,
    pub part_of_year: f64,
    pub compounding_factor: f64,

    // Running series
    pub loan: f64,
    pub balance: f64,

    /// Whether the non-negativity floor clamped this period's loan
    pub floored: bool,
}

impl PeriodRow {
    /// Create a row with resolved inputs and zeroed outputs
    pub fn new(
        period: usize,
        date: NaiveDate,
        rate: f64,
        loan_contribution: f64,
        balance_contribution: f64,
    ) -> Self {
        Self {
            period,
            date,
            rate,
            loan_contribution,
            balance_contribution,
            elapsed_days: 0,
            part_of_year: 0.0,
            compounding_factor: 0.0,
            loan: 0.0,
            balance: 0.0,
            floored: false,
        }
    }
}

/// Summary statistics for a calculated schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_periods: usize,
    pub initial_loan: f64,
    pub final_loan: f64,
    pub final_balance: f64,

    /// Loan contributions folded into a compounding step (all but the last period)
    pub compounded_loan_contributions: f64,
    pub total_balance_contributions: f64,
    pub total_interest: f64,

    /// First period after the start whose loan is exactly zero
    pub payoff_period: Option<usize>,
    pub floor_hits: usize,
}

impl ScheduleSummary {
    pub(crate) fn from_rows(rows: &[PeriodRow], initial_loan: f64, total_interest: f64) -> Self {
        let compounded_loan_contributions: f64 = rows
            .iter()
            .take(rows.len().saturating_sub(1))
            .map(|r| r.loan_contribution)
            .sum();
        let total_balance_contributions: f64 =
            rows.iter().skip(1).map(|r| r.balance_contribution).sum();

        Self {
            total_periods: rows.len(),
            initial_loan,
            final_loan: rows.last().map(|r| r.loan).unwrap_or(initial_loan),
            final_balance: rows.last().map(|r| r.balance).unwrap_or(0.0),
            compounded_loan_contributions,
            total_balance_contributions,
            total_interest,
            payoff_period: rows
                .iter()
                .skip(1)
                .find(|r| r.loan == 0.0)
                .map(|r| r.period),
            floor_hits: rows.iter().filter(|r| r.floored).count(),
        }
    }

    /// Summary of a schedule whose series have not been computed: outputs stay at
    /// their seed values and no payoff is reported.
    pub(crate) fn uncalculated(rows: &[PeriodRow], initial_loan: f64, initial_balance: f64) -> Self {
        Self {
            final_loan: initial_loan,
            final_balance: initial_balance,
            total_interest: 0.0,
            payoff_period: None,
            floor_hits: 0,
            ..Self::from_rows(rows, initial_loan, 0.0)
        }
    }
}
