//! Calculation gate and running accumulators for the recurrence

use serde::{Deserialize, Serialize};

use super::rows::PeriodRow;

/// Whether a scenario's series have been computed
///
/// Moves from `Uncalculated` to `Calculated` exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationState {
    #[default]
    Uncalculated,
    Calculated,
}

impl CalculationState {
    pub fn is_calculated(self) -> bool {
        self == CalculationState::Calculated
    }
}

/// Loan and balance carried from one period to the next
#[derive(Debug, Clone, Copy)]
pub struct RecurrenceState {
    /// Outstanding loan at the prior period (already floored)
    pub loan: f64,

    /// Cumulative balance at the prior period
    pub balance: f64,

    /// Prior period's loan contribution, folded in before compounding
    pub prior_loan_contribution: f64,
}

impl RecurrenceState {
    /// Seed from period 0
    pub fn from_first(row: &PeriodRow) -> Self {
        Self {
            loan: row.loan,
            balance: row.balance,
            prior_loan_contribution: row.loan_contribution,
        }
    }

    /// Apply one step of the recurrence to `row`, whose compounding factor is already set.
    ///
    /// Returns true when the floor clamped a negative loan.
    pub fn advance(&mut self, row: &mut PeriodRow) -> bool {
        let unfloored = (self.loan + self.prior_loan_contribution) * row.compounding_factor;
        let floored = unfloored < 0.0;

        row.loan = unfloored.max(0.0);
        row.balance = self.balance + self.prior_loan_contribution + row.balance_contribution;
        row.floored = floored;

        self.loan = row.loan;
        self.balance = row.balance;
        self.prior_loan_contribution = row.loan_contribution;

        floored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(period: usize, lc: f64, bc: f64, factor: f64) -> PeriodRow {
        let date = NaiveDate::from_ymd_opt(2024, period as u32 + 1, 1).unwrap();
        let mut row = PeriodRow::new(period, date, 0.0, lc, bc);
        row.compounding_factor = factor;
        row
    }

    #[test]
    fn test_default_is_uncalculated() {
        assert_eq!(CalculationState::default(), CalculationState::Uncalculated);
        assert!(!CalculationState::default().is_calculated());
        assert!(CalculationState::Calculated.is_calculated());
    }

    #[test]
    fn test_advance_uses_prior_contribution() {
        let mut first = row(0, -10.0, 0.0, 0.0);
        first.loan = 100.0;
        first.balance = 5.0;

        let mut state = RecurrenceState::from_first(&first);
        let mut next = row(1, -50.0, 2.0, 1.5);
        assert!(!state.advance(&mut next));

        assert_eq!(next.loan, (100.0 - 10.0) * 1.5);
        assert_eq!(next.balance, 5.0 - 10.0 + 2.0);
        assert_eq!(state.prior_loan_contribution, -50.0);
    }

    #[test]
    fn test_advance_floors_and_flags() {
        let mut first = row(0, -200.0, 0.0, 0.0);
        first.loan = 100.0;

        let mut state = RecurrenceState::from_first(&first);
        let mut next = row(1, 0.0, 0.0, 1.0);
        assert!(state.advance(&mut next));
        assert_eq!(next.loan, 0.0);
        assert!(next.floored);
        assert_eq!(state.loan, 0.0);
    }
}
