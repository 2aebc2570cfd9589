//! Loan scenarios and a batch runner
//!
//! A [`LoanScenario`] owns its monthly rows exclusively. Construction resolves the
//! sparse inputs onto the grid; [`LoanScenario::calculate`] runs the recurrence once.

use std::io::Write;

use log::{debug, info};
use rayon::prelude::*;

use crate::config::ScenarioInputs;
use crate::error::{ProjectionError, Result};
use crate::projection::{self, CalculationState, PeriodRow, ScheduleSummary};
use crate::schedule::{build_grid, SparseSchedule};

#[derive(Debug, Clone)]
pub struct LoanScenario {
    initial_loan: f64,
    initial_balance: f64,
    start_year: i32,
    end_year: i32,
    rows: Vec<PeriodRow>,
    state: CalculationState,
}

fn check_schedule(name: &'static str, schedule: &SparseSchedule) -> Result<()> {
    match schedule.first_non_finite() {
        Some(date) => Err(ProjectionError::NonFiniteValue { schedule: name, date }),
        None => Ok(()),
    }
}

/// A rate of -100% or lower has no real compounding factor over a fractional year
fn check_rates(rates: &SparseSchedule) -> Result<()> {
    match rates.iter().find(|(_, rate)| **rate <= -100.0) {
        Some((&date, &rate)) => Err(ProjectionError::RateOutOfRange { date, rate }),
        None => Ok(()),
    }
}

impl LoanScenario {
    /// Build the grid and resolve every input onto it. Nothing is calculated yet.
    pub fn new(inputs: &ScenarioInputs) -> Result<Self> {
        if !inputs.initial_loan.is_finite() {
            return Err(ProjectionError::NonFiniteInitial("initial loan"));
        }
        if !inputs.initial_balance.is_finite() {
            return Err(ProjectionError::NonFiniteInitial("initial balance"));
        }
        check_schedule("rate", &inputs.rates)?;
        check_schedule("loan contribution", &inputs.loan_contributions)?;
        check_schedule("balance contribution", &inputs.balance_contributions)?;
        check_rates(&inputs.rates)?;

        let grid = build_grid(inputs.start_year, inputs.end_year)?;
        let rates = inputs.rates.resolve(&grid);
        let loan_contributions = inputs.loan_contributions.resolve(&grid);
        let balance_contributions = inputs.balance_contributions.resolve(&grid);

        let mut rows: Vec<PeriodRow> = grid
            .iter()
            .enumerate()
            .map(|(i, &date)| {
                PeriodRow::new(i, date, rates[i], loan_contributions[i], balance_contributions[i])
            })
            .collect();

        // Seed values are visible before calculation; later rows stay zero.
        if let Some(first) = rows.first_mut() {
            first.loan = inputs.initial_loan;
            first.balance = inputs.initial_balance;
        }

        debug!(
            "resolved {} periods ({} rate, {} loan, {} balance entries)",
            rows.len(),
            inputs.rates.len(),
            inputs.loan_contributions.len(),
            inputs.balance_contributions.len()
        );

        Ok(Self {
            initial_loan: inputs.initial_loan,
            initial_balance: inputs.initial_balance,
            start_year: inputs.start_year,
            end_year: inputs.end_year,
            rows,
            state: CalculationState::Uncalculated,
        })
    }

    /// Compute the loan and balance series. Calls after the first are no-ops.
    pub fn calculate(&mut self) {
        if self.state.is_calculated() {
            debug!("scenario {}..={} already calculated", self.start_year, self.end_year);
            return;
        }
        self.state = CalculationState::Calculated;

        projection::project(&mut self.rows, self.initial_loan, self.initial_balance);

        info!(
            "calculated {} periods: final loan {:.2}, final balance {:.2}, total interest {:.2}",
            self.rows.len(),
            self.final_loan(),
            self.final_balance(),
            self.total_interest()
        );
    }

    pub fn state(&self) -> CalculationState {
        self.state
    }

    pub fn is_calculated(&self) -> bool {
        self.state.is_calculated()
    }

    /// Final loan minus principal and compounded contributions; 0.0 before calculation
    pub fn total_interest(&self) -> f64 {
        if !self.is_calculated() {
            return 0.0;
        }
        projection::total_interest(&self.rows, self.initial_loan)
    }

    pub fn rows(&self) -> &[PeriodRow] {
        &self.rows
    }

    pub fn loan_series(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.loan).collect()
    }

    pub fn balance_series(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.balance).collect()
    }

    /// Loan at the last period; the initial loan before calculation
    pub fn final_loan(&self) -> f64 {
        if !self.is_calculated() {
            return self.initial_loan;
        }
        self.rows.last().map(|r| r.loan).unwrap_or(self.initial_loan)
    }

    /// Balance at the last period; the initial balance before calculation
    pub fn final_balance(&self) -> f64 {
        if !self.is_calculated() {
            return self.initial_balance;
        }
        self.rows.last().map(|r| r.balance).unwrap_or(self.initial_balance)
    }

    pub fn summary(&self) -> ScheduleSummary {
        if !self.is_calculated() {
            return ScheduleSummary::uncalculated(&self.rows, self.initial_loan, self.initial_balance);
        }
        ScheduleSummary::from_rows(&self.rows, self.initial_loan, self.total_interest())
    }

    /// Write every row as CSV with a header
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Builds and calculates independent scenarios, one worker per scenario
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner;

impl ScenarioRunner {
    pub fn new() -> Self {
        Self
    }

    /// Build and calculate a single scenario
    pub fn run(&self, inputs: &ScenarioInputs) -> Result<LoanScenario> {
        let mut scenario = LoanScenario::new(inputs)?;
        scenario.calculate();
        Ok(scenario)
    }

    /// Run many scenarios in parallel; results keep the input order
    pub fn run_batch(&self, inputs: &[ScenarioInputs]) -> Vec<Result<LoanScenario>> {
        inputs.par_iter().map(|i| self.run(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn jan(year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, 1, 1).unwrap()
    }

    fn paydown_inputs() -> ScenarioInputs {
        ScenarioInputs::new(1200.0, 0.0, 2024, 2024)
            .with_rates(SparseSchedule::constant_from(jan(2024), 12.0))
            .with_loan_contributions(SparseSchedule::constant_from(jan(2024), -100.0))
    }

    #[test]
    fn test_total_interest_zero_before_calculate() {
        let scenario = LoanScenario::new(&paydown_inputs()).unwrap();
        assert!(!scenario.is_calculated());
        assert_eq!(scenario.total_interest(), 0.0);
        assert_eq!(scenario.summary().total_interest, 0.0);
        assert_eq!(scenario.rows()[0].loan, 1200.0);
    }

    #[test]
    fn test_paydown_scenario() {
        let mut scenario = LoanScenario::new(&paydown_inputs()).unwrap();
        scenario.calculate();

        let loan = scenario.loan_series();
        assert_eq!(loan.len(), 12);
        assert_eq!(loan[0], 1200.0);
        assert_relative_eq!(loan[1], 1110.63, epsilon = 0.01);
        assert!(scenario.rows().iter().all(|r| !r.floored));

        let lc_sum: f64 = scenario.rows()[..11].iter().map(|r| r.loan_contribution).sum();
        assert_relative_eq!(scenario.total_interest(), loan[11] - (1200.0 + lc_sum));
        assert!(scenario.total_interest() > 0.0);
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let mut once = LoanScenario::new(&paydown_inputs()).unwrap();
        once.calculate();

        let mut twice = LoanScenario::new(&paydown_inputs()).unwrap();
        twice.calculate();
        twice.calculate();

        assert_eq!(once.rows(), twice.rows());
        assert_eq!(once.total_interest(), twice.total_interest());
        assert_eq!(twice.state(), CalculationState::Calculated);
    }

    #[test]
    fn test_invalid_range() {
        let inputs = ScenarioInputs::new(0.0, 0.0, 2025, 2024);
        assert!(matches!(
            LoanScenario::new(&inputs),
            Err(ProjectionError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        let inputs = ScenarioInputs::new(f64::NAN, 0.0, 2024, 2024);
        assert!(matches!(
            LoanScenario::new(&inputs),
            Err(ProjectionError::NonFiniteInitial(_))
        ));

        let inputs = ScenarioInputs::new(1.0, 0.0, 2024, 2024)
            .with_rates(SparseSchedule::constant_from(jan(2024), f64::INFINITY));
        assert!(matches!(
            LoanScenario::new(&inputs),
            Err(ProjectionError::NonFiniteValue { schedule: "rate", .. })
        ));
    }

    #[test]
    fn test_summary_before_calculate_reports_no_payoff() {
        let inputs = ScenarioInputs::new(250.0, 40.0, 2024, 2024)
            .with_loan_contributions(SparseSchedule::constant_from(jan(2024), -100.0));
        let scenario = LoanScenario::new(&inputs).unwrap();
        let summary = scenario.summary();

        assert_eq!(summary.payoff_period, None);
        assert_eq!(summary.final_loan, 250.0);
        assert_eq!(summary.final_balance, 40.0);
        assert_eq!(summary.floor_hits, 0);
        assert_eq!(summary.total_periods, 12);
        assert_eq!(scenario.final_loan(), 250.0);
        assert_eq!(scenario.final_balance(), 40.0);
    }

    #[test]
    fn test_rate_at_or_below_minus_hundred_rejected() {
        for rate in [-100.0, -150.0] {
            let inputs = ScenarioInputs::new(1000.0, 0.0, 2024, 2024)
                .with_rates(SparseSchedule::constant_from(jan(2024), rate));
            assert!(matches!(
                LoanScenario::new(&inputs),
                Err(ProjectionError::RateOutOfRange { .. })
            ));
        }

        let inputs = ScenarioInputs::new(1000.0, 0.0, 2024, 2024)
            .with_rates(SparseSchedule::constant_from(jan(2024), -99.0));
        let mut scenario = LoanScenario::new(&inputs).unwrap();
        scenario.calculate();
        assert!(scenario.rows().iter().all(|r| r.loan.is_finite() && r.loan > 0.0));
    }

    #[test]
    fn test_summary_tracks_payoff() {
        let inputs = ScenarioInputs::new(250.0, 0.0, 2024, 2024)
            .with_loan_contributions(SparseSchedule::constant_from(jan(2024), -100.0))
            .with_balance_contributions(SparseSchedule::constant_from(jan(2024), 10.0));
        let mut scenario = LoanScenario::new(&inputs).unwrap();
        scenario.calculate();
        let summary = scenario.summary();

        // zero rate: 250 -> 150 -> 50 -> 0 (clamped from -50)
        assert_eq!(summary.payoff_period, Some(3));
        assert_eq!(summary.floor_hits, 9);
        assert_eq!(summary.final_loan, 0.0);
        assert_eq!(summary.total_periods, 12);
        assert_relative_eq!(summary.total_balance_contributions, 110.0);
        assert_relative_eq!(summary.compounded_loan_contributions, -1100.0);
        assert_relative_eq!(summary.final_balance, -1100.0 + 110.0);
    }

    #[test]
    fn test_write_csv() {
        let mut scenario = LoanScenario::new(&paydown_inputs()).unwrap();
        scenario.calculate();

        let mut buf = Vec::new();
        scenario.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some(
                "period,date,rate,loan_contribution,balance_contribution,elapsed_days,\
                 part_of_year,compounding_factor,loan,balance,floored"
            )
        );
        assert!(lines.next().unwrap().starts_with("0,2024-01-01,12.0,-100.0,0.0,0,"));
        assert_eq!(text.lines().count(), 13);
    }

    #[test]
    fn test_run_batch_keeps_order() {
        let runner = ScenarioRunner::new();
        let mut inputs: Vec<_> = [6.0, 12.0, 18.0]
            .iter()
            .map(|&rate| {
                paydown_inputs().with_rates(SparseSchedule::constant_from(jan(2024), rate))
            })
            .collect();
        inputs.push(ScenarioInputs::new(0.0, 0.0, 2030, 2020));

        let results = runner.run_batch(&inputs);
        assert_eq!(results.len(), 4);
        assert!(results[3].is_err());

        let interest: Vec<f64> = results[..3]
            .iter()
            .map(|r| r.as_ref().unwrap().total_interest())
            .collect();
        assert!(interest[0] < interest[1] && interest[1] < interest[2]);
    }
}
