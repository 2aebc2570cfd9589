//! Sequential loan/balance recurrence over the monthly grid

use log::{debug, warn};

use super::rows::PeriodRow;
use super::state::RecurrenceState;
use crate::schedule::elapsed_days;

/// Average days per year used to turn elapsed days into a year fraction
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Fraction of a year covered by `elapsed_days`
pub fn part_of_year(elapsed_days: i64) -> f64 {
    elapsed_days as f64 / DAYS_PER_YEAR
}

/// Growth multiplier for an annual percentage rate over `part_of_year` years
pub fn compounding_factor(rate_pct: f64, part_of_year: f64) -> f64 {
    (1.0 + rate_pct / 100.0).powf(part_of_year)
}

/// Fill the timing and compounding columns. Period 0 keeps zeros.
pub fn apply_compounding(rows: &mut [PeriodRow]) {
    for i in 1..rows.len() {
        let days = elapsed_days(rows[i - 1].date, rows[i].date);
        let row = &mut rows[i];
        row.elapsed_days = days;
        row.part_of_year = part_of_year(days);
        row.compounding_factor = compounding_factor(row.rate, row.part_of_year);
    }
}

/// Run the full recurrence in place, seeding period 0 with the initial values.
///
/// Returns the number of periods where the loan floor triggered.
pub fn project(rows: &mut [PeriodRow], initial_loan: f64, initial_balance: f64) -> usize {
    let Some(first) = rows.first_mut() else {
        return 0;
    };
    first.loan = initial_loan;
    first.balance = initial_balance;

    apply_compounding(rows);

    let mut state = RecurrenceState::from_first(&rows[0]);
    let mut floor_hits = 0;

    for row in rows.iter_mut().skip(1) {
        if state.advance(row) {
            if floor_hits == 0 {
                warn!("loan floored at zero from period {} ({})", row.period, row.date);
            }
            floor_hits += 1;
        }
    }

    debug!("recurrence over {} periods, {} floor hits", rows.len(), floor_hits);
    floor_hits
}

/// Final loan minus the initial principal and every contribution folded into a
/// compounding step. The last period's contribution is excluded.
pub fn total_interest(rows: &[PeriodRow], initial_loan: f64) -> f64 {
    let Some(last) = rows.last() else {
        return 0.0;
    };
    let compounded: f64 = rows[..rows.len() - 1]
        .iter()
        .map(|r| r.loan_contribution)
        .sum();
    last.loan - (initial_loan + compounded)
}
