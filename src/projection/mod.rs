//! Recurrence engine for monthly loan and balance projections

mod state;
mod engine;
mod rows;

pub use state::{CalculationState, RecurrenceState};
pub use engine::{
    apply_compounding, compounding_factor, part_of_year, project, total_interest, DAYS_PER_YEAR,
};
pub use rows::{PeriodRow, ScheduleSummary};
