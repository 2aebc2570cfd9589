//! Loan Projection - monthly amortization engine for a loan and a cumulative balance
//!
//! This library provides:
//! - A monthly time grid over an inclusive span of years
//! - Carry-forward resolution of sparse rate and contribution schedules
//! - The loan/balance recurrence with a non-negative loan floor
//! - Total interest and schedule summaries, CSV export, batch runs

pub mod error;
pub mod config;
pub mod schedule;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use config::ScenarioInputs;
pub use schedule::{build_grid, resolve_series, SparseSchedule};
pub use projection::{CalculationState, PeriodRow, ScheduleSummary};
pub use scenario::{LoanScenario, ScenarioRunner};
