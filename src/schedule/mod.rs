//! Monthly time grid and sparse-to-dense resolution of time-varying inputs

mod grid;
mod sparse;
pub mod loader;

pub use grid::{build_grid, elapsed_days};
pub use sparse::{resolve_series, SparseSchedule};
pub use loader::{load_schedule, load_schedule_from_reader, LoadedSchedules};
