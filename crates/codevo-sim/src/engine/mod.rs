//! Simulation engine: step driver, batch runner and statistics.

pub mod batch;
pub mod driver;
pub mod stats;

pub use batch::{run_batch, BatchRun};
pub use driver::Simulation;
pub use stats::{FitnessSummary, StatisticsLog, StepRecord};
