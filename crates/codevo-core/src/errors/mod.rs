//! Error handling for codevo.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod export_error;
pub mod simulation_error;

pub use config_error::ConfigError;
pub use error_code::CodevoErrorCode;
pub use export_error::ExportError;
pub use simulation_error::{SimulationError, SimulationResult};
