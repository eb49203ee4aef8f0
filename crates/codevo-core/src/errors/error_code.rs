//! CodevoErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable, machine-readable
/// code alongside its human-readable message.
pub trait CodevoErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SIMULATION_STALLED: &str = "SIMULATION_STALLED";
pub const EMPTY_CODEBASE: &str = "EMPTY_CODEBASE";
pub const UNKNOWN_ENTITY: &str = "UNKNOWN_ENTITY";
pub const INVARIANT_VIOLATED: &str = "INVARIANT_VIOLATED";
pub const INVALID_WEIGHTS: &str = "INVALID_WEIGHTS";
pub const EXPORT_ERROR: &str = "EXPORT_ERROR";
