//! Simulation engine errors.

use super::error_code::{self, CodevoErrorCode};

/// Errors raised by the reference graph, the actions and the step driver.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("Simulation stalled at step {step}: {attempts} consecutive no-op actions")]
    Stalled { step: u64, attempts: u32 },

    #[error("Codebase has no methods")]
    EmptyCodebase,

    #[error("Unknown method: {name}")]
    UnknownMethod { name: String },

    #[error("Unknown class: {name}")]
    UnknownClass { name: String },

    #[error("Duplicate name: {name}")]
    DuplicateName { name: String },

    #[error("Invariant violated: {message}")]
    InvariantViolated { message: String },

    #[error("Invalid action weights: {message}")]
    InvalidWeights { message: String },
}

impl CodevoErrorCode for SimulationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Stalled { .. } => error_code::SIMULATION_STALLED,
            Self::EmptyCodebase => error_code::EMPTY_CODEBASE,
            Self::UnknownMethod { .. }
            | Self::UnknownClass { .. }
            | Self::DuplicateName { .. } => error_code::UNKNOWN_ENTITY,
            Self::InvariantViolated { .. } => error_code::INVARIANT_VIOLATED,
            Self::InvalidWeights { .. } => error_code::INVALID_WEIGHTS,
        }
    }
}

/// Convenience alias for simulation results.
pub type SimulationResult<T> = Result<T, SimulationError>;
