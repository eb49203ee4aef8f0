//! Run-level configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ITERATIONS, DEFAULT_MAX_RETRIES, DEFAULT_SEED, DEFAULT_SIMULATIONS};

/// Configuration for the step driver.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimulationConfig {
    /// Steps per run. Default: 1000.
    pub iterations: Option<u64>,
    /// RNG seed for the first run; run `i` of a batch uses `seed + i`. Default: 42.
    pub seed: Option<u64>,
    /// Number of isolated runs in a batch. Default: 1.
    pub simulations: Option<u32>,
    /// Consecutive no-op actions tolerated before a step is reported as stalled. Default: 10000.
    pub max_retries: Option<u32>,
}

impl SimulationConfig {
    pub fn effective_iterations(&self) -> u64 {
        self.iterations.unwrap_or(DEFAULT_ITERATIONS)
    }

    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    pub fn effective_simulations(&self) -> u32 {
        self.simulations.unwrap_or(DEFAULT_SIMULATIONS)
    }

    pub fn effective_max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }
}
