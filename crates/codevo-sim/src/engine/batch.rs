//! Sequential batch of isolated simulations.

use codevo_core::config::CodevoConfig;
use codevo_core::errors::SimulationResult;
use codevo_core::events::EventDispatcher;

use super::driver::Simulation;
use super::stats::StatisticsLog;
use crate::codebase::Codebase;
use crate::seed::SeedSpec;

/// Outcome of one run in a batch.
#[derive(Debug, Clone)]
pub struct BatchRun {
    pub log: StatisticsLog,
    /// Final state of the codebase.
    pub codebase: Codebase,
}

/// Run `simulation.simulations` runs one after another. Run `i` uses seed
/// `simulation.seed + i` and starts from a fresh copy of `seed_spec`.
pub fn run_batch(
    config: &CodevoConfig,
    seed_spec: &SeedSpec,
    events: &EventDispatcher,
) -> SimulationResult<Vec<BatchRun>> {
    let base_seed = config.simulation.effective_seed();
    let count = config.simulation.effective_simulations();
    let mut runs = Vec::with_capacity(count as usize);

    for sim in 0..count {
        let seed = base_seed.wrapping_add(u64::from(sim));
        let mut simulation = Simulation::seeded(config, seed_spec, seed)?
            .with_sim_index(sim)
            .with_events(events.clone());
        simulation.run()?;
        let (codebase, log) = simulation.into_parts();
        runs.push(BatchRun { log, codebase });
    }

    tracing::info!(simulations = count, "batch completed");
    Ok(runs)
}
