//! Evolution model state shared by every edit action.

use codevo_core::config::{ExperimentCondition, ModelConfig, PrefAttachment};
use codevo_core::errors::SimulationResult;
use petgraph::graph::NodeIndex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::codebase::{Codebase, RemovedMethod};
use crate::fitness::{strategy_for, FitnessStrategy};
use crate::sampler::UnfitSampler;

/// Probabilities and modes the actions consult.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    pub add_statement: f64,
    pub create_class: f64,
    pub no_inherit: f64,
    pub pref_attachment: PrefAttachment,
    pub experiment_condition: ExperimentCondition,
}

impl From<&ModelConfig> for ModelParams {
    fn from(config: &ModelConfig) -> Self {
        Self {
            add_statement: config.effective_add_statement(),
            create_class: config.effective_create_class(),
            no_inherit: config.effective_no_inherit(),
            pref_attachment: config.effective_pref_attachment(),
            experiment_condition: config.effective_experiment_condition(),
        }
    }
}

impl Default for ModelParams {
    fn default() -> Self {
        Self::from(&ModelConfig::default())
    }
}

/// Codebase plus the fitness strategy, sampler and RNG acting on it.
#[derive(Debug)]
pub struct EvolutionModel {
    pub codebase: Codebase,
    pub fitness: Box<dyn FitnessStrategy>,
    pub sampler: UnfitSampler,
    pub params: ModelParams,
    pub rng: StdRng,
    /// Methods removed since the last drain.
    removed: Vec<RemovedMethod>,
}

impl EvolutionModel {
    pub fn new(codebase: Codebase, config: &ModelConfig, seed: u64) -> Self {
        Self {
            codebase,
            fitness: strategy_for(config),
            sampler: UnfitSampler::from_config(config),
            params: ModelParams::from(config),
            rng: StdRng::seed_from_u64(seed),
            removed: Vec::new(),
        }
    }

    /// Assign every method a fresh fitness value.
    pub fn initialize_fitness(&mut self) -> SimulationResult<()> {
        for idx in self.codebase.graph().node_indices() {
            self.refresh_fitness(idx)?;
        }
        Ok(())
    }

    /// Draw a fresh fitness value for `idx`.
    pub fn refresh_fitness(&mut self, idx: NodeIndex) -> SimulationResult<()> {
        let value = self
            .fitness
            .fitness(self.codebase.graph(), Some(idx), &mut self.rng);
        self.codebase.graph_mut().set_fitness(idx, value)
    }

    /// Fitness for a method not yet wired into the graph.
    pub fn default_fitness(&mut self) -> f64 {
        self.fitness.fitness(self.codebase.graph(), None, &mut self.rng)
    }

    pub fn pick_unfit(&mut self) -> Option<NodeIndex> {
        self.sampler.pick(self.codebase.graph(), &mut self.rng)
    }

    pub(crate) fn record_removal(&mut self, removed: RemovedMethod) {
        self.removed.push(removed);
    }

    /// Take the removals recorded since the last call.
    pub fn drain_removed(&mut self) -> Vec<RemovedMethod> {
        std::mem::take(&mut self.removed)
    }
}
