//! Fitness strategies.
//!
//! A fitness value in [0, 1] scores how "settled" a method is; the unfit
//! sampler keeps editing the low scorers.

pub mod centrality;
pub mod uniform;

pub use centrality::CentralityFitness;
pub use uniform::UniformFitness;

use codevo_core::config::{FitnessMethod, ModelConfig};
use petgraph::graph::NodeIndex;
use rand::rngs::StdRng;

use crate::graph::ReferenceGraph;

/// Assigns fitness values to methods.
pub trait FitnessStrategy: Send + std::fmt::Debug {
    fn method(&self) -> FitnessMethod;

    /// Fitness for `node`, or the default for a method not yet wired into
    /// the graph when `node` is `None`. Always within [0, 1].
    fn fitness(&mut self, graph: &ReferenceGraph, node: Option<NodeIndex>, rng: &mut StdRng) -> f64;
}

/// Build the strategy selected by `config`.
pub fn strategy_for(config: &ModelConfig) -> Box<dyn FitnessStrategy> {
    match config.effective_fitness_method() {
        FitnessMethod::Uniform => Box::new(UniformFitness),
        FitnessMethod::Centrality => Box::new(CentralityFitness::new(
            config.effective_damping(),
            config.effective_centrality_iterations(),
            config.effective_centrality_noise(),
        )),
    }
}
