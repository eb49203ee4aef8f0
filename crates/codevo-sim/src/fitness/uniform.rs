use codevo_core::config::FitnessMethod;
use petgraph::graph::NodeIndex;
use rand::rngs::StdRng;
use rand::Rng;

use super::FitnessStrategy;
use crate::graph::ReferenceGraph;

/// Fresh U[0,1) draw per call, independent of the graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformFitness;

impl FitnessStrategy for UniformFitness {
    fn method(&self) -> FitnessMethod {
        FitnessMethod::Uniform
    }

    fn fitness(&mut self, _graph: &ReferenceGraph, _node: Option<NodeIndex>, rng: &mut StdRng) -> f64 {
        rng.gen::<f64>()
    }
}
