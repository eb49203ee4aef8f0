//! Call-method: add an invocation between two methods by preferential attachment.

use codevo_core::errors::{SimulationError, SimulationResult};
use petgraph::graph::NodeIndex;
use rand::rngs::StdRng;

use crate::graph::ReferenceGraph;
use crate::model::EvolutionModel;
use crate::random::{uniform_pick, weighted_pick};

/// Returns +1 on success, 0 when no valid callee remains under the strict
/// condition.
pub fn call_method(model: &mut EvolutionModel) -> SimulationResult<i64> {
    let graph = model.codebase.graph();
    let nodes = graph.node_indices();
    let pref = model.params.pref_attachment;

    let caller_weights: Option<Vec<f64>> = pref
        .weights_caller()
        .then(|| nodes.iter().map(|idx| line_weight(graph, *idx)).collect());
    let caller = pick(&nodes, caller_weights.as_deref(), &mut model.rng)
        .ok_or(SimulationError::EmptyCodebase)?;

    let mut candidates = nodes;
    let mut callee_weights: Option<Vec<f64>> = pref.weights_callee().then(|| {
        candidates
            .iter()
            .map(|idx| graph.in_degree(*idx) as f64 + 1.0)
            .collect()
    });
    let mut callee = pick(&candidates, callee_weights.as_deref(), &mut model.rng)
        .ok_or(SimulationError::EmptyCodebase)?;

    if !model.params.experiment_condition.allows_repeat_calls() {
        while callee == caller || graph.has_call(caller, callee) {
            if let Some(pos) = candidates.iter().position(|idx| *idx == callee) {
                candidates.remove(pos);
                if let Some(weights) = callee_weights.as_mut() {
                    weights.remove(pos);
                }
            }
            match pick(&candidates, callee_weights.as_deref(), &mut model.rng) {
                Some(next) => callee = next,
                None => {
                    tracing::debug!(caller = caller.index(), "no valid callee left");
                    return Ok(0);
                }
            }
        }
    }

    model.codebase.add_invocation(caller, callee)?;
    model.refresh_fitness(caller)?;
    tracing::debug!(caller = caller.index(), callee = callee.index(), "added call");
    Ok(1)
}

fn line_weight(graph: &ReferenceGraph, idx: NodeIndex) -> f64 {
    graph.node(idx).map_or(1.0, |n| n.lines() as f64 + 1.0)
}

fn pick(nodes: &[NodeIndex], weights: Option<&[f64]>, rng: &mut StdRng) -> Option<NodeIndex> {
    match weights {
        Some(weights) => weighted_pick(nodes, weights, rng),
        None => uniform_pick(nodes, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codebase::Codebase;
    use crate::seed::SeedSpec;
    use codevo_core::config::{ExperimentCondition, ModelConfig};

    fn model(condition: ExperimentCondition) -> EvolutionModel {
        let mut config = ModelConfig::default();
        config.experiment_condition = Some(condition);
        let codebase = Codebase::from_seed(&SeedSpec::default()).unwrap();
        EvolutionModel::new(codebase, &config, 9)
    }

    #[test]
    fn test_single_method_strict_is_noop() {
        let mut m = model(ExperimentCondition::Strict);
        assert_eq!(call_method(&mut m).unwrap(), 0);
        assert_eq!(m.codebase.graph().edge_count(), 0);
        assert_eq!(m.codebase.code_size(), 0);
    }

    #[test]
    fn test_single_method_reproduce_allows_self_call() {
        let mut m = model(ExperimentCondition::Reproduce);
        assert_eq!(call_method(&mut m).unwrap(), 1);
        let main = m.codebase.graph().get("main").unwrap();
        assert!(m.codebase.graph().has_call(main, main));
        m.codebase.validate().unwrap();
    }
}
