//! Remove-method with cascading deletion of callers left empty.

use std::collections::VecDeque;

use codevo_core::errors::{SimulationError, SimulationResult};
use petgraph::graph::NodeIndex;

use crate::model::EvolutionModel;

/// Remove an unfit method. Returns 0 when only one method is left.
pub fn remove_method(model: &mut EvolutionModel) -> SimulationResult<i64> {
    if model.codebase.method_count() <= 1 {
        return Ok(0);
    }
    let victim = model.pick_unfit().ok_or(SimulationError::EmptyCodebase)?;
    remove_cascade(model, victim)
}

/// Remove `start` and every caller emptied along the way.
///
/// Each surviving caller that lost invocations contributes -1, each removed
/// method -1. The last remaining method is never removed.
pub fn remove_cascade(model: &mut EvolutionModel, start: NodeIndex) -> SimulationResult<i64> {
    let mut queue = VecDeque::from([start]);
    let mut change = 0i64;

    while let Some(target) = queue.pop_front() {
        if !model.codebase.graph().contains(target) {
            continue;
        }
        if model.codebase.method_count() <= 1 {
            break;
        }

        for caller in model.codebase.graph().callers(target) {
            if caller == target {
                continue;
            }
            model.codebase.remove_invocations(caller, target)?;
            if model.codebase.graph().require(caller)?.is_empty() {
                queue.push_back(caller);
            } else {
                model.refresh_fitness(caller)?;
                change -= 1;
            }
        }

        let removed = model.codebase.remove_method(target)?;
        tracing::debug!(
            method = %removed.name,
            class = %removed.class,
            class_removed = removed.class_removed,
            "removed method"
        );
        model.record_removal(removed);
        change -= 1;
    }

    Ok(change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codebase::Codebase;
    use crate::seed::SeedSpec;
    use codevo_core::config::ModelConfig;

    fn model() -> EvolutionModel {
        let codebase = Codebase::from_seed(&SeedSpec::default()).unwrap();
        EvolutionModel::new(codebase, &ModelConfig::default(), 1)
    }

    #[test]
    fn test_last_method_guard() {
        let mut m = model();
        assert_eq!(remove_method(&mut m).unwrap(), 0);
        assert_eq!(m.codebase.method_count(), 1);
        assert!(m.drain_removed().is_empty());
    }

    #[test]
    fn test_self_call_does_not_requeue() {
        let mut m = model();
        let main = m.codebase.graph().get("main").unwrap();
        let other = m.codebase.create_method("App").unwrap();
        m.codebase.add_invocation(other, other).unwrap();
        assert_eq!(remove_cascade(&mut m, other).unwrap(), -1);
        assert!(m.codebase.graph().contains(main));
        m.codebase.validate().unwrap();
    }

    #[test]
    fn test_surviving_caller_contributes_one() {
        let mut m = model();
        let main = m.codebase.graph().get("main").unwrap();
        let helper = m.codebase.create_method("App").unwrap();
        m.codebase.add_declaration(main).unwrap();
        m.codebase.add_invocation(main, helper).unwrap();
        assert_eq!(remove_cascade(&mut m, helper).unwrap(), -2);
        assert_eq!(m.codebase.graph().node(main).unwrap().lines(), 1);
        m.codebase.validate().unwrap();
    }

    #[test]
    fn test_cascade_stops_at_last_method() {
        let mut m = model();
        let main = m.codebase.graph().get("main").unwrap();
        let helper = m.codebase.create_method("App").unwrap();
        m.codebase.add_invocation(main, helper).unwrap();
        // main is emptied and queued, but the guard keeps it alive.
        assert_eq!(remove_cascade(&mut m, helper).unwrap(), -1);
        assert_eq!(m.codebase.method_count(), 1);
        assert!(m.codebase.graph().node(main).unwrap().is_empty());
        m.codebase.validate().unwrap();
    }
}
