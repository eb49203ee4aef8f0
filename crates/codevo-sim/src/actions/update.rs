//! Update-method: add or delete one declaration in an unfit method.

use codevo_core::errors::{SimulationError, SimulationResult};

use crate::model::EvolutionModel;
use crate::random::chance;

/// Returns +1 on add, -1 on delete, 0 when there was nothing to delete.
/// The target's fitness is refreshed in every case.
pub fn update_method(model: &mut EvolutionModel) -> SimulationResult<i64> {
    let target = model.pick_unfit().ok_or(SimulationError::EmptyCodebase)?;

    let change = if chance(model.params.add_statement, &mut model.rng) {
        model.codebase.add_declaration(target)?;
        1
    } else if model.codebase.remove_declaration(target, &mut model.rng)? {
        -1
    } else {
        0
    };

    model.refresh_fitness(target)?;
    tracing::debug!(method = target.index(), change, "updated method");
    Ok(change)
}
