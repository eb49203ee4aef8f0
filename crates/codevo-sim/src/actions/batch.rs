//! Batch change: one removal followed by several updates in the same step.

use codevo_core::constants::BATCH_MAX_UPDATES;
use codevo_core::errors::SimulationResult;
use rand::Rng;

use super::remove::remove_method;
use super::update::update_method;
use crate::model::EvolutionModel;

/// Always returns +1, whatever the inner actions did.
pub fn batch_change(model: &mut EvolutionModel) -> SimulationResult<i64> {
    remove_method(model)?;
    let updates = model.rng.gen_range(0..BATCH_MAX_UPDATES);
    for _ in 0..updates {
        update_method(model)?;
    }
    tracing::debug!(updates, "batch change");
    Ok(1)
}
