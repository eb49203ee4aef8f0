//! Create-method: add an empty method, sometimes in a brand-new class.

use codevo_core::errors::{SimulationError, SimulationResult};

use crate::model::EvolutionModel;
use crate::random::{chance, weighted_pick};

/// Returns +1, or +2 when a class was created as well.
pub fn create_method(model: &mut EvolutionModel) -> SimulationResult<i64> {
    let (class, change) = if chance(model.params.create_class, &mut model.rng)
        || model.codebase.classes().is_empty()
    {
        (create_class(model)?, 2)
    } else {
        (pick_class(model)?, 1)
    };

    let idx = model.codebase.create_method(&class)?;
    let fitness = model.default_fitness();
    model.codebase.graph_mut().set_fitness(idx, fitness)?;

    tracing::debug!(class = %class, change, "created method");
    Ok(change)
}

/// Create an empty class. With probability `1 - no_inherit` it extends an
/// existing class chosen by (subclass count + 1).
pub fn create_class(model: &mut EvolutionModel) -> SimulationResult<String> {
    let parent = if chance(model.params.no_inherit, &mut model.rng) {
        None
    } else {
        let classes = model.codebase.classes();
        let names: Vec<&str> = classes.names();
        let weights: Vec<f64> = names
            .iter()
            .map(|name| classes.subclass_count(name) as f64 + 1.0)
            .collect();
        weighted_pick(&names, &weights, &mut model.rng).map(str::to_string)
    };
    model.codebase.create_class(parent)
}

/// Existing class weighted by (method count + 1).
fn pick_class(model: &mut EvolutionModel) -> SimulationResult<String> {
    let classes = model.codebase.classes();
    let names: Vec<&str> = classes.names();
    let weights: Vec<f64> = classes
        .iter()
        .map(|c| c.method_count() as f64 + 1.0)
        .collect();
    weighted_pick(&names, &weights, &mut model.rng)
        .map(str::to_string)
        .ok_or(SimulationError::EmptyCodebase)
}
