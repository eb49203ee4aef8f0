//! SimulationEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing a simulation run.
///
/// Handlers override only the events they care about.
pub trait SimulationEventHandler: Send + Sync {
    fn on_run_started(&self, _event: &RunStartedEvent) {}
    fn on_step_completed(&self, _event: &StepCompletedEvent) {}
    fn on_method_removed(&self, _event: &MethodRemovedEvent) {}
    fn on_run_completed(&self, _event: &RunCompletedEvent) {}
}
