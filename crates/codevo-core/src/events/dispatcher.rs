//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::SimulationEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn SimulationEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn SimulationEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler does not prevent later handlers from receiving the event.
    fn emit<F: Fn(&dyn SimulationEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                ::tracing::warn!("simulation event handler panicked");
            }
        }
    }

    pub fn emit_run_started(&self, event: &RunStartedEvent) {
        self.emit(|h| h.on_run_started(event));
    }

    pub fn emit_step_completed(&self, event: &StepCompletedEvent) {
        self.emit(|h| h.on_step_completed(event));
    }

    pub fn emit_method_removed(&self, event: &MethodRemovedEvent) {
        self.emit(|h| h.on_method_removed(event));
    }

    pub fn emit_run_completed(&self, event: &RunCompletedEvent) {
        self.emit(|h| h.on_run_completed(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
