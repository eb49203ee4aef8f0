//! Simulation lifecycle events.
//! Synchronous dispatch, no-op handler defaults, panicking handlers isolated.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::SimulationEventHandler;
pub use types::{MethodRemovedEvent, RunCompletedEvent, RunStartedEvent, StepCompletedEvent};
