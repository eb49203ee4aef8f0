//! Event payload types.

/// Payload for `on_run_started`.
#[derive(Debug, Clone)]
pub struct RunStartedEvent {
    pub sim: u32,
    pub seed: u64,
    pub iterations: u64,
    pub methods: usize,
    pub classes: usize,
}

/// Payload for `on_step_completed`.
#[derive(Debug, Clone)]
pub struct StepCompletedEvent {
    pub sim: u32,
    pub step: u64,
    pub action: &'static str,
    pub change: i64,
    pub attempts: u32,
    pub fmin: f64,
    pub code_size: u64,
}

/// Payload for `on_method_removed`. Emitted once per method taken out by a cascade.
#[derive(Debug, Clone)]
pub struct MethodRemovedEvent {
    pub step: u64,
    pub method: String,
    pub class: String,
    pub class_removed: bool,
}

/// Payload for `on_run_completed`.
#[derive(Debug, Clone)]
pub struct RunCompletedEvent {
    pub sim: u32,
    pub steps: u64,
    pub methods: usize,
    pub classes: usize,
    pub code_size: u64,
    pub duration_ms: u64,
}
