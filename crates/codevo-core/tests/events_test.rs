//! Tests for the simulation event system.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use codevo_core::events::{
    EventDispatcher, MethodRemovedEvent, RunCompletedEvent, RunStartedEvent,
    SimulationEventHandler, StepCompletedEvent,
};

/// A test handler that counts events.
#[derive(Default)]
struct CountingHandler {
    started: AtomicUsize,
    steps: AtomicUsize,
    removed: AtomicUsize,
    completed: AtomicUsize,
}

impl SimulationEventHandler for CountingHandler {
    fn on_run_started(&self, _event: &RunStartedEvent) {
        self.started.fetch_add(1, Ordering::Relaxed);
    }

    fn on_step_completed(&self, _event: &StepCompletedEvent) {
        self.steps.fetch_add(1, Ordering::Relaxed);
    }

    fn on_method_removed(&self, _event: &MethodRemovedEvent) {
        self.removed.fetch_add(1, Ordering::Relaxed);
    }

    fn on_run_completed(&self, _event: &RunCompletedEvent) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }
}

fn step_event(step: u64) -> StepCompletedEvent {
    StepCompletedEvent {
        sim: 0,
        step,
        action: "update_method",
        change: 1,
        attempts: 1,
        fmin: 0.1,
        code_size: step + 1,
    }
}

#[test]
fn test_handler_noop_defaults() {
    struct NoopHandler;
    impl SimulationEventHandler for NoopHandler {}

    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(NoopHandler));
    dispatcher.emit_step_completed(&step_event(0));
    assert_eq!(dispatcher.handler_count(), 1);
}

#[test]
fn test_dispatch_reaches_every_handler() {
    let a = Arc::new(CountingHandler::default());
    let b = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(a.clone());
    dispatcher.register(b.clone());

    dispatcher.emit_run_started(&RunStartedEvent {
        sim: 0,
        seed: 1,
        iterations: 3,
        methods: 1,
        classes: 1,
    });
    for step in 0..3 {
        dispatcher.emit_step_completed(&step_event(step));
    }
    dispatcher.emit_method_removed(&MethodRemovedEvent {
        step: 2,
        method: "method_4".into(),
        class: "Class_3".into(),
        class_removed: true,
    });
    dispatcher.emit_run_completed(&RunCompletedEvent {
        sim: 0,
        steps: 3,
        methods: 1,
        classes: 1,
        code_size: 3,
        duration_ms: 0,
    });

    for handler in [&a, &b] {
        assert_eq!(handler.started.load(Ordering::Relaxed), 1);
        assert_eq!(handler.steps.load(Ordering::Relaxed), 3);
        assert_eq!(handler.removed.load(Ordering::Relaxed), 1);
        assert_eq!(handler.completed.load(Ordering::Relaxed), 1);
    }
}

#[test]
fn test_panicking_handler_is_isolated() {
    struct PanickingHandler;
    impl SimulationEventHandler for PanickingHandler {
        fn on_step_completed(&self, _event: &StepCompletedEvent) {
            panic!("handler failure");
        }
    }

    let counter = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(PanickingHandler));
    dispatcher.register(counter.clone());

    dispatcher.emit_step_completed(&step_event(0));
    assert_eq!(counter.steps.load(Ordering::Relaxed), 1);
}

#[test]
fn test_empty_dispatcher_is_cheap_to_clone() {
    let dispatcher = EventDispatcher::default();
    let cloned = dispatcher.clone();
    assert_eq!(cloned.handler_count(), 0);
    cloned.emit_step_completed(&step_event(0));
}
