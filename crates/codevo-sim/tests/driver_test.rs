//! Step driver, batch runner and event emission.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use codevo_core::config::{CodevoConfig, FitnessMethod};
use codevo_core::errors::SimulationError;
use codevo_core::events::{
    EventDispatcher, MethodRemovedEvent, RunCompletedEvent, RunStartedEvent,
    SimulationEventHandler, StepCompletedEvent,
};
use codevo_sim::{run_batch, ActionKind, SeedSpec, Simulation};

fn config(toml: &str) -> CodevoConfig {
    let config = CodevoConfig::from_toml(toml).unwrap();
    CodevoConfig::validate(&config).unwrap();
    config
}

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

    fn on_step_completed(&self, event: &StepCompletedEvent) {
        assert_ne!(event.change, 0);
        assert!(event.attempts >= 1);
        self.steps.fetch_add(1, Ordering::Relaxed);
    }

    fn on_method_removed(&self, _event: &MethodRemovedEvent) {
        self.removed.fetch_add(1, Ordering::Relaxed);
    }

    fn on_run_completed(&self, _event: &RunCompletedEvent) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }
}

#[test]
fn test_run_records_every_step() {
    let cfg = config("[simulation]\niterations = 400\nseed = 3\n");
    let mut sim = Simulation::new(&cfg, &SeedSpec::default()).unwrap();
    sim.run().unwrap();
    let log = sim.log();

    assert_eq!(log.len(), 400);
    for (i, record) in log.records().iter().enumerate() {
        assert_eq!(record.step, i as u64);
        assert_ne!(record.change, 0);
        assert_eq!(record.fmin, record.summary.min);
        assert!(record.summary.min <= record.summary.mean + 1e-12);
        assert!(record.summary.mean <= record.summary.max + 1e-12);
    }
    let last = log.last().unwrap();
    assert_eq!(last.code_size, sim.codebase().code_size());
    assert_eq!(last.summary.count, sim.codebase().method_count());
    sim.codebase().validate().unwrap();
}

#[test]
fn test_step_returns_the_logged_record() {
    let cfg = config("[simulation]\niterations = 50\nseed = 8\n");
    let mut sim = Simulation::new(&cfg, &SeedSpec::default()).unwrap();
    for i in 0..25u64 {
        let record = sim.step().unwrap().clone();
        assert_eq!(record.step, i);
        assert_eq!(sim.log().len() as u64, i + 1);
        assert_eq!(sim.log().last(), Some(&record));
        assert_eq!(record.code_size, sim.codebase().code_size());
    }
}

// Same seed, same configuration: identical step logs.
#[test]
fn test_same_seed_same_log() {
    for method in ["uniform", "centrality"] {
        let cfg = config(&format!(
            "[simulation]\niterations = 300\nseed = 77\n\n[model]\nfitness_method = \"{method}\"\n"
        ));
        let mut first = Simulation::new(&cfg, &SeedSpec::default()).unwrap();
        let mut second = Simulation::new(&cfg, &SeedSpec::default()).unwrap();
        first.run().unwrap();
        second.run().unwrap();
        assert_eq!(first.log(), second.log(), "{method}");
    }
}

#[test]
fn test_different_seeds_diverge() {
    let cfg = config("[simulation]\niterations = 200\n");
    let mut a = Simulation::seeded(&cfg, &SeedSpec::default(), 1).unwrap();
    let mut b = Simulation::seeded(&cfg, &SeedSpec::default(), 2).unwrap();
    a.run().unwrap();
    b.run().unwrap();
    assert_ne!(a.log().records(), b.log().records());
}

// Only update is active and it can only delete: every attempt is a no-op.
#[test]
fn test_only_noop_actions_stall() {
    let cfg = config(
        r#"
[simulation]
max_retries = 50

[actions]
create_method = 0.0
call_method = 0.0
update_method = 1.0
remove_method = 0.0

[model]
add_statement = 0.0
"#,
    );
    let mut sim = Simulation::new(&cfg, &SeedSpec::default()).unwrap();
    let err = sim.step().unwrap_err();
    assert!(matches!(
        err,
        SimulationError::Stalled {
            step: 0,
            attempts: 50
        }
    ));
    assert!(sim.log().is_empty());
}

#[test]
fn test_all_zero_weights_rejected() {
    let mut cfg = CodevoConfig::default();
    cfg.actions.create_method = Some(0.0);
    cfg.actions.call_method = Some(0.0);
    cfg.actions.update_method = Some(0.0);
    cfg.actions.remove_method = Some(0.0);
    let err = Simulation::new(&cfg, &SeedSpec::default()).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidWeights { .. }));
}

#[test]
fn test_batch_change_always_reports_one() {
    let cfg = config(
        r#"
[simulation]
iterations = 100

[actions]
create_method = 0.5
call_method = 0.0
update_method = 0.0
remove_method = 0.0
batch_change = 0.5
"#,
    );
    let mut sim = Simulation::new(&cfg, &SeedSpec::default()).unwrap();
    let log = sim.run().unwrap();
    for record in log.records() {
        match record.action {
            ActionKind::BatchChange => assert_eq!(record.change, 1),
            ActionKind::CreateMethod => assert!(record.change == 1 || record.change == 2),
            other => panic!("unexpected action {other}"),
        }
    }
    sim.codebase().validate().unwrap();
}

#[test]
fn test_events_follow_the_run() {
    let cfg = config(
        r#"
[simulation]
iterations = 500
seed = 5

[actions]
create_method = 0.3
call_method = 0.3
update_method = 0.2
remove_method = 0.2
"#,
    );
    let handler = Arc::new(CountingHandler::default());
    let mut events = EventDispatcher::new();
    events.register(handler.clone());

    let mut sim = Simulation::new(&cfg, &SeedSpec::default())
        .unwrap()
        .with_events(events);
    sim.run().unwrap();

    assert_eq!(handler.started.load(Ordering::Relaxed), 1);
    assert_eq!(handler.steps.load(Ordering::Relaxed), 500);
    assert_eq!(handler.completed.load(Ordering::Relaxed), 1);

    let removals = sim
        .log()
        .records()
        .iter()
        .filter(|r| r.action == ActionKind::RemoveMethod)
        .count();
    assert!(handler.removed.load(Ordering::Relaxed) >= removals);
}

#[test]
fn test_batch_uses_consecutive_seeds() {
    let cfg = config("[simulation]\niterations = 150\nseed = 10\nsimulations = 3\n");
    let runs = run_batch(&cfg, &SeedSpec::default(), &EventDispatcher::new()).unwrap();
    assert_eq!(runs.len(), 3);
    for (i, run) in runs.iter().enumerate() {
        assert_eq!(run.log.sim, i as u32);
        assert_eq!(run.log.seed, 10 + i as u64);
        assert_eq!(run.log.len(), 150);
        assert!(run.log.records().iter().all(|r| r.sim == i as u32));
        run.codebase.validate().unwrap();
    }

    let mut alone = Simulation::seeded(&cfg, &SeedSpec::default(), 11).unwrap();
    alone.run().unwrap();
    let expected: Vec<i64> = alone.log().change_series();
    assert_eq!(runs[1].log.change_series(), expected);
}

#[test]
fn test_centrality_run_keeps_invariants() {
    let cfg = config(
        r#"
[simulation]
iterations = 300
seed = 8

[model]
fitness_method = "centrality"
sampler = "truncated_normal"
pref_attachment = "none"
"#,
    );
    assert_eq!(
        cfg.model.effective_fitness_method(),
        FitnessMethod::Centrality
    );
    let mut sim = Simulation::new(&cfg, &SeedSpec::default()).unwrap();
    for _ in 0..300 {
        sim.step().unwrap();
        sim.codebase().validate().unwrap();
    }
}
