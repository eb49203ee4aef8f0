//! Step driver: weighted action selection, bounded retry, statistics, events.

use std::time::Instant;

use codevo_core::config::CodevoConfig;
use codevo_core::errors::{SimulationError, SimulationResult};
use codevo_core::events::{
    EventDispatcher, MethodRemovedEvent, RunCompletedEvent, RunStartedEvent, StepCompletedEvent,
};
use rand::distributions::{Distribution, WeightedIndex};

use super::stats::{FitnessSummary, StatisticsLog, StepRecord};
use crate::actions::ActionKind;
use crate::codebase::Codebase;
use crate::model::EvolutionModel;
use crate::seed::SeedSpec;

/// One isolated simulation run.
#[derive(Debug)]
pub struct Simulation {
    model: EvolutionModel,
    selector: WeightedIndex<f64>,
    iterations: u64,
    max_retries: u32,
    sim: u32,
    seed: u64,
    step: u64,
    log: StatisticsLog,
    events: EventDispatcher,
}

impl Simulation {
    /// Build a run from `config`, seeded with `simulation.seed`.
    pub fn new(config: &CodevoConfig, seed_spec: &SeedSpec) -> SimulationResult<Self> {
        Self::seeded(config, seed_spec, config.simulation.effective_seed())
    }

    pub fn seeded(config: &CodevoConfig, seed_spec: &SeedSpec, seed: u64) -> SimulationResult<Self> {
        let selector = WeightedIndex::new(config.actions.effective_weights()).map_err(|e| {
            SimulationError::InvalidWeights {
                message: e.to_string(),
            }
        })?;

        let codebase = Codebase::from_seed(seed_spec)?;
        let mut model = EvolutionModel::new(codebase, &config.model, seed);
        model.initialize_fitness()?;
        let initial_code_size = model.codebase.code_size();

        Ok(Self {
            model,
            selector,
            iterations: config.simulation.effective_iterations(),
            max_retries: config.simulation.effective_max_retries(),
            sim: 0,
            seed,
            step: 0,
            log: StatisticsLog::new(0, seed, initial_code_size),
            events: EventDispatcher::new(),
        })
    }

    /// Index of this run within a batch.
    pub fn with_sim_index(mut self, sim: u32) -> Self {
        self.sim = sim;
        self.log.sim = sim;
        self
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn codebase(&self) -> &Codebase {
        &self.model.codebase
    }

    pub fn model(&self) -> &EvolutionModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut EvolutionModel {
        &mut self.model
    }

    pub fn log(&self) -> &StatisticsLog {
        &self.log
    }

    /// Steps completed so far.
    pub fn current_step(&self) -> u64 {
        self.step
    }

    pub fn into_parts(self) -> (Codebase, StatisticsLog) {
        (self.model.codebase, self.log)
    }

    /// Apply randomly selected actions until one changes the codebase.
    pub fn step(&mut self) -> SimulationResult<&StepRecord> {
        for attempt in 1..=self.max_retries {
            let action = ActionKind::ALL[self.selector.sample(&mut self.model.rng)];
            let change = action.apply(&mut self.model)?;
            self.flush_removals();
            if change == 0 {
                continue;
            }

            let graph = self.model.codebase.graph();
            let fitnesses = graph.fitnesses();
            let summary = FitnessSummary::from_values(&fitnesses);
            let record = StepRecord {
                sim: self.sim,
                step: self.step,
                fmin: summary.min,
                action,
                summary,
                code_size: graph.total_lines(),
                change,
            };

            self.events.emit_step_completed(&StepCompletedEvent {
                sim: self.sim,
                step: self.step,
                action: action.name(),
                change,
                attempts: attempt,
                fmin: record.fmin,
                code_size: record.code_size,
            });
            tracing::debug!(
                step = self.step,
                action = action.name(),
                change,
                attempts = attempt,
                "step completed"
            );

            self.log.push(record);
            self.step += 1;
            return Ok(&self.log.records()[self.log.len() - 1]);
        }

        tracing::warn!(
            sim = self.sim,
            step = self.step,
            attempts = self.max_retries,
            "simulation stalled"
        );
        Err(SimulationError::Stalled {
            step: self.step,
            attempts: self.max_retries,
        })
    }

    /// Run the configured number of steps.
    pub fn run(&mut self) -> SimulationResult<&StatisticsLog> {
        let start = Instant::now();
        self.events.emit_run_started(&RunStartedEvent {
            sim: self.sim,
            seed: self.seed,
            iterations: self.iterations,
            methods: self.model.codebase.method_count(),
            classes: self.model.codebase.class_count(),
        });
        tracing::info!(sim = self.sim, seed = self.seed, iterations = self.iterations, "run started");

        while self.step < self.iterations {
            self.step()?;
        }

        let codebase = &self.model.codebase;
        let duration_ms = start.elapsed().as_millis() as u64;
        self.events.emit_run_completed(&RunCompletedEvent {
            sim: self.sim,
            steps: self.step,
            methods: codebase.method_count(),
            classes: codebase.class_count(),
            code_size: codebase.code_size(),
            duration_ms,
        });
        tracing::info!(
            sim = self.sim,
            steps = self.step,
            methods = codebase.method_count(),
            classes = codebase.class_count(),
            code_size = codebase.code_size(),
            duration_ms,
            "run completed"
        );

        Ok(&self.log)
    }

    fn flush_removals(&mut self) {
        for removed in self.model.drain_removed() {
            self.events.emit_method_removed(&MethodRemovedEvent {
                step: self.step,
                method: removed.name,
                class: removed.class,
                class_removed: removed.class_removed,
            });
        }
    }
}
