//! # codevo-sim
//!
//! Stochastic simulation of software repository evolution. A synthetic
//! Java-like codebase (classes, methods, calls) is grown and shrunk by
//! weighted random edit actions, with a fitness model steering edits
//! toward "unfit" methods.

pub mod actions;
pub mod analysis;
pub mod codebase;
pub mod engine;
pub mod export;
pub mod fitness;
pub mod graph;
pub mod model;
pub mod random;
pub mod sampler;
pub mod seed;

pub use actions::ActionKind;
pub use codebase::{Codebase, RemovedMethod};
pub use engine::{run_batch, BatchRun, Simulation, StatisticsLog, StepRecord};
pub use model::EvolutionModel;
pub use seed::SeedSpec;
