//! Per-step statistics.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::actions::ActionKind;

/// Fitness distribution over all methods at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessSummary {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl FitnessSummary {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                count: 0,
                mean: 0.0,
                std: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }
        Self {
            count: values.len(),
            mean: Statistics::mean(values.iter()),
            std: Statistics::population_std_dev(values.iter()),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// One row of the step log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Simulation index within a batch.
    pub sim: u32,
    pub step: u64,
    /// Lowest fitness after the step.
    pub fmin: f64,
    pub action: ActionKind,
    pub summary: FitnessSummary,
    /// Total line count after the step.
    pub code_size: u64,
    pub change: i64,
}

/// Ordered step records of one simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsLog {
    pub sim: u32,
    pub seed: u64,
    /// Code size before the first step.
    pub initial_code_size: u64,
    records: Vec<StepRecord>,
}

impl StatisticsLog {
    pub fn new(sim: u32, seed: u64, initial_code_size: u64) -> Self {
        Self {
            sim,
            seed,
            initial_code_size,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: StepRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&StepRecord> {
        self.records.last()
    }

    pub fn fmin_series(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.fmin).collect()
    }

    pub fn change_series(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.change).collect()
    }

    pub fn code_size_series(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.code_size).collect()
    }

    /// How often each action was recorded, in `ActionKind::ALL` order.
    pub fn action_counts(&self) -> [(ActionKind, usize); 5] {
        ActionKind::ALL.map(|kind| {
            (kind, self.records.iter().filter(|r| r.action == kind).count())
        })
    }
}
