//! Model configuration: fitness, sampling, attachment and experiment condition.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CENTRALITY_ITERATIONS, DEFAULT_CENTRALITY_NOISE, DEFAULT_DAMPING,
    DEFAULT_EXPONENTIAL_RATE, DEFAULT_NORMAL_SIGMA, DEFAULT_P_ADD_STATEMENT,
    DEFAULT_P_CREATE_CLASS, DEFAULT_P_NO_INHERIT,
};
use crate::errors::ConfigError;

fn invalid(field: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: format!("unrecognized value '{value}'"),
    }
}

/// How a method's fitness is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessMethod {
    /// Fresh U[0,1) draw per assignment.
    #[default]
    Uniform,
    /// PageRank centrality with line-share dependent noise.
    Centrality,
}

impl FitnessMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Centrality => "centrality",
        }
    }
}

impl FromStr for FitnessMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" | "0" => Ok(Self::Uniform),
            "centrality" | "pagerank" | "1" => Ok(Self::Centrality),
            other => Err(invalid("model.fitness_method", other)),
        }
    }
}

/// Shape of the low-fitness bias used when picking an unfit method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplerShape {
    /// Always the lowest-fitness method.
    Minimum,
    /// Exponential decay over normalized fitness rank.
    #[default]
    Exponential,
    /// Half-normal over normalized fitness rank, truncated to [0,1).
    TruncatedNormal,
}

impl FromStr for SamplerShape {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimum" | "min" => Ok(Self::Minimum),
            "exponential" | "exp" => Ok(Self::Exponential),
            "truncated_normal" | "normal" => Ok(Self::TruncatedNormal),
            other => Err(invalid("model.sampler", other)),
        }
    }
}

/// Which call endpoints are chosen by preferential attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefAttachment {
    /// Caller weighted by size, callee by in-degree.
    #[default]
    Both,
    CallerOnly,
    CalleeOnly,
    /// Both endpoints uniform.
    None,
}

impl PrefAttachment {
    pub fn weights_caller(&self) -> bool {
        matches!(self, Self::Both | Self::CallerOnly)
    }

    pub fn weights_callee(&self) -> bool {
        matches!(self, Self::Both | Self::CalleeOnly)
    }
}

impl FromStr for PrefAttachment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "both" | "0" => Ok(Self::Both),
            "caller_only" | "caller" | "1" => Ok(Self::CallerOnly),
            "callee_only" | "callee" | "2" => Ok(Self::CalleeOnly),
            "none" | "3" => Ok(Self::None),
            other => Err(invalid("model.pref_attachment", other)),
        }
    }
}

/// Experiment condition gating self-calls and duplicate calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentCondition {
    /// Self-calls and duplicate calls permitted.
    Reproduce,
    /// Self-calls and duplicate calls rejected; the callee is resampled.
    #[default]
    Strict,
}

impl ExperimentCondition {
    pub fn allows_repeat_calls(&self) -> bool {
        matches!(self, Self::Reproduce)
    }
}

impl FromStr for ExperimentCondition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reproduce" => Ok(Self::Reproduce),
            "strict" => Ok(Self::Strict),
            other => Err(invalid("model.experiment_condition", other)),
        }
    }
}

/// Configuration for the evolution model.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ModelConfig {
    /// Default: uniform.
    pub fitness_method: Option<FitnessMethod>,
    /// Default: exponential.
    pub sampler: Option<SamplerShape>,
    /// Exponential sampler decay rate. Default: 10.0.
    pub exponential_rate: Option<f64>,
    /// Truncated-normal sampler sigma. Default: 0.1.
    pub normal_sigma: Option<f64>,
    /// Probability that update-method adds a statement. Default: 0.5.
    pub add_statement: Option<f64>,
    /// Probability that create-method also creates a class. Default: 0.1.
    pub create_class: Option<f64>,
    /// Probability that a new class has no parent. Default: 0.2.
    pub no_inherit: Option<f64>,
    /// Default: both.
    pub pref_attachment: Option<PrefAttachment>,
    /// Default: strict.
    pub experiment_condition: Option<ExperimentCondition>,
    /// PageRank damping. Default: 0.9.
    pub damping: Option<f64>,
    /// PageRank iteration bound. Default: 100.
    pub centrality_iterations: Option<u32>,
    /// Noise half-width for a method with no lines. Default: 0.2.
    pub centrality_noise: Option<f64>,
}

impl ModelConfig {
    pub fn effective_fitness_method(&self) -> FitnessMethod {
        self.fitness_method.unwrap_or_default()
    }

    pub fn effective_sampler(&self) -> SamplerShape {
        self.sampler.unwrap_or_default()
    }

    pub fn effective_exponential_rate(&self) -> f64 {
        self.exponential_rate.unwrap_or(DEFAULT_EXPONENTIAL_RATE)
    }

    pub fn effective_normal_sigma(&self) -> f64 {
        self.normal_sigma.unwrap_or(DEFAULT_NORMAL_SIGMA)
    }

    pub fn effective_add_statement(&self) -> f64 {
        self.add_statement.unwrap_or(DEFAULT_P_ADD_STATEMENT)
    }

    pub fn effective_create_class(&self) -> f64 {
        self.create_class.unwrap_or(DEFAULT_P_CREATE_CLASS)
    }

    pub fn effective_no_inherit(&self) -> f64 {
        self.no_inherit.unwrap_or(DEFAULT_P_NO_INHERIT)
    }

    pub fn effective_pref_attachment(&self) -> PrefAttachment {
        self.pref_attachment.unwrap_or_default()
    }

    pub fn effective_experiment_condition(&self) -> ExperimentCondition {
        self.experiment_condition.unwrap_or_default()
    }

    pub fn effective_damping(&self) -> f64 {
        self.damping.unwrap_or(DEFAULT_DAMPING)
    }

    pub fn effective_centrality_iterations(&self) -> u32 {
        self.centrality_iterations.unwrap_or(DEFAULT_CENTRALITY_ITERATIONS)
    }

    pub fn effective_centrality_noise(&self) -> f64 {
        self.centrality_noise.unwrap_or(DEFAULT_CENTRALITY_NOISE)
    }
}
