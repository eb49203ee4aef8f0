//! Configuration system for codevo.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod action_config;
pub mod codevo_config;
pub mod export_config;
pub mod model_config;
pub mod simulation_config;

pub use action_config::ActionConfig;
pub use codevo_config::{CodevoConfig, ConfigOverrides};
pub use export_config::{ExportConfig, LogFormat};
pub use model_config::{
    ExperimentCondition, FitnessMethod, ModelConfig, PrefAttachment, SamplerShape,
};
pub use simulation_config::SimulationConfig;
