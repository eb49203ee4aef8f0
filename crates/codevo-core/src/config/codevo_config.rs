//! Top-level codevo configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    ActionConfig, ExperimentCondition, ExportConfig, FitnessMethod, ModelConfig,
    SimulationConfig,
};
use crate::constants::WEIGHT_SUM_TOLERANCE;
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "codevo.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (`ConfigOverrides`)
/// 2. Environment variables (`CODEVO_*`)
/// 3. Project config (`codevo.toml` in project root)
/// 4. User config (`~/.codevo/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CodevoConfig {
    pub simulation: SimulationConfig,
    pub actions: ActionConfig,
    pub model: ModelConfig,
    pub export: ExportConfig,
}

/// Highest-priority overrides, typically filled by an embedding tool.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub iterations: Option<u64>,
    pub seed: Option<u64>,
    pub simulations: Option<u32>,
    pub fitness_method: Option<FitnessMethod>,
    pub experiment_condition: Option<ExperimentCondition>,
}

impl CodevoConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(
        root: &Path,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Only parse errors are fatal here.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(err @ ConfigError::ParseError { .. }) => return Err(err),
                    Err(err) => {
                        ::tracing::warn!(error = %err, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string. No layering, no validation.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &CodevoConfig) -> Result<(), ConfigError> {
        let weights = config.actions.effective_weights();
        for (weight, field) in weights.iter().zip(ActionConfig::FIELD_NAMES) {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be a non-negative number".to_string(),
                });
            }
        }
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::ValidationFailed {
                field: "actions".to_string(),
                message: format!("weights must sum to 1.0, got {total}"),
            });
        }

        let model = &config.model;
        for (field, value) in [
            ("model.add_statement", model.add_statement),
            ("model.create_class", model.create_class),
            ("model.no_inherit", model.no_inherit),
            ("model.centrality_noise", model.centrality_noise),
            ("export.commit_threshold", config.export.commit_threshold),
        ] {
            if let Some(p) = value {
                if !(0.0..=1.0).contains(&p) {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be between 0.0 and 1.0".to_string(),
                    });
                }
            }
        }
        if let Some(damping) = model.damping {
            if !(damping > 0.0 && damping < 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "model.damping".to_string(),
                    message: "must be strictly between 0.0 and 1.0".to_string(),
                });
            }
        }
        for (field, value) in [
            ("model.exponential_rate", model.exponential_rate),
            ("model.normal_sigma", model.normal_sigma),
        ] {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be greater than 0".to_string(),
                    });
                }
            }
        }
        if model.centrality_iterations == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "model.centrality_iterations".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.simulation.max_retries == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "simulation.max_retries".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.simulation.simulations == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "simulation.simulations".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.codevo/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".codevo").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut CodevoConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: CodevoConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut CodevoConfig, other: &CodevoConfig) {
        macro_rules! take {
            ($($section:ident . $field:ident),* $(,)?) => {
                $(
                    if other.$section.$field.is_some() {
                        base.$section.$field = other.$section.$field.clone();
                    }
                )*
            };
        }

        take!(
            simulation.iterations,
            simulation.seed,
            simulation.simulations,
            simulation.max_retries,
            actions.create_method,
            actions.call_method,
            actions.update_method,
            actions.remove_method,
            actions.batch_change,
            model.fitness_method,
            model.sampler,
            model.exponential_rate,
            model.normal_sigma,
            model.add_statement,
            model.create_class,
            model.no_inherit,
            model.pref_attachment,
            model.experiment_condition,
            model.damping,
            model.centrality_iterations,
            model.centrality_noise,
            export.output_dir,
            export.format,
            export.commit_threshold,
            export.write_sources,
        );
    }

    /// Apply environment variable overrides.
    /// Pattern: `CODEVO_ITERATIONS`, `CODEVO_FITNESS_METHOD`, etc.
    /// Numeric values that fail to parse are ignored; unknown enum names are errors.
    fn apply_env_overrides(config: &mut CodevoConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_parse::<u64>("CODEVO_ITERATIONS") {
            config.simulation.iterations = Some(v);
        }
        if let Some(v) = env_parse::<u64>("CODEVO_SEED") {
            config.simulation.seed = Some(v);
        }
        if let Some(v) = env_parse::<u32>("CODEVO_SIMULATIONS") {
            config.simulation.simulations = Some(v);
        }
        if let Some(v) = env_parse::<u32>("CODEVO_MAX_RETRIES") {
            config.simulation.max_retries = Some(v);
        }
        if let Some(v) = env_parse::<f64>("CODEVO_ADD_STATEMENT") {
            config.model.add_statement = Some(v);
        }
        if let Ok(val) = std::env::var("CODEVO_FITNESS_METHOD") {
            config.model.fitness_method = Some(val.parse()?);
        }
        if let Ok(val) = std::env::var("CODEVO_SAMPLER") {
            config.model.sampler = Some(val.parse()?);
        }
        if let Ok(val) = std::env::var("CODEVO_PREF_ATTACHMENT") {
            config.model.pref_attachment = Some(val.parse()?);
        }
        if let Ok(val) = std::env::var("CODEVO_EXPERIMENT_CONDITION") {
            config.model.experiment_condition = Some(val.parse()?);
        }
        if let Ok(val) = std::env::var("CODEVO_OUTPUT_DIR") {
            config.export.output_dir = Some(val);
        }
        Ok(())
    }

    /// Apply programmatic overrides (highest priority).
    fn apply_overrides(config: &mut CodevoConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.iterations {
            config.simulation.iterations = Some(v);
        }
        if let Some(v) = overrides.seed {
            config.simulation.seed = Some(v);
        }
        if let Some(v) = overrides.simulations {
            config.simulation.simulations = Some(v);
        }
        if let Some(v) = overrides.fitness_method {
            config.model.fitness_method = Some(v);
        }
        if let Some(v) = overrides.experiment_condition {
            config.model.experiment_condition = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
