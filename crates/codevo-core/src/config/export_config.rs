//! Export configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_COMMIT_THRESHOLD;
use crate::errors::ConfigError;

/// Step-log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" | "jsonl" => Ok(Self::Json),
            other => Err(ConfigError::InvalidValue {
                field: "export.format".to_string(),
                message: format!("unknown log format '{other}'"),
            }),
        }
    }
}

/// Configuration for the output surface.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory receiving step logs and renderings. Default: `output`.
    pub output_dir: Option<String>,
    /// Step-log format. Default: csv.
    pub format: Option<LogFormat>,
    /// Minimum fitness that closes a commit in commit analysis. Default: 0.1.
    pub commit_threshold: Option<f64>,
    /// Render Java sources for the final codebase. Default: false.
    pub write_sources: Option<bool>,
}

impl ExportConfig {
    pub fn effective_output_dir(&self) -> &str {
        self.output_dir.as_deref().unwrap_or("output")
    }

    pub fn effective_format(&self) -> LogFormat {
        self.format.unwrap_or_default()
    }

    pub fn effective_commit_threshold(&self) -> f64 {
        self.commit_threshold.unwrap_or(DEFAULT_COMMIT_THRESHOLD)
    }

    pub fn effective_write_sources(&self) -> bool {
        self.write_sources.unwrap_or(false)
    }
}
