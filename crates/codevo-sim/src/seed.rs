//! Initial codebase description.
//!
//! ```toml
//! [[classes]]
//! name = "App"
//! methods = ["main"]
//! ```

use std::path::Path;

use codevo_core::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// A class in the seed codebase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedClass {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    pub methods: Vec<String>,
}

/// The codebase a simulation starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedSpec {
    #[serde(default)]
    pub classes: Vec<SeedClass>,
}

impl Default for SeedSpec {
    /// One class `App` holding one empty method `main`.
    fn default() -> Self {
        Self {
            classes: vec![SeedClass {
                name: "App".to_string(),
                parent: None,
                methods: vec!["main".to_string()],
            }],
        }
    }
}

impl SeedSpec {
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn method_count(&self) -> usize {
        self.classes.iter().map(|c| c.methods.len()).sum()
    }
}
