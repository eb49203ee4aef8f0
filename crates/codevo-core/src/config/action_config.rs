//! Action weight configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_P_BATCH_CHANGE, DEFAULT_P_CALL_METHOD, DEFAULT_P_CREATE_METHOD,
    DEFAULT_P_REMOVE_METHOD, DEFAULT_P_UPDATE_METHOD,
};

/// Per-action selection weights. A zero weight takes the action out of the active set.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ActionConfig {
    /// Default: 0.10.
    pub create_method: Option<f64>,
    /// Default: 0.40.
    pub call_method: Option<f64>,
    /// Default: 0.45.
    pub update_method: Option<f64>,
    /// Default: 0.05.
    pub remove_method: Option<f64>,
    /// Default: 0.0 (inactive).
    pub batch_change: Option<f64>,
}

impl ActionConfig {
    /// Effective weights in action order: create, call, update, remove, batch.
    pub fn effective_weights(&self) -> [f64; 5] {
        [
            self.create_method.unwrap_or(DEFAULT_P_CREATE_METHOD),
            self.call_method.unwrap_or(DEFAULT_P_CALL_METHOD),
            self.update_method.unwrap_or(DEFAULT_P_UPDATE_METHOD),
            self.remove_method.unwrap_or(DEFAULT_P_REMOVE_METHOD),
            self.batch_change.unwrap_or(DEFAULT_P_BATCH_CHANGE),
        ]
    }

    /// Field names matching `effective_weights` order, for error reporting.
    pub const FIELD_NAMES: [&'static str; 5] = [
        "actions.create_method",
        "actions.call_method",
        "actions.update_method",
        "actions.remove_method",
        "actions.batch_change",
    ];
}
