//! Edit actions applied to the codebase.
//!
//! Every action returns a signed change magnitude: growth positive,
//! shrinkage negative, 0 for a no-op the driver retries.

pub mod batch;
pub mod call;
pub mod create;
pub mod remove;
pub mod update;

use codevo_core::errors::SimulationResult;
use serde::{Deserialize, Serialize};

use crate::model::EvolutionModel;

/// The five mutually exclusive actions, in action-weight order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CreateMethod,
    CallMethod,
    UpdateMethod,
    RemoveMethod,
    BatchChange,
}

impl ActionKind {
    /// Same order as `ActionConfig::effective_weights`.
    pub const ALL: [ActionKind; 5] = [
        Self::CreateMethod,
        Self::CallMethod,
        Self::UpdateMethod,
        Self::RemoveMethod,
        Self::BatchChange,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateMethod => "create_method",
            Self::CallMethod => "call_method",
            Self::UpdateMethod => "update_method",
            Self::RemoveMethod => "remove_method",
            Self::BatchChange => "batch_change",
        }
    }

    pub fn apply(&self, model: &mut EvolutionModel) -> SimulationResult<i64> {
        match self {
            Self::CreateMethod => create::create_method(model),
            Self::CallMethod => call::call_method(model),
            Self::UpdateMethod => update::update_method(model),
            Self::RemoveMethod => remove::remove_method(model),
            Self::BatchChange => batch::batch_change(model),
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codevo_core::config::ActionConfig;

    #[test]
    fn test_all_matches_weight_field_order() {
        for (kind, field) in ActionKind::ALL.iter().zip(ActionConfig::FIELD_NAMES) {
            assert!(field.ends_with(kind.name()), "{field} vs {kind}");
        }
    }
}
