//! Scoring model selection

use crate::estimator::{Priority, StatWeights, WeightedScore};
use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Which `DpsModel` the estimator runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    #[default]
    CasterFormula,
    WeightedScore,
}

/// The `[model]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub kind: ModelKind,
    /// Weight preset for `weighted_score`
    #[serde(default)]
    pub priority: Priority,
    /// Explicit weights, taking precedence over `priority`
    #[serde(default)]
    pub weights: Option<StatWeights>,
}

impl ModelConfig {
    /// Weights the weighted model scores with
    pub fn weights(&self) -> StatWeights {
        self.weights
            .unwrap_or_else(|| StatWeights::for_priority(self.priority))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.kind == ModelKind::WeightedScore {
            WeightedScore::new(self.weights())?;
        }
        Ok(())
    }
}
