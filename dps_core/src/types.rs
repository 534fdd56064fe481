//! Core types shared across the estimator

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four secondary stat axes that feed the DPS formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Crit,
    DirectHit,
    Determination,
    SpellSpeed,
}

impl StatKind {
    /// Get all stat kinds in display order
    pub fn all() -> &'static [StatKind] {
        &[
            StatKind::Crit,
            StatKind::DirectHit,
            StatKind::Determination,
            StatKind::SpellSpeed,
        ]
    }

    /// Human readable label
    pub fn name(&self) -> &'static str {
        match self {
            StatKind::Crit => "Critical Hit",
            StatKind::DirectHit => "Direct Hit",
            StatKind::Determination => "Determination",
            StatKind::SpellSpeed => "Spell Speed",
        }
    }

    /// Short label used in compact views and log lines
    pub fn short_name(&self) -> &'static str {
        match self {
            StatKind::Crit => "Crit",
            StatKind::DirectHit => "DH",
            StatKind::Determination => "Det",
            StatKind::SpellSpeed => "SpS",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Default equipment slots required for a simulation
pub const DEFAULT_REQUIRED_SLOTS: [&str; 2] = ["Head", "Body"];
