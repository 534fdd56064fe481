//! Linear stat-weight scoring

use crate::config::ConfigError;
use crate::estimator::DpsModel;
use crate::stat_block::CombinedStats;
use crate::types::StatKind;
use serde::{Deserialize, Serialize};

/// Value of one point of each stat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatWeights {
    #[serde(default)]
    pub crit: f64,
    #[serde(default)]
    pub direct_hit: f64,
    #[serde(default)]
    pub determination: f64,
    #[serde(default)]
    pub spell_speed: f64,
}

impl StatWeights {
    pub fn get(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::Crit => self.crit,
            StatKind::DirectHit => self.direct_hit,
            StatKind::Determination => self.determination,
            StatKind::SpellSpeed => self.spell_speed,
        }
    }

    /// Equal weight on every stat
    pub fn balanced() -> Self {
        StatWeights {
            crit: 1.0,
            direct_hit: 1.0,
            determination: 1.0,
            spell_speed: 1.0,
        }
    }

    /// Preset weights for a stat priority
    pub fn for_priority(priority: Priority) -> Self {
        match priority {
            Priority::Balanced => StatWeights::balanced(),
            Priority::CritFocus => StatWeights {
                crit: 2.0,
                direct_hit: 1.0,
                determination: 1.0,
                spell_speed: 0.5,
            },
            Priority::SpellSpeedFocus => StatWeights {
                crit: 1.0,
                direct_hit: 0.75,
                determination: 0.75,
                spell_speed: 2.0,
            },
        }
    }
}

/// Named weight presets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    CritFocus,
    SpellSpeedFocus,
    #[default]
    Balanced,
}

impl Priority {
    pub fn name(&self) -> &'static str {
        match self {
            Priority::CritFocus => "Crit Focus",
            Priority::SpellSpeedFocus => "Spell Speed Focus",
            Priority::Balanced => "Balanced",
        }
    }
}

/// Scores stats as `Σ weight × stat`.
///
/// Cheaper than the full formula and useful for ranking gear by priority
/// (crit focus, spell speed focus, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedScore {
    weights: StatWeights,
}

impl WeightedScore {
    /// Weights must be finite and non-negative
    pub fn new(weights: StatWeights) -> Result<Self, ConfigError> {
        for kind in StatKind::all() {
            let weight = weights.get(*kind);
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "weight for {} must be a non-negative number, got {}",
                    kind, weight
                )));
            }
        }
        Ok(WeightedScore { weights })
    }

    pub fn weights(&self) -> &StatWeights {
        &self.weights
    }
}

impl DpsModel for WeightedScore {
    fn name(&self) -> &str {
        "weighted_score"
    }

    fn estimate(&self, stats: &CombinedStats) -> f64 {
        StatKind::all()
            .iter()
            .map(|kind| self.weights.get(*kind) * stats.get(*kind) as f64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_sum() {
        let score = WeightedScore::new(StatWeights {
            crit: 2.0,
            direct_hit: 0.5,
            determination: 1.0,
            spell_speed: 0.0,
        })
        .unwrap();
        let value = score.estimate(&CombinedStats::new(180, 50, 20, 10));
        assert!((value - (360.0 + 25.0 + 20.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_balanced_is_stat_total() {
        let score = WeightedScore::new(StatWeights::balanced()).unwrap();
        let stats = CombinedStats::new(1, 2, 3, 4);
        assert!((score.estimate(&stats) - stats.total() as f64).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_negative_weight() {
        let weights = StatWeights {
            spell_speed: -0.1,
            ..StatWeights::balanced()
        };
        assert!(WeightedScore::new(weights).is_err());
    }

    #[test]
    fn test_priority_presets_favour_their_stat() {
        let crit = StatWeights::for_priority(Priority::CritFocus);
        assert!(crit.crit > crit.spell_speed);
        let speed = StatWeights::for_priority(Priority::SpellSpeedFocus);
        assert!(speed.spell_speed > speed.crit);
        assert_eq!(StatWeights::for_priority(Priority::Balanced), StatWeights::balanced());

        let priority: Priority = serde_json::from_str("\"spell_speed_focus\"").unwrap();
        assert_eq!(priority, Priority::SpellSpeedFocus);
        assert_eq!(priority.name(), "Spell Speed Focus");
    }

    #[test]
    fn test_missing_weights_default_to_zero() {
        let weights: StatWeights = toml::from_str("crit = 1.5").unwrap();
        assert!((weights.crit - 1.5).abs() < f64::EPSILON);
        assert_eq!(weights.spell_speed, 0.0);
    }
}
