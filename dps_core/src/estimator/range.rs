//! Supported stat range and what to do outside it

use crate::error::SimError;
use crate::stat_block::CombinedStats;
use crate::types::StatKind;
use serde::{Deserialize, Serialize};

/// What to do with a stat above the supported maximum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeMode {
    /// Treat it as the maximum
    #[default]
    Clamp,
    /// Refuse to estimate
    Reject,
}

/// Supported input range of the DPS model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangePolicy {
    /// Highest supported value of any single stat
    #[serde(default = "default_max_stat")]
    pub max_stat: u32,
    #[serde(default)]
    pub mode: RangeMode,
}

impl Default for RangePolicy {
    fn default() -> Self {
        RangePolicy {
            max_stat: default_max_stat(),
            mode: RangeMode::Clamp,
        }
    }
}

fn default_max_stat() -> u32 {
    5000
}

impl RangePolicy {
    pub fn clamp(max_stat: u32) -> Self {
        RangePolicy {
            max_stat,
            mode: RangeMode::Clamp,
        }
    }

    pub fn reject(max_stat: u32) -> Self {
        RangePolicy {
            max_stat,
            mode: RangeMode::Reject,
        }
    }

    /// Bring stats into range, or report the first stat that is out of it
    pub fn apply(&self, stats: &CombinedStats) -> Result<CombinedStats, SimError> {
        match self.mode {
            RangeMode::Clamp => Ok(stats.clamped(self.max_stat)),
            RangeMode::Reject => {
                for kind in StatKind::all() {
                    let value = stats.get(*kind);
                    if value > self.max_stat {
                        return Err(SimError::StatOutOfRange {
                            stat: *kind,
                            value,
                            max: self.max_stat,
                        });
                    }
                }
                Ok(*stats)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_caps_each_stat() {
        let policy = RangePolicy::clamp(5000);
        let stats = CombinedStats::new(9000, 10, 5000, 5001);
        assert_eq!(policy.apply(&stats).unwrap(), CombinedStats::new(5000, 10, 5000, 5000));
    }

    #[test]
    fn test_reject_reports_stat() {
        let policy = RangePolicy::reject(5000);
        let err = policy.apply(&CombinedStats::new(0, 7000, 0, 0)).unwrap_err();
        match err {
            SimError::StatOutOfRange { stat, value, max } => {
                assert_eq!(stat, StatKind::DirectHit);
                assert_eq!(value, 7000);
                assert_eq!(max, 5000);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_reject_accepts_boundary() {
        let policy = RangePolicy::reject(5000);
        let stats = CombinedStats::new(5000, 5000, 5000, 5000);
        assert_eq!(policy.apply(&stats).unwrap(), stats);
    }

    #[test]
    fn test_mode_parses_snake_case() {
        let policy: RangePolicy = toml::from_str("mode = \"reject\"").unwrap();
        assert_eq!(policy, RangePolicy::reject(5000));
    }
}
