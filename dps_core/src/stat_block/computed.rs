//! CombinedStats - base input plus every equipped piece

use crate::types::StatKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregated stats fed into the DPS model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombinedStats {
    pub crit: u32,
    pub direct_hit: u32,
    pub determination: u32,
    pub spell_speed: u32,
}

impl CombinedStats {
    pub fn new(crit: u32, direct_hit: u32, determination: u32, spell_speed: u32) -> Self {
        CombinedStats {
            crit,
            direct_hit,
            determination,
            spell_speed,
        }
    }

    /// Get a single stat
    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Crit => self.crit,
            StatKind::DirectHit => self.direct_hit,
            StatKind::Determination => self.determination,
            StatKind::SpellSpeed => self.spell_speed,
        }
    }

    /// Copy with one stat replaced
    pub fn with(mut self, kind: StatKind, value: u32) -> Self {
        match kind {
            StatKind::Crit => self.crit = value,
            StatKind::DirectHit => self.direct_hit = value,
            StatKind::Determination => self.determination = value,
            StatKind::SpellSpeed => self.spell_speed = value,
        }
        self
    }

    /// Copy with every stat capped at `max`
    pub fn clamped(&self, max: u32) -> Self {
        CombinedStats {
            crit: self.crit.min(max),
            direct_hit: self.direct_hit.min(max),
            determination: self.determination.min(max),
            spell_speed: self.spell_speed.min(max),
        }
    }

    /// Sum of all four stats
    pub fn total(&self) -> u64 {
        StatKind::all().iter().map(|k| self.get(*k) as u64).sum()
    }
}

impl fmt::Display for CombinedStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Crit {} / DH {} / Det {} / SpS {}",
            self.crit, self.direct_hit, self.determination, self.spell_speed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_replaces_single_stat() {
        let stats = CombinedStats::new(1, 2, 3, 4).with(StatKind::DirectHit, 20);
        assert_eq!(stats, CombinedStats::new(1, 20, 3, 4));
    }

    #[test]
    fn test_clamped() {
        let stats = CombinedStats::new(6000, 100, 5000, 5001).clamped(5000);
        assert_eq!(stats, CombinedStats::new(5000, 100, 5000, 5000));
    }

    #[test]
    fn test_total_does_not_overflow() {
        let stats = CombinedStats::new(u32::MAX, u32::MAX, u32::MAX, u32::MAX);
        assert_eq!(stats.total(), 4 * u32::MAX as u64);
    }

    #[test]
    fn test_display() {
        let stats = CombinedStats::new(180, 50, 20, 10);
        assert_eq!(stats.to_string(), "Crit 180 / DH 50 / Det 20 / SpS 10");
    }
}
