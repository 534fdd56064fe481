//! StatAccumulator - Collects stat contributions before producing CombinedStats

use crate::gear::GearPiece;
use crate::source::StatSource;
use crate::stat_block::{CombinedStats, StatInput};
use crate::types::StatKind;

/// Accumulates stat contributions from various sources
///
/// Additions saturate at `u32::MAX` so a pathological gear file cannot wrap
/// a stat back around to a small value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatAccumulator {
    pub crit: u32,
    pub direct_hit: u32,
    pub determination: u32,
    pub spell_speed: u32,
}

impl StatAccumulator {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        StatAccumulator::default()
    }

    /// Add a contribution to one stat
    pub fn add(&mut self, kind: StatKind, value: u32) {
        let slot = match kind {
            StatKind::Crit => &mut self.crit,
            StatKind::DirectHit => &mut self.direct_hit,
            StatKind::Determination => &mut self.determination,
            StatKind::SpellSpeed => &mut self.spell_speed,
        };
        *slot = slot.saturating_add(value);
    }

    /// Finish accumulation
    pub fn finish(self) -> CombinedStats {
        CombinedStats {
            crit: self.crit,
            direct_hit: self.direct_hit,
            determination: self.determination,
            spell_speed: self.spell_speed,
        }
    }
}

/// Combine base stats with the given gear pieces
pub fn aggregate(input: &StatInput, pieces: &[&GearPiece]) -> CombinedStats {
    let mut acc = StatAccumulator::new();
    input.apply(&mut acc);
    for piece in pieces {
        for kind in StatKind::all() {
            acc.add(*kind, piece.get(*kind));
        }
    }
    acc.finish()
}

/// Apply all sources in priority order and return the totals
pub fn aggregate_sources(sources: &[Box<dyn StatSource>]) -> CombinedStats {
    let mut accumulator = StatAccumulator::new();

    let mut sorted_sources: Vec<_> = sources.iter().collect();
    sorted_sources.sort_by_key(|s| s.priority());

    for source in sorted_sources {
        source.apply(&mut accumulator);
    }

    accumulator.finish()
}
