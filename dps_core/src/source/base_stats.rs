//! Manually entered base stats as a stat source

use crate::source::StatSource;
use crate::stat_block::{StatAccumulator, StatInput};
use crate::types::StatKind;

impl StatSource for StatInput {
    fn id(&self) -> &str {
        "base_stats"
    }

    fn priority(&self) -> i32 {
        -100 // Base stats apply first
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for kind in StatKind::all() {
            stats.add(*kind, self.get(*kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_stats_apply() {
        let source = StatInput::new(400, 300, 200, 100);
        let mut acc = StatAccumulator::new();
        source.apply(&mut acc);

        assert_eq!(acc.crit, 400);
        assert_eq!(acc.direct_hit, 300);
        assert_eq!(acc.determination, 200);
        assert_eq!(acc.spell_speed, 100);
    }

    #[test]
    fn test_base_stats_priority() {
        let source = StatInput::default();
        assert_eq!(source.priority(), -100);
        assert_eq!(source.id(), "base_stats");
    }
}
