//! GearSource - Stats from an equipped piece

use crate::gear::GearPiece;
use crate::source::StatSource;
use crate::stat_block::StatAccumulator;
use crate::types::StatKind;

/// Stats from a gear piece equipped in a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GearSource {
    /// Which slot this piece is in
    pub slot: String,
    /// The equipped piece
    pub piece: GearPiece,
}

impl GearSource {
    /// Create a new gear source
    pub fn new(slot: impl Into<String>, piece: GearPiece) -> Self {
        GearSource {
            slot: slot.into(),
            piece,
        }
    }
}

impl StatSource for GearSource {
    fn id(&self) -> &str {
        &self.piece.name
    }

    fn priority(&self) -> i32 {
        0 // Gear applies at default priority
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        for kind in StatKind::all() {
            stats.add(*kind, self.piece.get(*kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gear_source_id() {
        let source = GearSource::new("Head", GearPiece::new("Augmented Hood", 1, 2, 3, 4));
        assert_eq!(source.id(), "Augmented Hood");
        assert_eq!(source.priority(), 0);
    }

    #[test]
    fn test_gear_source_adds_on_top() {
        let source = GearSource::new("Body", GearPiece::new("Robe", 80, 0, 5, 0));
        let mut acc = StatAccumulator::new();
        acc.add(StatKind::Crit, 20);
        source.apply(&mut acc);

        assert_eq!(acc.crit, 100);
        assert_eq!(acc.determination, 5);
        assert_eq!(acc.direct_hit, 0);
    }
}
