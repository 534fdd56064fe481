//! Gear data - pieces, the per-slot pool, and the player's selection

mod pool;
mod selection;

pub use pool::GearPool;
pub use selection::GearSelection;

use crate::types::StatKind;
use serde::{Deserialize, Serialize};

/// A single gear record from the gear file
///
/// Keys follow the gear file's PascalCase (`Name`, `Crit`, `DirectHit`, ...);
/// camelCase spellings are accepted too. Missing stats default to 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GearPiece {
    #[serde(alias = "name")]
    pub name: String,
    #[serde(default, alias = "crit")]
    pub crit: u32,
    #[serde(default, alias = "directHit")]
    pub direct_hit: u32,
    #[serde(default, alias = "determination")]
    pub determination: u32,
    #[serde(default, alias = "spellSpeed")]
    pub spell_speed: u32,
}

impl GearPiece {
    pub fn new(name: impl Into<String>, crit: u32, direct_hit: u32, determination: u32, spell_speed: u32) -> Self {
        GearPiece {
            name: name.into(),
            crit,
            direct_hit,
            determination,
            spell_speed,
        }
    }

    /// Get the piece's contribution to one stat
    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Crit => self.crit,
            StatKind::DirectHit => self.direct_hit,
            StatKind::Determination => self.determination,
            StatKind::SpellSpeed => self.spell_speed,
        }
    }

    /// Sum of all four stats, used for best-in-slot ranking
    pub fn stat_total(&self) -> u64 {
        StatKind::all().iter().map(|k| self.get(*k) as u64).sum()
    }
}
