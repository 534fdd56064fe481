//! Stat blocks - base input, raw text entry, and aggregated totals

mod aggregator;
mod computed;

pub use aggregator::{aggregate, aggregate_sources, StatAccumulator};
pub use computed::CombinedStats;

use crate::error::SimError;
use crate::types::StatKind;
use serde::{Deserialize, Serialize};

/// Manually entered base stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatInput {
    pub crit: u32,
    pub direct_hit: u32,
    pub determination: u32,
    pub spell_speed: u32,
}

impl StatInput {
    pub fn new(crit: u32, direct_hit: u32, determination: u32, spell_speed: u32) -> Self {
        StatInput {
            crit,
            direct_hit,
            determination,
            spell_speed,
        }
    }

    /// Parse the four stats from raw text.
    ///
    /// Surrounding whitespace is ignored and blank text counts as zero.
    /// Anything else that is not a non-negative integer is rejected.
    pub fn parse(crit: &str, direct_hit: &str, determination: &str, spell_speed: &str) -> Result<Self, SimError> {
        Ok(StatInput {
            crit: parse_stat(StatKind::Crit, crit)?,
            direct_hit: parse_stat(StatKind::DirectHit, direct_hit)?,
            determination: parse_stat(StatKind::Determination, determination)?,
            spell_speed: parse_stat(StatKind::SpellSpeed, spell_speed)?,
        })
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
}

fn parse_stat(kind: StatKind, text: &str) -> Result<u32, SimError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<u32>().map_err(|_| SimError::InvalidInput {
        stat: kind,
        value: text.to_string(),
    })
}

/// Raw, unparsed stat text as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatText {
    pub crit: String,
    pub direct_hit: String,
    pub determination: String,
    pub spell_speed: String,
}

impl StatText {
    pub fn new(
        crit: impl Into<String>,
        direct_hit: impl Into<String>,
        determination: impl Into<String>,
        spell_speed: impl Into<String>,
    ) -> Self {
        StatText {
            crit: crit.into(),
            direct_hit: direct_hit.into(),
            determination: determination.into(),
            spell_speed: spell_speed.into(),
        }
    }

    pub fn get(&self, kind: StatKind) -> &str {
        match kind {
            StatKind::Crit => &self.crit,
            StatKind::DirectHit => &self.direct_hit,
            StatKind::Determination => &self.determination,
            StatKind::SpellSpeed => &self.spell_speed,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut String {
        match kind {
            StatKind::Crit => &mut self.crit,
            StatKind::DirectHit => &mut self.direct_hit,
            StatKind::Determination => &mut self.determination,
            StatKind::SpellSpeed => &mut self.spell_speed,
        }
    }

    /// Parse into a StatInput
    pub fn parse(&self) -> Result<StatInput, SimError> {
        StatInput::parse(&self.crit, &self.direct_hit, &self.determination, &self.spell_speed)
    }
}

impl From<StatInput> for StatText {
    fn from(input: StatInput) -> Self {
        StatText::new(
            input.crit.to_string(),
            input.direct_hit.to_string(),
            input.determination.to_string(),
            input.spell_speed.to_string(),
        )
    }
}

impl From<CombinedStats> for StatInput {
    /// Use an existing total as the starting point of a new one
    fn from(stats: CombinedStats) -> Self {
        StatInput::new(stats.crit, stats.direct_hit, stats.determination, stats.spell_speed)
    }
}
