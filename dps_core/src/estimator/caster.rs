//! Caster DPS formula - one filler spell per GCD scaled by substats

use crate::config::FormulaConstants;
use crate::estimator::DpsModel;
use crate::stat_block::CombinedStats;
use serde::Serialize;

/// The default scoring model.
///
/// DPS is filler potency per second times a damage multiplier built from
/// crit, direct hit, determination and a flat spell speed bonus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CasterFormula {
    constants: FormulaConstants,
}

/// Every intermediate term of one evaluation, for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormulaBreakdown {
    /// Seconds per cast
    pub gcd: f64,
    pub casts_per_minute: f64,
    pub potency_per_second: f64,
    /// Chance to crit, 0..=1
    pub crit_rate: f64,
    /// Damage multiplier of a critical hit
    pub crit_bonus: f64,
    /// Chance to direct hit
    pub direct_hit_rate: f64,
    pub determination_bonus: f64,
    pub spell_speed_bonus: f64,
    /// Product of all multipliers
    pub multiplier: f64,
    pub dps: f64,
}

impl CasterFormula {
    pub fn new(constants: FormulaConstants) -> Self {
        CasterFormula { constants }
    }

    pub fn constants(&self) -> &FormulaConstants {
        &self.constants
    }

    fn normalise(&self, stat: u32) -> f64 {
        (stat as f64 - self.constants.base_sub) / self.constants.level_div
    }

    /// Evaluate the formula and keep every intermediate term
    pub fn breakdown(&self, stats: &CombinedStats) -> FormulaBreakdown {
        let c = &self.constants;

        let gcd = c.gcd_ms(stats.spell_speed) / 1000.0;
        let casts_per_minute = 60.0 / gcd;
        let potency_per_second = casts_per_minute * c.potency / 60.0;

        let crit = self.normalise(stats.crit);
        let crit_rate = ((c.crit_rate_coefficient * crit + c.crit_rate_base) / 1000.0).clamp(0.0, 1.0);
        let crit_bonus = (c.crit_bonus_coefficient * crit + c.crit_bonus_base) / 1000.0;

        let direct_hit_rate = (c.direct_hit_coefficient * self.normalise(stats.direct_hit) / 1000.0).min(1.0);

        let determination_bonus =
            (c.determination_coefficient * self.normalise(stats.determination) + c.determination_base) / 1000.0;

        let spell_speed_bonus = 1.0 + (stats.spell_speed as f64 - c.base_sub) / c.spell_speed_divisor;

        let multiplier = determination_bonus
            * (1.0 + crit_rate * (crit_bonus - 1.0).max(0.0))
            * (1.0 + direct_hit_rate * c.direct_hit_bonus)
            * spell_speed_bonus;

        FormulaBreakdown {
            gcd,
            casts_per_minute,
            potency_per_second,
            crit_rate,
            crit_bonus,
            direct_hit_rate,
            determination_bonus,
            spell_speed_bonus,
            multiplier,
            dps: potency_per_second * multiplier,
        }
    }
}

impl DpsModel for CasterFormula {
    fn name(&self) -> &str {
        "caster_formula"
    }

    fn estimate(&self, stats: &CombinedStats) -> f64 {
        self.breakdown(stats).dps
    }
}
