//! Formula constants configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunable coefficients of the caster DPS formula
///
/// Every stat term has the shape `coefficient * (stat - base_sub) / level_div`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaConstants {
    /// Stat value at which a substat contributes nothing
    #[serde(default = "default_base_sub")]
    pub base_sub: f64,
    /// Level divisor normalising every stat term
    #[serde(default = "default_level_div")]
    pub level_div: f64,
    /// Unhasted global cooldown in milliseconds
    #[serde(default = "default_base_gcd_ms")]
    pub base_gcd_ms: f64,
    /// GCD reduction per normalised point of spell speed
    #[serde(default = "default_gcd_coefficient")]
    pub gcd_coefficient: f64,
    /// Potency of the filler spell cast every GCD
    #[serde(default = "default_potency")]
    pub potency: f64,
    #[serde(default = "default_crit_rate_coefficient")]
    pub crit_rate_coefficient: f64,
    /// Crit rate at base_sub, in permille
    #[serde(default = "default_crit_rate_base")]
    pub crit_rate_base: f64,
    #[serde(default = "default_crit_bonus_coefficient")]
    pub crit_bonus_coefficient: f64,
    /// Crit damage multiplier at base_sub, in permille
    #[serde(default = "default_crit_bonus_base")]
    pub crit_bonus_base: f64,
    #[serde(default = "default_direct_hit_coefficient")]
    pub direct_hit_coefficient: f64,
    /// Extra damage dealt by a direct hit (0.25 = 25%)
    #[serde(default = "default_direct_hit_bonus")]
    pub direct_hit_bonus: f64,
    #[serde(default = "default_determination_coefficient")]
    pub determination_coefficient: f64,
    /// Determination multiplier at base_sub, in permille
    #[serde(default = "default_determination_base")]
    pub determination_base: f64,
    /// Spell speed points per 1% flat damage bonus, times 100
    #[serde(default = "default_spell_speed_divisor")]
    pub spell_speed_divisor: f64,
}

impl Default for FormulaConstants {
    fn default() -> Self {
        FormulaConstants {
            base_sub: default_base_sub(),
            level_div: default_level_div(),
            base_gcd_ms: default_base_gcd_ms(),
            gcd_coefficient: default_gcd_coefficient(),
            potency: default_potency(),
            crit_rate_coefficient: default_crit_rate_coefficient(),
            crit_rate_base: default_crit_rate_base(),
            crit_bonus_coefficient: default_crit_bonus_coefficient(),
            crit_bonus_base: default_crit_bonus_base(),
            direct_hit_coefficient: default_direct_hit_coefficient(),
            direct_hit_bonus: default_direct_hit_bonus(),
            determination_coefficient: default_determination_coefficient(),
            determination_base: default_determination_base(),
            spell_speed_divisor: default_spell_speed_divisor(),
        }
    }
}

impl FormulaConstants {
    /// GCD in milliseconds for a spell speed value
    pub fn gcd_ms(&self, spell_speed: u32) -> f64 {
        let reduction = (self.gcd_coefficient * (spell_speed as f64 - self.base_sub) / self.level_div).trunc();
        self.base_gcd_ms - reduction
    }

    /// Check the constants keep the formula finite and non-decreasing
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.level_div <= 0.0 {
            return Err(ConfigError::ValidationError("formula.level_div must be positive".to_string()));
        }
        if self.base_gcd_ms <= 0.0 {
            return Err(ConfigError::ValidationError("formula.base_gcd_ms must be positive".to_string()));
        }
        if self.spell_speed_divisor <= 0.0 {
            return Err(ConfigError::ValidationError(
                "formula.spell_speed_divisor must be positive".to_string(),
            ));
        }

        let coefficients = [
            ("gcd_coefficient", self.gcd_coefficient),
            ("potency", self.potency),
            ("crit_rate_coefficient", self.crit_rate_coefficient),
            ("crit_bonus_coefficient", self.crit_bonus_coefficient),
            ("direct_hit_coefficient", self.direct_hit_coefficient),
            ("direct_hit_bonus", self.direct_hit_bonus),
            ("determination_coefficient", self.determination_coefficient),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "formula.{} must be a non-negative number",
                    name
                )));
            }
        }
        if !self.base_sub.is_finite() || self.base_sub < 0.0 {
            return Err(ConfigError::ValidationError(
                "formula.base_sub must be a non-negative number".to_string(),
            ));
        }

        // Every factor is non-decreasing, so positive at stat 0 means positive everywhere
        let floor = -self.base_sub / self.level_div;
        let factors = [
            (
                "determination",
                (self.determination_coefficient * floor + self.determination_base) / 1000.0,
            ),
            (
                "direct hit",
                1.0 + self.direct_hit_coefficient * floor / 1000.0 * self.direct_hit_bonus,
            ),
            ("spell speed", 1.0 - self.base_sub / self.spell_speed_divisor),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "formula gives a {} multiplier of {} at stat 0",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

fn default_base_sub() -> f64 {
    400.0
}
fn default_level_div() -> f64 {
    1900.0
}
fn default_base_gcd_ms() -> f64 {
    2500.0
}
fn default_gcd_coefficient() -> f64 {
    130.0
}
fn default_potency() -> f64 {
    310.0
}
fn default_crit_rate_coefficient() -> f64 {
    200.0
}
fn default_crit_rate_base() -> f64 {
    50.0
}
fn default_crit_bonus_coefficient() -> f64 {
    200.0
}
fn default_crit_bonus_base() -> f64 {
    1400.0
}
fn default_direct_hit_coefficient() -> f64 {
    550.0
}
fn default_direct_hit_bonus() -> f64 {
    0.25
}
fn default_determination_coefficient() -> f64 {
    140.0
}
fn default_determination_base() -> f64 {
    1000.0
}
fn default_spell_speed_divisor() -> f64 {
    10000.0
}

/// Constants shipped with the crate
pub fn default_formula() -> FormulaConstants {
    let toml = include_str!("../../config/formula.toml");
    super::parse_toml(toml).unwrap_or_default()
}
