//! Configuration loading from TOML files

mod constants;
mod model;

pub use constants::{default_formula, FormulaConstants};
pub use model::{ModelConfig, ModelKind};

use crate::estimator::RangePolicy;
use crate::optimizer::DEFAULT_MAX_COMBINATIONS;
use crate::types::DEFAULT_REQUIRED_SLOTS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Default location of the settings file
pub const DEFAULT_CONFIG_PATH: &str = "dps_sim.toml";

/// Session settings: where the data lives and how to score it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Gear data file
    #[serde(default = "default_gear_path")]
    pub gear_path: PathBuf,
    /// Advisory log file, appended to
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    /// Slots that must have a selection before simulating
    #[serde(default = "default_required_slots")]
    pub required_slots: Vec<String>,
    /// How many ranked options to offer per slot
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Largest number of gear combinations the best-set search may try
    #[serde(default = "default_max_combinations")]
    pub max_combinations: u64,
    #[serde(default)]
    pub range: RangePolicy,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default = "default_formula")]
    pub formula: FormulaConstants,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            gear_path: default_gear_path(),
            log_path: default_log_path(),
            required_slots: default_required_slots(),
            top_n: default_top_n(),
            max_combinations: default_max_combinations(),
            range: RangePolicy::default(),
            model: ModelConfig::default(),
            formula: default_formula(),
        }
    }
}

fn default_gear_path() -> PathBuf {
    PathBuf::from("data/gear.json")
}

fn default_log_path() -> PathBuf {
    PathBuf::from("runtime_log.txt")
}

fn default_required_slots() -> Vec<String> {
    DEFAULT_REQUIRED_SLOTS.iter().map(|s| s.to_string()).collect()
}

fn default_top_n() -> usize {
    3
}

fn default_max_combinations() -> u64 {
    DEFAULT_MAX_COMBINATIONS
}

impl SimConfig {
    /// Load and validate settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: SimConfig = load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate settings from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings, using defaults when the file is absent.
    ///
    /// A present but broken file also yields defaults; the error is returned
    /// alongside so the caller can report it.
    pub fn load_or_default(path: &Path) -> (Self, Option<ConfigError>) {
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(ConfigError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => (SimConfig::default(), None),
            Err(e) => (SimConfig::default(), Some(e)),
        }
    }

    /// Reject settings the estimator cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.formula.validate()?;
        self.model.validate()?;

        if self.required_slots.is_empty() {
            return Err(ConfigError::ValidationError(
                "required_slots must name at least one slot".to_string(),
            ));
        }
        if let Some(slot) = self.required_slots.iter().find(|s| s.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "required_slots contains a blank slot name: {:?}",
                slot
            )));
        }
        if self.top_n == 0 {
            return Err(ConfigError::ValidationError("top_n must be at least 1".to_string()));
        }
        if self.max_combinations == 0 {
            return Err(ConfigError::ValidationError(
                "max_combinations must be at least 1".to_string(),
            ));
        }
        if self.range.max_stat == 0 {
            return Err(ConfigError::ValidationError("range.max_stat must be positive".to_string()));
        }

        // GCD must stay positive for the fastest spell speed the range allows
        let fastest = self.formula.gcd_ms(self.range.max_stat);
        if fastest <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "range.max_stat {} drives the GCD to {}ms",
                self.range.max_stat, fastest
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::RangeMode;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.gear_path, PathBuf::from("data/gear.json"));
        assert_eq!(config.required_slots, vec!["Head", "Body"]);
        assert_eq!(config.range.max_stat, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = SimConfig::parse("").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_parse_full() {
        let toml = r#"
gear_path = "gear/current.json"
log_path = "logs/sim.txt"
required_slots = ["Head", "Body", "Legs"]
top_n = 5

[range]
max_stat = 4000
mode = "reject"

[formula]
potency = 320
"#;

        let config = SimConfig::parse(toml).unwrap();
        assert_eq!(config.gear_path, PathBuf::from("gear/current.json"));
        assert_eq!(config.required_slots.len(), 3);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.range.mode, RangeMode::Reject);
        assert!((config.formula.potency - 320.0).abs() < f64::EPSILON);
        assert!((config.formula.base_sub - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_empty_slots() {
        let err = SimConfig::parse("required_slots = []").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_gcd_floor() {
        // 130 * (40000 - 400) / 1900 = 2709 > 2500
        let err = SimConfig::parse("[range]\nmax_stat = 40000").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_parse_model_section() {
        let toml = r#"
max_combinations = 5000

[model]
kind = "weighted_score"
priority = "spell_speed_focus"
"#;
        let config = SimConfig::parse(toml).unwrap();
        assert_eq!(config.max_combinations, 5000);
        assert_eq!(config.model.kind, ModelKind::WeightedScore);
        assert_eq!(config.model.priority, crate::estimator::Priority::SpellSpeedFocus);
    }

    #[test]
    fn test_validate_negative_weights() {
        let toml = r#"
[model]
kind = "weighted_score"

[model.weights]
crit = -0.5
"#;
        let err = SimConfig::parse(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_zero_search_limit() {
        let err = SimConfig::parse("max_combinations = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_formula_that_goes_negative_is_rejected() {
        // (0 - 400) / 100 drives the spell speed bonus to -3 at stat 0
        let err = SimConfig::parse("[formula]\nspell_speed_divisor = 100").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = SimConfig::parse("top_n = \"three\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let (config, err) = SimConfig::load_or_default(&dir.path().join("dps_sim.toml"));
        assert!(err.is_none());
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn test_load_or_default_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dps_sim.toml");
        fs::write(&path, "top_n = 0").unwrap();
        let (config, err) = SimConfig::load_or_default(&path);
        assert!(matches!(err, Some(ConfigError::ValidationError(_))));
        assert_eq!(config, SimConfig::default());
    }
}
