//! dps_core - Gear stat aggregation and DPS estimation for caster builds
//!
//! This library provides:
//! - GearPool: Per-slot gear lists loaded from a JSON gear file
//! - StatAggregator: Base stats plus selected gear as CombinedStats
//! - DpsEstimator: Swappable DPS models behind a range policy
//! - Simulator: The request boundary tying the above together
//! - Best-set search across every combination of pieces

pub mod config;
pub mod error;
pub mod estimator;
pub mod gear;
pub mod optimizer;
pub mod prelude;
pub mod simulation;
pub mod source;
pub mod stat_block;
pub mod types;

// Re-export core types for convenience
pub use config::{ConfigError, FormulaConstants, SimConfig};
pub use error::SimError;
pub use estimator::{CasterFormula, DpsEstimator, DpsModel, RangeMode, RangePolicy, StatWeights, WeightedScore};
pub use gear::{GearPiece, GearPool, GearSelection};
pub use optimizer::{find_best_set, find_best_set_within, BestSet};
pub use simulation::{SimulationReport, SimulationRequest, Simulator};
pub use source::{GearSource, StatSource};
pub use stat_block::{aggregate, CombinedStats, StatAccumulator, StatInput, StatText};
pub use types::StatKind;
