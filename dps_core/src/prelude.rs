//! Prelude module for convenient imports
//!
//! ```rust
//! use dps_core::prelude::*;
//! ```

// Core types
pub use crate::stat_block::{CombinedStats, StatInput, StatText};
pub use crate::types::StatKind;

// Gear
pub use crate::gear::{GearPiece, GearPool, GearSelection};

// Estimation
pub use crate::estimator::{CasterFormula, DpsEstimator, DpsModel, RangePolicy};

// Requests
pub use crate::simulation::{SimulationReport, SimulationRequest, Simulator};

// Errors and config
pub use crate::config::SimConfig;
pub use crate::error::SimError;
