//! Error types for loading gear and running simulations

use crate::types::StatKind;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong at the load or simulate boundary.
///
/// None of these are fatal: callers report `user_message()` to the user and
/// the `Display` form to the log.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("gear data file not found: {}", path.display())]
    DataNotFound { path: PathBuf },
    #[error("failed to parse gear data: {0}")]
    DataParseError(#[from] serde_json::Error),
    #[error("failed to read gear data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid {stat} value {value:?}: expected a non-negative integer")]
    InvalidInput { stat: StatKind, value: String },
    #[error("no valid gear selected for slot {slot}")]
    InvalidSelection { slot: String },
    #[error("{stat} value {value} exceeds the supported maximum of {max}")]
    StatOutOfRange { stat: StatKind, value: u32, max: u32 },
    #[error("model {model} produced an unusable estimate: {value}")]
    ModelOutput { model: String, value: f64 },
    #[error("best-set search needs {combinations} combinations, above the limit of {limit}")]
    SearchTooLarge { combinations: u64, limit: u64 },
}

impl SimError {
    /// Short message suitable for a dialog or status line
    pub fn user_message(&self) -> String {
        match self {
            SimError::DataNotFound { path } => {
                let file = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                format!("{} not found.", file)
            }
            SimError::DataParseError(_) | SimError::Io(_) => {
                "Error loading gear. Check the runtime log.".to_string()
            }
            SimError::InvalidInput { stat, .. } => {
                format!("{} must be a whole number of 0 or more.", stat)
            }
            SimError::InvalidSelection { .. } => "Select gear first.".to_string(),
            SimError::StatOutOfRange { stat, max, .. } => {
                format!("{} is above the supported maximum of {}.", stat, max)
            }
            SimError::ModelOutput { .. } => {
                "Simulation failed. Check the runtime log.".to_string()
            }
            SimError::SearchTooLarge { limit, .. } => {
                format!("Too many gear combinations to search (limit {}).", limit)
            }
        }
    }
}
