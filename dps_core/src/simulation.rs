//! Simulation requests - parse, resolve, aggregate, estimate

use crate::error::SimError;
use crate::estimator::DpsEstimator;
use crate::gear::{GearPiece, GearPool, GearSelection};
use crate::optimizer::{find_best_set_within, BestSet, DEFAULT_MAX_COMBINATIONS};
use crate::source::StatSource;
use crate::stat_block::{aggregate, aggregate_sources, CombinedStats, StatInput, StatText};
use serde::Serialize;

/// One press of "simulate": raw stat text plus the chosen gear
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationRequest {
    pub base: StatText,
    pub selection: GearSelection,
}

impl SimulationRequest {
    pub fn new(base: StatText, selection: GearSelection) -> Self {
        SimulationRequest { base, selection }
    }
}

/// Outcome of a successful simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub combined: CombinedStats,
    pub dps: f64,
    /// (slot, piece name) for every piece that contributed
    pub gear: Vec<(String, String)>,
}

impl SimulationReport {
    /// Result line shown to the user
    pub fn summary(&self) -> String {
        format!("Estimated DPS: {:.2}", self.dps)
    }

    /// `Head:<name>, Body:<name>` as written to the log
    pub fn gear_summary(&self) -> String {
        self.gear
            .iter()
            .map(|(slot, name)| format!("{}:{}", slot, name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Runs simulation requests against a loaded pool
///
/// Holds no mutable state; every call is independent.
#[derive(Debug)]
pub struct Simulator<'a> {
    pool: &'a GearPool,
    estimator: DpsEstimator,
    required_slots: Vec<String>,
    search_limit: u64,
}

impl<'a> Simulator<'a> {
    pub fn new(pool: &'a GearPool, estimator: DpsEstimator, required_slots: Vec<String>) -> Self {
        Simulator {
            pool,
            estimator,
            required_slots,
            search_limit: DEFAULT_MAX_COMBINATIONS,
        }
    }

    /// Cap the number of combinations `best_set` may try
    pub fn with_search_limit(mut self, limit: u64) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn pool(&self) -> &GearPool {
        self.pool
    }

    pub fn estimator(&self) -> &DpsEstimator {
        &self.estimator
    }

    pub fn required_slots(&self) -> &[String] {
        &self.required_slots
    }

    /// Run one request, logging the outcome either way
    pub fn simulate(&self, request: &SimulationRequest) -> Result<SimulationReport, SimError> {
        match self.run(request) {
            Ok(report) => {
                tracing::info!(
                    "Simulation complete. DPS: {:.2} | Gear: {}",
                    report.dps,
                    report.gear_summary()
                );
                Ok(report)
            }
            Err(err) => {
                tracing::error!("Simulate ERROR: {}", err);
                Err(err)
            }
        }
    }

    /// Search the required slots for the highest estimate.
    ///
    /// Pieces selected for any other slot stay on and count toward every
    /// candidate, so applying the result and simulating gives the same DPS.
    /// The returned selection names the required slots only.
    pub fn best_set(&self, request: &SimulationRequest) -> Result<Option<BestSet>, SimError> {
        let result = self.search(request);
        match &result {
            Ok(Some(best)) => tracing::info!(
                "Best set found. DPS: {:.2} after {} combinations",
                best.dps,
                best.evaluated
            ),
            Ok(None) => tracing::info!("Best set: no slots to search"),
            Err(err) => tracing::error!("Best set ERROR: {}", err),
        }
        result
    }

    fn search(&self, request: &SimulationRequest) -> Result<Option<BestSet>, SimError> {
        let typed = request.base.parse()?;

        let mut kept = GearSelection::new();
        for (slot, name) in request.selection.iter() {
            if !self.required_slots.iter().any(|r| r == slot) {
                kept.select(slot, name);
            }
        }
        let kept = kept.resolve(self.pool, &[])?;
        let pieces: Vec<&GearPiece> = kept.iter().map(|source| &source.piece).collect();
        let base = StatInput::from(aggregate(&typed, &pieces));

        find_best_set_within(
            self.pool,
            &self.required_slots,
            &base,
            &self.estimator,
            self.search_limit,
        )
    }

    fn run(&self, request: &SimulationRequest) -> Result<SimulationReport, SimError> {
        let base = request.base.parse()?;
        let gear = request.selection.resolve(self.pool, &self.required_slots)?;

        let names = gear
            .iter()
            .map(|source| (source.slot.clone(), source.piece.name.clone()))
            .collect();

        let mut sources: Vec<Box<dyn StatSource>> = vec![Box::new(base)];
        for source in gear {
            sources.push(Box::new(source));
        }
        let combined = aggregate_sources(&sources);

        let dps = self.estimator.estimate(&combined)?;
        tracing::debug!("model={} stats=[{}] dps={}", self.estimator.model_name(), combined, dps);

        Ok(SimulationReport {
            combined,
            dps,
            gear: names,
        })
    }
}
