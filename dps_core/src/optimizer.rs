//! Best-set search - try every combination of pieces across slots

use crate::error::SimError;
use crate::estimator::DpsEstimator;
use crate::gear::{GearPiece, GearPool, GearSelection};
use crate::stat_block::{aggregate, CombinedStats, StatInput};

/// Search size allowed when no limit is configured
pub const DEFAULT_MAX_COMBINATIONS: u64 = 1_000_000;

/// Highest scoring combination found
#[derive(Debug, Clone, PartialEq)]
pub struct BestSet {
    pub selection: GearSelection,
    pub combined: CombinedStats,
    pub dps: f64,
    /// Number of combinations evaluated
    pub evaluated: u64,
}

/// Number of combinations across the given slots, saturating at `u64::MAX`
pub fn combination_count(pool: &GearPool, slots: &[String]) -> u64 {
    if slots.is_empty() {
        return 0;
    }
    slots
        .iter()
        .map(|slot| pool.pieces(slot).len() as u64)
        .fold(1u64, |acc, n| acc.saturating_mul(n))
}

/// Exhaustively search the listed slots for the highest estimate.
///
/// Combinations are enumerated as a mixed-radix counter, first slot fastest.
/// On equal estimates the earlier combination is kept. Every listed slot
/// must have at least one piece.
pub fn find_best_set(
    pool: &GearPool,
    slots: &[String],
    base: &StatInput,
    estimator: &DpsEstimator,
) -> Result<Option<BestSet>, SimError> {
    find_best_set_within(pool, slots, base, estimator, DEFAULT_MAX_COMBINATIONS)
}

/// `find_best_set`, refusing searches of more than `limit` combinations
pub fn find_best_set_within(
    pool: &GearPool,
    slots: &[String],
    base: &StatInput,
    estimator: &DpsEstimator,
    limit: u64,
) -> Result<Option<BestSet>, SimError> {
    if slots.is_empty() {
        return Ok(None);
    }

    let lists: Vec<&[GearPiece]> = slots.iter().map(|slot| pool.pieces(slot)).collect();
    if let Some(index) = lists.iter().position(|pieces| pieces.is_empty()) {
        return Err(SimError::InvalidSelection {
            slot: slots[index].clone(),
        });
    }

    let combinations = combination_count(pool, slots);
    if combinations > limit {
        return Err(SimError::SearchTooLarge { combinations, limit });
    }

    let mut indices = vec![0usize; lists.len()];
    let mut best: Option<(Vec<usize>, CombinedStats, f64)> = None;
    let mut evaluated: u64 = 0;

    loop {
        let chosen: Vec<&GearPiece> = indices.iter().zip(&lists).map(|(&i, pieces)| &pieces[i]).collect();
        let combined = aggregate(base, &chosen);
        let dps = estimator.estimate(&combined)?;
        evaluated += 1;

        let better = match &best {
            Some((_, _, best_dps)) => dps > *best_dps,
            None => true,
        };
        if better {
            best = Some((indices.clone(), combined, dps));
        }

        if !advance(&mut indices, &lists) {
            break;
        }
    }

    tracing::info!(
        "Best set search evaluated {} combinations over {} slots",
        evaluated,
        slots.len()
    );

    Ok(best.map(|(indices, combined, dps)| {
        let mut selection = GearSelection::new();
        for ((slot, pieces), i) in slots.iter().zip(&lists).zip(indices) {
            selection.select(slot.clone(), pieces[i].name.clone());
        }
        BestSet {
            selection,
            combined,
            dps,
            evaluated,
        }
    }))
}

/// Step the counter; false once every combination has been visited
fn advance(indices: &mut [usize], lists: &[&[GearPiece]]) -> bool {
    for (index, pieces) in indices.iter_mut().zip(lists) {
        *index += 1;
        if *index < pieces.len() {
            return true;
        }
        *index = 0;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::{RangePolicy, StatWeights, WeightedScore};

    fn pool() -> GearPool {
        GearPool::new()
            .with_slot(
                "Head",
                vec![
                    GearPiece::new("Crit Hood", 300, 0, 0, 0),
                    GearPiece::new("Det Hood", 0, 0, 300, 0),
                    GearPiece::new("Bare", 0, 0, 0, 0),
                ],
            )
            .with_slot(
                "Body",
                vec![
                    GearPiece::new("Speed Robe", 0, 0, 0, 50),
                    GearPiece::new("Crit Robe", 400, 0, 0, 0),
                ],
            )
    }

    fn slots() -> Vec<String> {
        vec!["Head".to_string(), "Body".to_string()]
    }

    #[test]
    fn test_combination_count() {
        assert_eq!(combination_count(&pool(), &slots()), 6);
        assert_eq!(combination_count(&pool(), &[]), 0);
        assert_eq!(combination_count(&pool(), &["Feet".to_string()]), 0);
    }

    #[test]
    fn test_finds_weighted_optimum() {
        let model = WeightedScore::new(StatWeights {
            crit: 1.0,
            direct_hit: 0.0,
            determination: 2.0,
            spell_speed: 0.0,
        })
        .unwrap();
        let estimator = DpsEstimator::new(model, RangePolicy::default());

        let best = find_best_set(&pool(), &slots(), &StatInput::default(), &estimator)
            .unwrap()
            .unwrap();

        assert_eq!(best.selection.get("Head"), Some("Det Hood"));
        assert_eq!(best.selection.get("Body"), Some("Crit Robe"));
        assert_eq!(best.combined, CombinedStats::new(400, 0, 300, 0));
        assert_eq!(best.evaluated, 6);
    }

    #[test]
    fn test_matches_brute_force_with_formula() {
        let pool = pool();
        let estimator = DpsEstimator::default();
        let base = StatInput::new(400, 400, 400, 400);
        let best = find_best_set(&pool, &slots(), &base, &estimator).unwrap().unwrap();

        let mut expected = f64::MIN;
        for head in pool.pieces("Head") {
            for body in pool.pieces("Body") {
                let dps = estimator.estimate(&aggregate(&base, &[head, body])).unwrap();
                expected = expected.max(dps);
            }
        }
        assert_eq!(best.dps, expected);
    }

    #[test]
    fn test_tie_keeps_first_combination() {
        let pool = GearPool::new().with_slot(
            "Head",
            vec![GearPiece::new("A", 10, 0, 0, 0), GearPiece::new("B", 0, 10, 0, 0)],
        );
        let model = WeightedScore::new(StatWeights::balanced()).unwrap();
        let estimator = DpsEstimator::new(model, RangePolicy::default());
        let best = find_best_set(&pool, &["Head".to_string()], &StatInput::default(), &estimator)
            .unwrap()
            .unwrap();
        assert_eq!(best.selection.get("Head"), Some("A"));
    }

    #[test]
    fn test_empty_slot_is_invalid() {
        let err = find_best_set(
            &pool(),
            &["Head".to_string(), "Feet".to_string()],
            &StatInput::default(),
            &DpsEstimator::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SimError::InvalidSelection { slot } if slot == "Feet"));
    }

    #[test]
    fn test_search_above_limit_is_refused() {
        let err = find_best_set_within(&pool(), &slots(), &StatInput::default(), &DpsEstimator::default(), 5)
            .unwrap_err();
        assert!(matches!(
            err,
            SimError::SearchTooLarge {
                combinations: 6,
                limit: 5
            }
        ));

        let best = find_best_set_within(&pool(), &slots(), &StatInput::default(), &DpsEstimator::default(), 6)
            .unwrap()
            .unwrap();
        assert_eq!(best.evaluated, 6);
    }

    #[test]
    fn test_no_slots() {
        let result = find_best_set(&pool(), &[], &StatInput::default(), &DpsEstimator::default()).unwrap();
        assert!(result.is_none());
    }
}
