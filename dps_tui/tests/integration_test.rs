//! Integration test: Load gear file -> Select -> Simulate -> Search best set
//!
//! This test validates the full flow from the shipped gear file to a DPS figure.

use dps_core::optimizer::{combination_count, find_best_set};
use dps_core::prelude::*;
use std::path::Path;

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

fn shipped_pool() -> GearPool {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/gear.json");
    GearPool::load(&path).expect("Failed to load shipped gear file")
}

#[test]
fn test_shipped_gear_to_dps_flow() {
    separator("STEP 1: Loading gear and config");

    let config_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../dps_sim.toml");
    let config = SimConfig::load(&config_path).expect("Failed to load shipped config");
    let pool = shipped_pool();

    println!("  Loaded {} pieces across {} slots", pool.len(), pool.slot_count());
    assert_eq!(pool.slots().collect::<Vec<_>>(), vec!["Head", "Body", "Hands", "Legs", "Feet", "Accessories"]);

    separator("STEP 2: Pre-selecting best in slot");

    let mut selection = GearSelection::new();
    for slot in &config.required_slots {
        let top = pool.best_in_slot(slot, config.top_n);
        println!("  {}: {:?}", slot, top.iter().map(|p| &p.name).collect::<Vec<_>>());
        assert!(!top.is_empty());
        assert!(top.len() <= config.top_n);
        selection.select(slot.clone(), top[0].name.clone());
    }

    separator("STEP 3: Simulating");

    let estimator = DpsEstimator::from_config(&config).expect("Shipped model settings are invalid");
    let simulator = Simulator::new(&pool, estimator, config.required_slots.clone())
        .with_search_limit(config.max_combinations);
    let request = SimulationRequest::new(StatText::new("400", "400", "390", "400"), selection.clone());
    let report = simulator.simulate(&request).expect("Simulation failed");
    println!("  {} ({})", report.summary(), report.combined);

    let head = pool.find("Head", selection.get("Head").unwrap()).unwrap();
    let body = pool.find("Body", selection.get("Body").unwrap()).unwrap();
    assert_eq!(report.combined.crit, 400 + head.crit + body.crit);
    assert_eq!(report.combined.determination, 390 + head.determination + body.determination);
    assert!(report.dps > 0.0);

    let again = simulator.simulate(&request).unwrap();
    assert_eq!(report.dps.to_bits(), again.dps.to_bits());

    separator("STEP 4: Searching every combination");

    let base = StatInput::new(400, 400, 390, 400);
    let best = find_best_set(&pool, &config.required_slots, &base, simulator.estimator())
        .unwrap()
        .unwrap();
    println!("  Best: {:.2} over {} combinations", best.dps, best.evaluated);
    assert_eq!(best.evaluated, combination_count(&pool, &config.required_slots));
    assert!(best.dps >= report.dps);

    let best_request = SimulationRequest::new(StatText::from(base), best.selection.clone());
    let best_report = simulator.simulate(&best_request).unwrap();
    assert_eq!(best_report.dps, best.dps);

    separator("STEP 5: Searching around an equipped Legs piece");

    let legs = pool.best_in_slot("Legs", 1)[0].name.clone();
    let mut equipped = selection.with("Legs", legs.clone());
    let request = SimulationRequest::new(StatText::from(base), equipped.clone());
    let around = simulator.best_set(&request).expect("Search failed").unwrap();
    println!("  Best with {}: {:.2}", legs, around.dps);
    assert!(around.dps >= best.dps);

    for (slot, name) in around.selection.iter() {
        equipped.select(slot, name);
    }
    assert_eq!(equipped.get("Legs"), Some(legs.as_str()));
    let applied = SimulationRequest::new(StatText::from(base), equipped);
    let applied_report = simulator.simulate(&applied).unwrap();
    assert_eq!(applied_report.combined, around.combined);
    assert_eq!(applied_report.dps.to_bits(), around.dps.to_bits());
}

#[test]
fn test_missing_gear_file_is_recoverable() {
    let dir = tempfile::tempdir().unwrap();
    let (pool, err) = GearPool::load_or_empty(dir.path().join("gear.json"));

    assert!(pool.is_empty());
    let err = err.expect("missing file should be reported");
    assert!(matches!(err, SimError::DataNotFound { .. }));
    assert_eq!(err.user_message(), "gear.json not found.");

    // Nothing can be simulated against the empty pool
    let simulator = Simulator::new(&pool, DpsEstimator::default(), vec!["Head".to_string()]);
    let request = SimulationRequest::new(StatText::default(), GearSelection::new().with("Head", "Anything"));
    assert!(matches!(
        simulator.simulate(&request),
        Err(SimError::InvalidSelection { .. })
    ));
}

#[test]
fn test_malformed_stat_text_runs_nothing() {
    let pool = shipped_pool();
    let simulator = Simulator::new(&pool, DpsEstimator::default(), vec!["Head".to_string(), "Body".to_string()]);
    let request = SimulationRequest::new(StatText::new("400", "abc", "390", "400"), GearSelection::new());

    let err = simulator.simulate(&request).unwrap_err();
    assert!(matches!(err, SimError::InvalidInput { .. }));
}
