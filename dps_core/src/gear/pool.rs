//! GearPool - slot name to ordered gear list, loaded once per session

use crate::error::SimError;
use crate::gear::GearPiece;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Reverse;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Read-only gear pool, keyed by slot name in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GearPool {
    slots: Vec<(String, Vec<GearPiece>)>,
}

impl GearPool {
    /// Create an empty pool
    pub fn new() -> Self {
        GearPool::default()
    }

    /// Add or replace the list for a slot
    pub fn insert(&mut self, slot: impl Into<String>, pieces: Vec<GearPiece>) {
        let slot = slot.into();
        if let Some(existing) = self.slots.iter_mut().find(|(name, _)| *name == slot) {
            existing.1 = pieces;
        } else {
            self.slots.push((slot, pieces));
        }
    }

    /// Builder form of `insert`
    pub fn with_slot(mut self, slot: impl Into<String>, pieces: Vec<GearPiece>) -> Self {
        self.insert(slot, pieces);
        self
    }

    /// Parse a pool from gear file JSON
    pub fn from_json(content: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load the gear file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SimError::DataNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_json(&content)
    }

    /// Load the gear file, falling back to an empty pool on failure.
    ///
    /// The error is logged and handed back so the caller can tell the user.
    pub fn load_or_empty(path: impl AsRef<Path>) -> (Self, Option<SimError>) {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(pool) => {
                tracing::info!(
                    "Gear loaded successfully. path={} slots={} pieces={}",
                    path.display(),
                    pool.slot_count(),
                    pool.len()
                );
                (pool, None)
            }
            Err(err) => {
                tracing::error!("LoadGear ERROR: {}", err);
                (GearPool::default(), Some(err))
            }
        }
    }

    /// Slot names in file order
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(name, _)| name.as_str())
    }

    /// Whether the pool has a list for this slot
    pub fn contains_slot(&self, slot: &str) -> bool {
        self.slots.iter().any(|(name, _)| name == slot)
    }

    /// Gear list for a slot (empty if the slot is unknown)
    pub fn pieces(&self, slot: &str) -> &[GearPiece] {
        self.slots
            .iter()
            .find(|(name, _)| name == slot)
            .map(|(_, pieces)| pieces.as_slice())
            .unwrap_or(&[])
    }

    /// Find a piece by name within a slot. The first match wins.
    pub fn find(&self, slot: &str, name: &str) -> Option<&GearPiece> {
        self.pieces(slot).iter().find(|piece| piece.name == name)
    }

    /// Top `top_n` pieces of a slot ranked by total stats, highest first.
    /// Ties keep file order.
    pub fn best_in_slot(&self, slot: &str, top_n: usize) -> Vec<&GearPiece> {
        let mut ranked: Vec<&GearPiece> = self.pieces(slot).iter().collect();
        ranked.sort_by_key(|piece| Reverse(piece.stat_total()));
        ranked.truncate(top_n);
        ranked
    }

    /// Number of slots
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Total number of pieces across all slots
    pub fn len(&self) -> usize {
        self.slots.iter().map(|(_, pieces)| pieces.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for GearPool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (slot, pieces) in &self.slots {
            map.serialize_entry(slot, pieces)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for GearPool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PoolVisitor;

        impl<'de> Visitor<'de> for PoolVisitor {
            type Value = GearPool;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of slot name to a list of gear records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<GearPool, A::Error> {
                let mut pool = GearPool::new();
                while let Some((slot, pieces)) = map.next_entry::<String, Vec<GearPiece>>()? {
                    pool.insert(slot, pieces);
                }
                Ok(pool)
            }
        }

        deserializer.deserialize_map(PoolVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "Head": [
            {"Name": "Casting Hood", "Crit": 100, "DirectHit": 50, "Determination": 20, "SpellSpeed": 10},
            {"Name": "Plain Hood", "Crit": 10, "DirectHit": 0, "Determination": 0, "SpellSpeed": 0}
        ],
        "Body": [
            {"Name": "Robe", "Crit": 80, "DirectHit": 0, "Determination": 0, "SpellSpeed": 0}
        ],
        "Hands": []
    }"#;

    #[test]
    fn test_from_json_keeps_slot_order() {
        let pool = GearPool::from_json(SAMPLE).unwrap();
        let slots: Vec<&str> = pool.slots().collect();
        assert_eq!(slots, vec!["Head", "Body", "Hands"]);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.pieces("Head")[1].name, "Plain Hood");
    }

    #[test]
    fn test_find() {
        let pool = GearPool::from_json(SAMPLE).unwrap();
        assert_eq!(pool.find("Body", "Robe").unwrap().crit, 80);
        assert!(pool.find("Body", "Casting Hood").is_none());
        assert!(pool.find("Feet", "Robe").is_none());
    }

    #[test]
    fn test_malformed_json() {
        let err = GearPool::from_json("{\"Head\": 12}").unwrap_err();
        assert!(matches!(err, SimError::DataParseError(_)));
        assert!(GearPool::from_json("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gear.json");
        let err = GearPool::load(&path).unwrap_err();
        assert!(matches!(err, SimError::DataNotFound { .. }));
    }

    #[test]
    fn test_load_or_empty_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let (pool, err) = GearPool::load_or_empty(dir.path().join("gear.json"));
        assert!(pool.is_empty());
        assert!(matches!(err, Some(SimError::DataNotFound { .. })));
    }

    #[test]
    fn test_load_or_empty_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let (pool, err) = GearPool::load_or_empty(file.path());
        assert!(pool.is_empty());
        assert!(matches!(err, Some(SimError::DataParseError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let (pool, err) = GearPool::load_or_empty(file.path());
        assert!(err.is_none());
        assert_eq!(pool.slot_count(), 3);
    }

    #[test]
    fn test_best_in_slot_ranks_and_truncates() {
        let pool = GearPool::new().with_slot(
            "Head",
            vec![
                GearPiece::new("Low", 1, 1, 1, 1),
                GearPiece::new("High", 100, 0, 0, 0),
                GearPiece::new("Mid A", 10, 10, 0, 0),
                GearPiece::new("Mid B", 0, 0, 10, 10),
            ],
        );

        let names: Vec<&str> = pool.best_in_slot("Head", 3).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid A", "Mid B"]);
        assert!(pool.best_in_slot("Feet", 3).is_empty());
    }

    #[test]
    fn test_insert_replaces_existing_slot() {
        let mut pool = GearPool::new().with_slot("Head", vec![GearPiece::new("Old", 0, 0, 0, 0)]);
        pool.insert("Head", vec![GearPiece::new("New", 0, 0, 0, 0)]);
        assert_eq!(pool.slot_count(), 1);
        assert_eq!(pool.pieces("Head")[0].name, "New");
    }

    #[test]
    fn test_serialize_round_trip_keeps_order() {
        let pool = GearPool::from_json(SAMPLE).unwrap();
        let json = serde_json::to_string(&pool).unwrap();
        assert!(json.find("Head").unwrap() < json.find("Body").unwrap());
        assert_eq!(GearPool::from_json(&json).unwrap(), pool);
    }
}
