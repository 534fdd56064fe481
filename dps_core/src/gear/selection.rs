//! GearSelection - which piece the player picked for each slot

use crate::error::SimError;
use crate::gear::GearPool;
use crate::source::GearSource;
use serde::{Deserialize, Serialize};

/// Slot to piece-name choices, in the order they were made
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearSelection {
    entries: Vec<(String, String)>,
}

impl GearSelection {
    pub fn new() -> Self {
        GearSelection::default()
    }

    /// Choose a piece for a slot, replacing any earlier choice
    pub fn select(&mut self, slot: impl Into<String>, name: impl Into<String>) {
        let slot = slot.into();
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(s, _)| *s == slot) {
            entry.1 = name;
        } else {
            self.entries.push((slot, name));
        }
    }

    /// Builder form of `select`
    pub fn with(mut self, slot: impl Into<String>, name: impl Into<String>) -> Self {
        self.select(slot, name);
        self
    }

    /// Drop the choice for a slot, returning it if present
    pub fn clear(&mut self, slot: &str) -> Option<String> {
        let index = self.entries.iter().position(|(s, _)| s == slot)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, _)| s == slot)
            .map(|(_, name)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, n)| (s.as_str(), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the choices against the pool.
    ///
    /// Every required slot must have a choice naming a piece in that slot's
    /// list. Choices for other slots are resolved the same way and appended
    /// after the required ones.
    pub fn resolve(&self, pool: &GearPool, required_slots: &[String]) -> Result<Vec<GearSource>, SimError> {
        let mut sources = Vec::with_capacity(self.entries.len().max(required_slots.len()));

        for slot in required_slots {
            let name = self.get(slot).ok_or_else(|| SimError::InvalidSelection { slot: slot.clone() })?;
            sources.push(resolve_one(pool, slot, name)?);
        }

        for (slot, name) in self.iter() {
            if required_slots.iter().any(|r| r == slot) {
                continue;
            }
            sources.push(resolve_one(pool, slot, name)?);
        }

        Ok(sources)
    }
}

fn resolve_one(pool: &GearPool, slot: &str, name: &str) -> Result<GearSource, SimError> {
    pool.find(slot, name)
        .map(|piece| GearSource::new(slot, piece.clone()))
        .ok_or_else(|| SimError::InvalidSelection {
            slot: slot.to_string(),
        })
}
