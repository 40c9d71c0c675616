//! Named scaled-value attributes for entities.
//!
//! Replaces ad hoc dynamic field access with an explicit store: each entity
//! holds a map of attribute name to fixed-point value. `BTreeMap` keeps
//! iteration order deterministic so serialized snapshots are stable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-entity named attribute store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeStore {
    entities: BTreeMap<u64, BTreeMap<String, u128>>,
}

impl AttributeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, creating the entity entry if needed.
    ///
    /// Returns the previous value when the attribute already existed.
    pub fn set(&mut self, entity_id: u64, name: impl Into<String>, value: u128) -> Option<u128> {
        self.entities
            .entry(entity_id)
            .or_default()
            .insert(name.into(), value)
    }

    /// Read an attribute value.
    #[must_use]
    pub fn get(&self, entity_id: u64, name: &str) -> Option<u128> {
        self.entities.get(&entity_id)?.get(name).copied()
    }

    /// Whether the entity has any attributes at all.
    #[must_use]
    pub fn contains_entity(&self, entity_id: u64) -> bool {
        self.entities.contains_key(&entity_id)
    }

    /// Remove a single attribute, returning its value if present.
    pub fn remove(&mut self, entity_id: u64, name: &str) -> Option<u128> {
        let attrs = self.entities.get_mut(&entity_id)?;
        let removed = attrs.remove(name);
        if attrs.is_empty() {
            self.entities.remove(&entity_id);
        }
        removed
    }

    /// Drop an entity and all of its attributes.
    pub fn remove_entity(&mut self, entity_id: u64) -> bool {
        self.entities.remove(&entity_id).is_some()
    }

    /// Iterate an entity's attributes in name order.
    pub fn attributes(&self, entity_id: u64) -> impl Iterator<Item = (&str, u128)> {
        self.entities
            .get(&entity_id)
            .into_iter()
            .flat_map(|attrs| attrs.iter().map(|(name, value)| (name.as_str(), *value)))
    }

    /// Number of entities with at least one attribute.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::PRECISION;

    #[test]
    fn test_set_and_get() {
        let mut store = AttributeStore::new();
        assert_eq!(store.set(1, "heat", 5 * PRECISION), None);
        assert_eq!(store.get(1, "heat"), Some(5 * PRECISION));
        assert_eq!(store.get(1, "respect"), None);
        assert_eq!(store.get(2, "heat"), None);
    }

    #[test]
    fn test_set_returns_previous_value() {
        let mut store = AttributeStore::new();
        store.set(7, "influence", 100);
        assert_eq!(store.set(7, "influence", 250), Some(100));
        assert_eq!(store.get(7, "influence"), Some(250));
    }

    #[test]
    fn test_remove_last_attribute_drops_entity() {
        let mut store = AttributeStore::new();
        store.set(3, "heat", 1);
        assert_eq!(store.remove(3, "heat"), Some(1));
        assert!(!store.contains_entity(3));
        assert_eq!(store.remove(3, "heat"), None);
    }

    #[test]
    fn test_iteration_is_name_ordered() {
        let mut store = AttributeStore::new();
        store.set(9, "respect", 2);
        store.set(9, "heat", 1);
        store.set(9, "turf", 3);
        let names: Vec<&str> = store.attributes(9).map(|(name, _)| name).collect();
        assert_eq!(names, vec!["heat", "respect", "turf"]);
    }

    #[test]
    fn test_remove_entity() {
        let mut store = AttributeStore::new();
        store.set(4, "heat", 1);
        store.set(4, "respect", 2);
        assert!(store.remove_entity(4));
        assert_eq!(store.entity_count(), 0);
        assert!(!store.remove_entity(4));
    }
}
