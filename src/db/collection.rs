//! Saved-plant collection stored as one serialized list under a fixed key.
//!
//! Updates read the whole list, modify it, and write it back. There is no
//! cross-process locking; a single writer is assumed. Records that no
//! longer decode are hidden from reads but written back untouched.

use crate::error::{LeafLensError, Result};
use crate::models::{ImageRef, PlantIdentification, SavedPlant};
use serde_json::Value;
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::Mutex;

pub const COLLECTION_KEY: &str = "leaflens_saved_plants";

/// Minimal string key-value backend.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub trait PlantCollection {
    /// Saved plants in the order they were added.
    fn all(&self) -> Result<Vec<SavedPlant>>;
    fn append(&self, plant: SavedPlant) -> Result<()>;
    /// Returns false when no record has `id`.
    fn remove(&self, id: &str) -> Result<bool>;

    fn find(&self, id: &str) -> Result<SavedPlant> {
        self.all()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| LeafLensError::NotFound(format!("saved plant {}", id)))
    }
}

/// Create a record with a fresh id and timestamp and add it to the collection.
pub fn save_plant(
    collection: &dyn PlantCollection,
    plant: PlantIdentification,
    image: ImageRef,
) -> Result<SavedPlant> {
    let record = SavedPlant::new(plant, image);
    collection.append(record.clone())?;
    tracing::info!(id = %record.id, plant = %record.plant.name, "Saved plant");
    Ok(record)
}

pub struct KeyValueCollection<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KeyValueCollection<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, COLLECTION_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Stored records as raw JSON, undecodable ones included. Fails when
    /// the entry is not a JSON list so that writers never replace it.
    fn records(&self) -> Result<Vec<Value>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|e| {
            LeafLensError::InvalidData(format!(
                "saved collection under {} is unreadable: {}",
                self.key, e
            ))
        })
    }

    fn write(&self, records: &[Value]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.store.set(&self.key, &json)
    }
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

impl<S: KeyValueStore> PlantCollection for KeyValueCollection<S> {
    fn all(&self) -> Result<Vec<SavedPlant>> {
        let records = match self.records() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("{}, treating as empty", e);
                return Ok(Vec::new());
            }
        };

        let plants = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value(record) {
                Ok(plant) => Some(plant),
                Err(e) => {
                    tracing::warn!(key = %self.key, "Skipping unreadable saved plant: {}", e);
                    None
                }
            })
            .collect();
        Ok(plants)
    }

    fn append(&self, plant: SavedPlant) -> Result<()> {
        let mut records = self.records()?;
        if records.iter().any(|r| record_id(r) == Some(plant.id.as_str())) {
            return Err(LeafLensError::InvalidData(format!(
                "duplicate saved plant id {}",
                plant.id
            )));
        }
        records.push(serde_json::to_value(&plant)?);
        self.write(&records)
    }

    fn remove(&self, id: &str) -> Result<bool> {
        let mut records = self.records()?;
        let before = records.len();
        records.retain(|r| record_id(r) != Some(id));
        if records.len() == before {
            return Ok(false);
        }
        self.write(&records)?;
        Ok(true)
    }
}

/// Process-local store for exercising collections without SQLite.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| LeafLensError::InvalidData("memory store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| LeafLensError::InvalidData("memory store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
