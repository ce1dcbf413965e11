//! Authoritative mapping from asset id to asset record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};
use crate::types::{AssetId, Height, Principal};

/// A live asset record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub asset_id: AssetId,
    pub content_descriptor: String,
    pub custodian: Principal,
    pub storage_capacity: u64,
    /// Height at registration. Never changes.
    pub created_at: Height,
    pub summary: String,
    pub classification_markers: Vec<String>,
}

/// Asset records keyed by id.
///
/// Iteration is in id order, so listings are deterministic.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    records: BTreeMap<AssetId, AssetRecord>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record under `id`. Fails if the id is already taken.
    pub fn insert(&mut self, id: AssetId, record: AssetRecord) -> RegistryResult<()> {
        if self.records.contains_key(&id) {
            return Err(RegistryError::DuplicateRegistration(id));
        }
        self.records.insert(id, record);
        Ok(())
    }

    pub fn get(&self, id: AssetId) -> RegistryResult<&AssetRecord> {
        self.records.get(&id).ok_or(RegistryError::MissingEntry(id))
    }

    /// Replace the record stored under `id` wholesale.
    pub fn update(&mut self, id: AssetId, record: AssetRecord) -> RegistryResult<()> {
        let slot = self
            .records
            .get_mut(&id)
            .ok_or(RegistryError::MissingEntry(id))?;
        *slot = record;
        Ok(())
    }

    pub fn remove(&mut self, id: AssetId) -> RegistryResult<AssetRecord> {
        self.records
            .remove(&id)
            .ok_or(RegistryError::MissingEntry(id))
    }

    pub fn contains(&self, id: AssetId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
