//! Per-asset access matrix.
//!
//! An absent `(asset, principal)` entry means "not granted". Entries are not
//! tied to the asset's lifetime: grants for a destroyed asset stay in the
//! matrix but can no longer be reached through any registry operation.

use std::collections::HashMap;

use crate::types::{AssetId, Principal};

#[derive(Debug, Clone, Default)]
pub struct AccessMatrix {
    grants: HashMap<(AssetId, Principal), bool>,
}

impl AccessMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grant flag for `(asset_id, principal)`. Idempotent.
    pub fn grant(&mut self, asset_id: AssetId, principal: &Principal) {
        self.grants.insert((asset_id, principal.clone()), true);
    }

    /// Remove the entry for `(asset_id, principal)`, if any.
    pub fn revoke(&mut self, asset_id: AssetId, principal: &Principal) {
        self.grants.remove(&(asset_id, principal.clone()));
    }

    pub fn has_access(&self, asset_id: AssetId, principal: &Principal) -> bool {
        self.grants
            .get(&(asset_id, principal.clone()))
            .copied()
            .unwrap_or(false)
    }

    /// Number of stored entries, including inert ones for destroyed assets.
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}
