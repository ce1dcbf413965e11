//! Read-only derived views over a single asset.
//!
//! Both views use the registry's read gate: the caller must be the
//! custodian, hold a grant, or be the executive.

use serde::{Deserialize, Serialize};

use crate::error::RegistryResult;
use crate::registry::Registry;
use crate::types::{AssetId, CallContext, Height, Principal};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAnalytics {
    /// Blocks elapsed since registration.
    pub tenure: Height,
    pub storage_capacity: u64,
    pub marker_count: usize,
    pub created_at: Height,
    pub current_height: Height,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticityCheck {
    /// Whether the claimed custodian is the actual one.
    pub matches: bool,
    pub tenure: Height,
}

impl Registry {
    pub fn analytics(&self, ctx: &CallContext, id: AssetId) -> RegistryResult<AssetAnalytics> {
        let record = self.readable(id, &ctx.caller)?;
        Ok(AssetAnalytics {
            tenure: ctx.height.saturating_sub(record.created_at),
            storage_capacity: record.storage_capacity,
            marker_count: record.classification_markers.len(),
            created_at: record.created_at,
            current_height: ctx.height,
        })
    }

    /// Compare `claimed_custodian` with the actual custodian. A mismatch is a
    /// `false` result, not an error.
    pub fn verify_authenticity(
        &self,
        ctx: &CallContext,
        id: AssetId,
        claimed_custodian: &Principal,
    ) -> RegistryResult<AuthenticityCheck> {
        let record = self.readable(id, &ctx.caller)?;
        Ok(AuthenticityCheck {
            matches: &record.custodian == claimed_custodian,
            tenure: ctx.height.saturating_sub(record.created_at),
        })
    }
}
