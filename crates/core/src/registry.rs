//! Registry state and its state-transition operations.
//!
//! [`Registry`] owns the sequence counter, the mode flags, the asset store
//! and the access matrix. Each public method is one atomic transition: every
//! check runs before the first write, so a returned error means nothing
//! changed.

use serde::{Deserialize, Serialize};

use crate::access::AccessMatrix;
use crate::error::{RegistryError, RegistryResult};
use crate::store::{AssetRecord, AssetStore};
use crate::types::{AssetId, CallContext, Height, Principal};
use crate::validation::{
    ensure_capacity, ensure_descriptor, ensure_marker_set, ensure_summary, marker_set_valid,
    MAX_MARKERS,
};

// ---------------------------------------------------------------------------
// Sentinel markers
// ---------------------------------------------------------------------------

/// Marker appended by [`Registry::archive`].
pub const ARCHIVED_MARKER: &str = "ARCHIVED-STATUS";

/// Marker appended by [`Registry::restrict`].
pub const RESTRICTED_MARKER: &str = "ACCESS-RESTRICTED";

// ---------------------------------------------------------------------------
// Inputs and receipts
// ---------------------------------------------------------------------------

/// The caller-editable fields of an asset, as submitted to register/modify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDraft {
    pub content_descriptor: String,
    pub storage_capacity: u64,
    pub summary: String,
    pub classification_markers: Vec<String>,
}

impl AssetDraft {
    /// Validate every field, in argument order.
    fn validate(&self) -> RegistryResult<()> {
        ensure_descriptor(&self.content_descriptor)?;
        ensure_capacity(self.storage_capacity)?;
        ensure_summary(&self.summary)?;
        ensure_marker_set(&self.classification_markers)
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub asset_id: AssetId,
    pub height: Height,
    pub custodian: Principal,
}

/// Result of any other successful mutation on an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub asset_id: AssetId,
    pub height: Height,
}

/// Result of flipping one of the registry mode flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagChange {
    pub enabled: bool,
    pub height: Height,
}

/// Snapshot of the registry-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStatus {
    pub sequence_counter: AssetId,
    pub active: bool,
    pub maintenance: bool,
    pub live_assets: usize,
    pub executive: Principal,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The whole registry state, passed by `&mut` into every transition.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Last issued asset id; 0 before the first registration.
    sequence_counter: AssetId,
    active: bool,
    maintenance: bool,
    executive: Principal,
    assets: AssetStore,
    access: AccessMatrix,
}

impl Registry {
    /// Create an empty, active registry with the given executive principal.
    pub fn new(executive: impl Into<Principal>) -> Self {
        Self {
            sequence_counter: 0,
            active: true,
            maintenance: false,
            executive: executive.into(),
            assets: AssetStore::new(),
            access: AccessMatrix::new(),
        }
    }

    /// Builder-style override of the initial activation flag.
    pub fn with_activation(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn sequence_counter(&self) -> AssetId {
        self.sequence_counter
    }

    pub fn executive(&self) -> &Principal {
        &self.executive
    }

    pub fn status(&self) -> RegistryStatus {
        RegistryStatus {
            sequence_counter: self.sequence_counter,
            active: self.active,
            maintenance: self.maintenance,
            live_assets: self.assets.len(),
            executive: self.executive.clone(),
        }
    }

    // -- Guards ---------------------------------------------------------------

    fn is_executive(&self, principal: &Principal) -> bool {
        &self.executive == principal
    }

    /// Look up `id` and require the caller to be its custodian.
    fn custodied(&self, id: AssetId, caller: &Principal) -> RegistryResult<&AssetRecord> {
        let record = self.assets.get(id)?;
        if &record.custodian != caller {
            return Err(RegistryError::OwnershipMismatch(id));
        }
        Ok(record)
    }

    /// Look up `id` and require the caller to be the custodian, a granted
    /// principal, or the executive.
    pub(crate) fn readable(&self, id: AssetId, caller: &Principal) -> RegistryResult<&AssetRecord> {
        let record = self.assets.get(id)?;
        let allowed = &record.custodian == caller
            || self.access.has_access(id, caller)
            || self.is_executive(caller);
        if !allowed {
            return Err(RegistryError::PrivilegeViolation(format!(
                "{caller} has no read access to asset #{id}"
            )));
        }
        Ok(record)
    }

    /// Whether `principal` passes the read gate on `id`. False for absent ids.
    pub fn can_read(&self, id: AssetId, principal: &Principal) -> bool {
        self.readable(id, principal).is_ok()
    }

    fn require_executive(&self, caller: &Principal) -> RegistryResult<()> {
        if !self.is_executive(caller) {
            return Err(RegistryError::AuthorizationRequired(format!(
                "{caller} is not the registry executive"
            )));
        }
        Ok(())
    }

    // -- Administration -------------------------------------------------------

    /// Turn new registrations on or off. Executive only.
    pub fn set_activation(&mut self, ctx: &CallContext, active: bool) -> RegistryResult<FlagChange> {
        self.require_executive(&ctx.caller)?;
        self.active = active;
        Ok(FlagChange {
            enabled: active,
            height: ctx.height,
        })
    }

    /// Enter or leave maintenance mode. Executive only.
    pub fn set_maintenance(
        &mut self,
        ctx: &CallContext,
        enabled: bool,
    ) -> RegistryResult<FlagChange> {
        self.require_executive(&ctx.caller)?;
        self.maintenance = enabled;
        Ok(FlagChange {
            enabled,
            height: ctx.height,
        })
    }

    // -- Lifecycle ------------------------------------------------------------

    /// Register a new asset with the caller as custodian.
    pub fn register(&mut self, ctx: &CallContext, draft: AssetDraft) -> RegistryResult<Registration> {
        if !self.active {
            return Err(RegistryError::AuthorizationRequired(
                "registry is not active".into(),
            ));
        }
        if self.maintenance {
            return Err(RegistryError::AuthorizationRequired(
                "registry is in maintenance mode".into(),
            ));
        }
        draft.validate()?;

        let asset_id = self.sequence_counter + 1;
        let record = AssetRecord {
            asset_id,
            content_descriptor: draft.content_descriptor,
            custodian: ctx.caller.clone(),
            storage_capacity: draft.storage_capacity,
            created_at: ctx.height,
            summary: draft.summary,
            classification_markers: draft.classification_markers,
        };
        self.assets.insert(asset_id, record)?;
        self.access.grant(asset_id, &ctx.caller);
        self.sequence_counter = asset_id;

        Ok(Registration {
            asset_id,
            height: ctx.height,
            custodian: ctx.caller.clone(),
        })
    }

    /// Replace descriptor, capacity, summary and markers. Custodian and
    /// `created_at` are left untouched.
    pub fn modify(
        &mut self,
        ctx: &CallContext,
        id: AssetId,
        draft: AssetDraft,
    ) -> RegistryResult<Receipt> {
        let current = self.custodied(id, &ctx.caller)?;
        draft.validate()?;

        let updated = AssetRecord {
            content_descriptor: draft.content_descriptor,
            storage_capacity: draft.storage_capacity,
            summary: draft.summary,
            classification_markers: draft.classification_markers,
            ..current.clone()
        };
        self.assets.update(id, updated)?;

        Ok(Receipt {
            asset_id: id,
            height: ctx.height,
        })
    }

    /// Move custodianship to `successor`.
    ///
    /// The successor is granted access. The previous custodian's grant is
    /// kept; it has to be revoked explicitly by the new custodian.
    pub fn transfer_ownership(
        &mut self,
        ctx: &CallContext,
        id: AssetId,
        successor: &Principal,
    ) -> RegistryResult<Receipt> {
        let current = self.custodied(id, &ctx.caller)?;
        if successor == &ctx.caller {
            return Err(RegistryError::PrivilegeViolation(
                "cannot transfer an asset to its current custodian".into(),
            ));
        }

        let updated = AssetRecord {
            custodian: successor.clone(),
            ..current.clone()
        };
        self.assets.update(id, updated)?;
        self.access.grant(id, successor);

        Ok(Receipt {
            asset_id: id,
            height: ctx.height,
        })
    }

    /// Delete the asset record. Its access grants are left in place but are
    /// unreachable, since ids are never reissued.
    pub fn destroy(&mut self, ctx: &CallContext, id: AssetId) -> RegistryResult<Receipt> {
        self.custodied(id, &ctx.caller)?;
        self.assets.remove(id)?;

        Ok(Receipt {
            asset_id: id,
            height: ctx.height,
        })
    }

    // -- Access ---------------------------------------------------------------

    pub fn grant_access(
        &mut self,
        ctx: &CallContext,
        id: AssetId,
        beneficiary: &Principal,
    ) -> RegistryResult<Receipt> {
        self.custodied(id, &ctx.caller)?;
        if beneficiary == &ctx.caller {
            return Err(RegistryError::PrivilegeViolation(
                "custodian cannot grant access to itself".into(),
            ));
        }
        self.access.grant(id, beneficiary);

        Ok(Receipt {
            asset_id: id,
            height: ctx.height,
        })
    }

    /// Remove `subject`'s grant. Self-revocation is rejected as
    /// `AuthorizationRequired`, unlike self-grant which is a
    /// `PrivilegeViolation`.
    pub fn revoke_access(
        &mut self,
        ctx: &CallContext,
        id: AssetId,
        subject: &Principal,
    ) -> RegistryResult<Receipt> {
        self.custodied(id, &ctx.caller)?;
        if subject == &ctx.caller {
            return Err(RegistryError::AuthorizationRequired(
                "custodian cannot revoke its own access".into(),
            ));
        }
        self.access.revoke(id, subject);

        Ok(Receipt {
            asset_id: id,
            height: ctx.height,
        })
    }

    // -- Classification -------------------------------------------------------

    /// Append `extra` after the current markers, preserving order.
    pub fn augment_markers(
        &mut self,
        ctx: &CallContext,
        id: AssetId,
        extra: Vec<String>,
    ) -> RegistryResult<Receipt> {
        let current = self.custodied(id, &ctx.caller)?;
        if !marker_set_valid(&extra) {
            return Err(RegistryError::ClassificationRejected(
                "additional markers must form a valid marker set".into(),
            ));
        }
        let combined = current.classification_markers.len() + extra.len();
        if combined > MAX_MARKERS {
            return Err(RegistryError::ClassificationRejected(format!(
                "asset #{id} would carry {combined} markers, limit is {MAX_MARKERS}"
            )));
        }

        let mut updated = current.clone();
        updated.classification_markers.extend(extra);
        self.assets.update(id, updated)?;

        Ok(Receipt {
            asset_id: id,
            height: ctx.height,
        })
    }

    /// Tag the asset with [`ARCHIVED_MARKER`]. Custodian only.
    pub fn archive(&mut self, ctx: &CallContext, id: AssetId) -> RegistryResult<Receipt> {
        self.custodied(id, &ctx.caller)?;
        self.append_sentinel(ctx, id, ARCHIVED_MARKER)
    }

    /// Tag the asset with [`RESTRICTED_MARKER`]. Custodian or executive.
    pub fn restrict(&mut self, ctx: &CallContext, id: AssetId) -> RegistryResult<Receipt> {
        let record = self.assets.get(id)?;
        if record.custodian != ctx.caller && !self.is_executive(&ctx.caller) {
            return Err(RegistryError::AuthorizationRequired(format!(
                "only the custodian or the executive may restrict asset #{id}"
            )));
        }
        self.append_sentinel(ctx, id, RESTRICTED_MARKER)
    }

    fn append_sentinel(
        &mut self,
        ctx: &CallContext,
        id: AssetId,
        marker: &str,
    ) -> RegistryResult<Receipt> {
        let mut updated = self.assets.get(id)?.clone();
        if updated.classification_markers.len() >= MAX_MARKERS {
            return Err(RegistryError::ClassificationRejected(format!(
                "asset #{id} already carries {MAX_MARKERS} markers"
            )));
        }
        updated.classification_markers.push(marker.to_string());
        self.assets.update(id, updated)?;

        Ok(Receipt {
            asset_id: id,
            height: ctx.height,
        })
    }

    // -- Reads ----------------------------------------------------------------

    /// Full record, gated like analytics.
    pub fn asset(&self, ctx: &CallContext, id: AssetId) -> RegistryResult<&AssetRecord> {
        self.readable(id, &ctx.caller)
    }

    /// Whether `principal` holds a grant on `id`, gated like analytics.
    pub fn access_of(
        &self,
        ctx: &CallContext,
        id: AssetId,
        principal: &Principal,
    ) -> RegistryResult<bool> {
        self.readable(id, &ctx.caller)?;
        Ok(self.access.has_access(id, principal))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
