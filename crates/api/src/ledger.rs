//! Host-side ledger: the registry plus the height counter.
//!
//! Reads execute at the current height. A write executes at `height + 1`
//! and the new height is committed only if the operation succeeds, so a
//! rejected call leaves both the registry and the height untouched. A
//! ledger already at `Height::MAX` refuses every write.
//!
//! The ledger is shared as `Arc<Mutex<Ledger>>`; holding the lock for the
//! whole call is what serializes operations.

use custody_core::error::RegistryResult;
use custody_core::registry::Registry;
use custody_core::types::{CallContext, Height, Principal};

use crate::error::{AppError, AppResult};

#[derive(Debug)]
pub struct Ledger {
    registry: Registry,
    height: Height,
}

impl Ledger {
    pub fn new(registry: Registry, genesis_height: Height) -> Self {
        Self {
            registry,
            height: genesis_height,
        }
    }

    pub fn height(&self) -> Height {
        self.height
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Context for a read-only call at the current height.
    pub fn read_context(&self, caller: Principal) -> CallContext {
        CallContext {
            caller,
            height: self.height,
        }
    }

    /// Run a read-only registry query at the current height.
    pub fn query<T>(
        &self,
        caller: Principal,
        op: impl FnOnce(&Registry, &CallContext) -> RegistryResult<T>,
    ) -> RegistryResult<T> {
        let ctx = self.read_context(caller);
        op(&self.registry, &ctx).inspect_err(|e| {
            tracing::debug!(
                caller = %ctx.caller,
                height = ctx.height,
                code = e.code(),
                error = %e,
                "Registry query rejected",
            );
        })
    }

    /// Run a state-changing registry operation at the next height.
    pub fn commit<T>(
        &mut self,
        caller: Principal,
        op: impl FnOnce(&mut Registry, &CallContext) -> RegistryResult<T>,
    ) -> AppResult<(T, CallContext)> {
        let height = self.height.checked_add(1).ok_or_else(|| {
            AppError::InternalError(format!("ledger height exhausted at {}", self.height))
        })?;
        let ctx = CallContext { caller, height };
        match op(&mut self.registry, &ctx) {
            Ok(out) => {
                self.height = ctx.height;
                Ok((out, ctx))
            }
            Err(e) => {
                tracing::debug!(
                    caller = %ctx.caller,
                    height = ctx.height,
                    code = e.code(),
                    error = %e,
                    "Registry operation rejected",
                );
                Err(e.into())
            }
        }
    }
}
