//! Custody registry domain logic.
//!
//! Pure state machine for an asset registry with per-asset custodianship and
//! access grants. No I/O: the host supplies the caller identity and height
//! for every call through [`types::CallContext`] and is responsible for
//! serializing calls.

pub mod access;
pub mod analytics;
pub mod error;
pub mod registry;
pub mod store;
pub mod types;
pub mod validation;
