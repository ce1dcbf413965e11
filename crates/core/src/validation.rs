//! Field validators for asset records.
//!
//! The `*_valid` predicates are total and side-effect free. The `ensure_*`
//! helpers translate a failed predicate into the matching [`RegistryError`]
//! so registry operations can chain them with `?`.
//!
//! All lengths are measured in bytes.

use crate::error::{RegistryError, RegistryResult};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum length of a content descriptor.
pub const MAX_DESCRIPTOR_LEN: usize = 64;

/// Maximum length of a summary.
pub const MAX_SUMMARY_LEN: usize = 128;

/// Maximum length of a single classification marker.
pub const MAX_MARKER_LEN: usize = 32;

/// Maximum number of classification markers on one asset.
pub const MAX_MARKERS: usize = 10;

/// Exclusive upper bound for `storage_capacity`.
pub const OPERATIONAL_THRESHOLD: u64 = 1_000_000_000;

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

pub fn descriptor_valid(s: &str) -> bool {
    (1..=MAX_DESCRIPTOR_LEN).contains(&s.len())
}

pub fn summary_valid(s: &str) -> bool {
    (1..=MAX_SUMMARY_LEN).contains(&s.len())
}

pub fn capacity_valid(n: u64) -> bool {
    (1..OPERATIONAL_THRESHOLD).contains(&n)
}

pub fn marker_valid(tag: &str) -> bool {
    (1..=MAX_MARKER_LEN).contains(&tag.len())
}

/// A marker set must hold 1 to [`MAX_MARKERS`] entries, each individually valid.
pub fn marker_set_valid<S: AsRef<str>>(markers: &[S]) -> bool {
    (1..=MAX_MARKERS).contains(&markers.len()) && markers.iter().all(|m| marker_valid(m.as_ref()))
}

// ---------------------------------------------------------------------------
// Error-returning wrappers
// ---------------------------------------------------------------------------

pub fn ensure_descriptor(s: &str) -> RegistryResult<()> {
    if !descriptor_valid(s) {
        return Err(RegistryError::DescriptorInvalid(format!(
            "content descriptor must be 1-{MAX_DESCRIPTOR_LEN} bytes, got {}",
            s.len()
        )));
    }
    Ok(())
}

/// Summaries share the descriptor error kind.
pub fn ensure_summary(s: &str) -> RegistryResult<()> {
    if !summary_valid(s) {
        return Err(RegistryError::DescriptorInvalid(format!(
            "summary must be 1-{MAX_SUMMARY_LEN} bytes, got {}",
            s.len()
        )));
    }
    Ok(())
}

pub fn ensure_capacity(n: u64) -> RegistryResult<()> {
    if !capacity_valid(n) {
        return Err(RegistryError::CapacityExceeded(n));
    }
    Ok(())
}

pub fn ensure_marker_set<S: AsRef<str>>(markers: &[S]) -> RegistryResult<()> {
    if !marker_set_valid(markers) {
        return Err(RegistryError::ClassificationRejected(format!(
            "expected 1-{MAX_MARKERS} markers of 1-{MAX_MARKER_LEN} bytes each, got {} markers",
            markers.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
