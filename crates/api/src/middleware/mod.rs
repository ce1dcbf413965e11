//! Request extractors supplied by the host.
//!
//! - [`caller::Caller`] -- the authenticated principal for the call.

pub mod caller;
