//! Custody registry HTTP host.
//!
//! Plays the host role for `custody_core`: authenticates callers from the
//! `x-principal` header, assigns heights, serializes every operation through
//! a single [`ledger::Ledger`] and publishes committed transitions on the
//! event bus. Exposed as a library so integration tests and the binary share
//! the same router.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod ledger;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
