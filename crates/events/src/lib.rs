//! Registry event bus and in-memory journal.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`RegistryEvent`]: envelope describing one committed registry transition.
//! - [`EventJournal`]: bounded in-memory log of recent events, fed by a
//!   background subscriber task.

pub mod bus;
pub mod journal;

pub use bus::{EventBus, RegistryEvent};
pub use journal::EventJournal;
