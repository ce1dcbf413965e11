pub mod access;
pub mod assets;
pub mod events;
pub mod registry;
