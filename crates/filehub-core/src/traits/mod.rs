//! Core trait definitions.

pub mod store;

pub use store::KeyValueStore;
