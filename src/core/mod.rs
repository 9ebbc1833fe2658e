//! Core abstractions shared across pomo features.

pub mod traits;

pub use traits::{KeyValueStore, MemoryStore};
