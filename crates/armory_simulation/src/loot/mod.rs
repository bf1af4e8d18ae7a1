//! Loot module - weighted randomness
//!
//! - `roller` - biased stat rolls (exponent curve)
//! - `selector` - weighted pick по всем registries
//! - `systems` - SpawnLootRequest → spawn request

pub mod roller;
pub mod selector;
pub mod systems;

#[cfg(test)]
mod selector_tests;

pub use roller::*;
pub use selector::*;
pub use systems::*;
