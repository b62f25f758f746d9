//! Test module for scenario, determinism and property tests.
//!
//! # Test Structure
//!
//! - `helpers.rs`: Factory functions for soldiers, platoons and battlefields
//! - `integration.rs`: End-to-end battles through the public API
//! - `determinism.rs`: Same seed, same battle
//! - `properties.rs`: `proptest` checks of the damage model and attack policies

mod helpers;
mod properties;

// Re-export for convenience
pub use helpers::*;
