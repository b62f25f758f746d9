//! # Platoon Core
//!
//! Turn-based battle simulation between two platoons of soldiers.
//!
//! This crate provides the combat-resolution engine: the armor mitigation
//! curve, the per-kind attack policies, the round/role state machine of a
//! battle, and the soldier lifecycle (cloning from templates, death, removal).
//!
//! ## Architecture
//!
//! - **Soldiers** ([`soldier`]): health, armor, damage and an attack policy
//!   (basic, sniper, stormtrooper, supporter) held as data in an enum
//! - **Platoons** ([`platoon`]): named, ordered groups that drop their dead
//!   after every action
//! - **Battlefield** ([`battlefield`]): attacker/defender roles, rounds, and
//!   the fight loop
//! - **Setup** ([`cloner`], [`config`]): templates and the rosters built from them
//! - **Batches** ([`batch`]): many seeded battles in parallel
//!
//! Everything inside one battle is single-threaded and deterministic for a
//! given seed.
//!
//! ## Usage
//!
//! ```
//! use platoon_core::BattleConfig;
//!
//! let config = BattleConfig::default();
//! let mut battlefield = config.build_battlefield(Some(42)).unwrap();
//! let outcome = battlefield.fight(config.max_rounds).unwrap();
//!
//! assert!(outcome.winner.is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod battlefield;
pub mod cloner;
pub mod config;
pub mod error;
pub mod platoon;
pub mod rng;
pub mod soldier;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use batch::{simulate_many, BatchSummary};
pub use battlefield::{BattleOutcome, BattleState, Battlefield, RoundReport};
pub use cloner::clone_soldiers;
pub use config::{BattleConfig, ConfigError};
pub use error::{BattleError, Result};
pub use platoon::Platoon;
pub use rng::RandomSource;
pub use soldier::{absorbed_damage, Damageable, Hit, Soldier, SoldierId, SoldierKind};
