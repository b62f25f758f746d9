//! Test helper functions for setting up battles.
//!
//! This module provides factory functions that make writing tests more
//! ergonomic and consistent.

use crate::battlefield::Battlefield;
use crate::platoon::Platoon;
use crate::rng::RandomSource;
use crate::soldier::{Damageable, Soldier};

// =============================================================================
// Soldier and Platoon Factories
// =============================================================================

/// Creates `count` identical basic soldiers.
pub fn basic_soldiers(count: usize, health: u32, armor: u32, damage: u32) -> Vec<Soldier> {
    (0..count)
        .map(|_| Soldier::basic(health, armor, damage).unwrap())
        .collect()
}

/// Creates a platoon, panicking on invalid input.
pub fn platoon(name: &str, soldiers: Vec<Soldier>) -> Platoon {
    Platoon::new(name, soldiers).unwrap()
}

/// The classic one-on-one duel: two basic soldiers with
/// health 100, armor 50 and damage 50.
///
/// # Returns
///
/// A battlefield with "Red" attacking "Blue".
pub fn setup_duel(seed: u64) -> Battlefield {
    Battlefield::new(
        platoon("Red", basic_soldiers(1, 100, 50, 50)),
        platoon("Blue", basic_soldiers(1, 100, 50, 50)),
        RandomSource::new(seed),
    )
}

/// A mixed skirmish with one soldier of every kind on each side.
pub fn setup_skirmish(seed: u64) -> Battlefield {
    let roster = || {
        vec![
            Soldier::basic(100, 60, 50).unwrap(),
            Soldier::sniper(1.6, 100, 45, 45).unwrap(),
            Soldier::stormtrooper(5, true, 100, 40, 45).unwrap(),
            Soldier::stormtrooper(3, false, 100, 40, 45).unwrap(),
            Soldier::supporter(5, 100, 35, 40).unwrap(),
        ]
    };
    Battlefield::new(
        platoon("North", roster()),
        platoon("South", roster()),
        RandomSource::new(seed),
    )
}

// =============================================================================
// State Queries
// =============================================================================

/// Health of every living soldier in turn order.
pub fn healths(platoon: &Platoon) -> Vec<u32> {
    platoon.soldiers().iter().map(Damageable::health).collect()
}
