//! Soldiers: the combatants that make up a platoon.
//!
//! This module provides:
//! - [`SoldierId`]: identifier of a soldier within its platoon
//! - [`SoldierKind`]: the closed set of attack policies with their parameters
//! - [`Soldier`]: one fighter with health, armor and damage
//! - [`Damageable`]: the seam between an attack policy and whatever it hits
//! - [`absorbed_damage`]: the armor mitigation curve
//!
//! # Death signal
//!
//! A soldier never holds a reference to its platoon. Instead
//! [`Damageable::take_damage`] returns a [`DamageTaken`] whose `died` flag is
//! set on exactly one call: the one that brought health to zero. The owning
//! platoon inspects the outcome and removes the dead soldier itself.
//!
//! # Example
//!
//! ```
//! use platoon_core::soldier::{Damageable, Soldier};
//!
//! let mut soldier = Soldier::basic(100, 50, 50).unwrap();
//! let taken = soldier.take_damage(50).unwrap();
//!
//! assert_eq!(taken.absorbed, 25);
//! assert_eq!(soldier.health(), 75);
//! assert!(!taken.died);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ensure_positive, BattleError, Result};
use crate::rng::RandomSource;

/// Identifier of a soldier within its platoon.
///
/// Ids are assigned by [`crate::Platoon::new`] from the soldier's position in
/// the initial roster and stay the same when other soldiers are removed.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SoldierId(u32);

impl SoldierId {
    /// Creates a new `SoldierId` from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value of this identifier.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SoldierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SoldierId({})", self.0)
    }
}

impl fmt::Display for SoldierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Attack policy of a soldier, carrying its numeric parameters.
///
/// The variants differ only in how many targets an action hits and which
/// targets are excluded from later rolls in the same action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SoldierKind {
    /// One hit on a random live target.
    Basic,
    /// One hit on a random live target for `floor(damage * multiplier)`.
    Sniper {
        /// Damage multiplier, at least 1
        multiplier: f64,
    },
    /// Up to `attacks` hits, re-rolling the target for every hit.
    Stormtrooper {
        /// Maximum hits per action
        attacks: u32,
        /// Whether one action may hit the same target more than once
        can_damage_same: bool,
    },
    /// Up to `attacks` hits, never hitting the same target twice in one action.
    Supporter {
        /// Maximum hits per action
        attacks: u32,
    },
}

impl SoldierKind {
    /// Returns the lowercase name of this kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Sniper { .. } => "sniper",
            Self::Stormtrooper { .. } => "stormtrooper",
            Self::Supporter { .. } => "supporter",
        }
    }

    /// Maximum number of hits in one action.
    const fn max_hits(&self) -> u32 {
        match self {
            Self::Basic | Self::Sniper { .. } => 1,
            Self::Stormtrooper { attacks, .. } | Self::Supporter { attacks } => *attacks,
        }
    }

    /// Whether a target leaves the pool once it has been hit.
    const fn excludes_hit_targets(&self) -> bool {
        match self {
            Self::Stormtrooper { can_damage_same, .. } => !*can_damage_same,
            Self::Basic | Self::Sniper { .. } | Self::Supporter { .. } => true,
        }
    }

    /// Raw damage of one hit for a soldier with base damage `base`.
    fn scaled_damage(&self, base: u32) -> f64 {
        match *self {
            Self::Sniper { multiplier } => floor_product(base, multiplier),
            Self::Basic | Self::Stormtrooper { .. } | Self::Supporter { .. } => f64::from(base),
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            Self::Basic => Ok(()),
            Self::Sniper { multiplier } => {
                // Written so that NaN is rejected too.
                if multiplier >= 1.0 && multiplier.is_finite() {
                    Ok(())
                } else {
                    Err(BattleError::MultiplierBelowOne(multiplier))
                }
            }
            Self::Stormtrooper { attacks, .. } | Self::Supporter { attacks } => {
                ensure_positive("attacks", i64::from(attacks))
            }
        }
    }
}

impl fmt::Display for SoldierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a single [`Damageable::take_damage`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageTaken {
    /// Damage that got through the armor
    pub absorbed: u32,
    /// Health after the hit
    pub health: u32,
    /// True only on the call that brought health to zero
    pub died: bool,
}

/// Something an attack policy can target.
///
/// [`Soldier`] is the only production implementation; the trait exists so
/// policies can be exercised against recording doubles.
pub trait Damageable {
    /// Identifier reported in hits against this target.
    fn id(&self) -> SoldierId;

    /// Current health.
    fn health(&self) -> u32;

    /// Returns true while health is above zero.
    fn is_alive(&self) -> bool {
        self.health() > 0
    }

    /// Applies raw damage after armor mitigation.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::NegativeDamage`] if `amount` is negative.
    fn take_damage(&mut self, amount: i32) -> Result<DamageTaken>;
}

/// One damage application by one attacker against one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    /// Soldier that attacked
    pub attacker: SoldierId,
    /// Soldier that was hit
    pub target: SoldierId,
    /// Raw damage before armor
    pub damage: u32,
    /// Damage that got through the armor
    pub absorbed: u32,
    /// Target health after the hit
    pub target_health: u32,
    /// Whether this hit killed the target
    pub killed: bool,
}

/// Damage that gets through `armor` when hit for `amount`.
///
/// Computed as `floor(amount² / (amount + armor))`: mitigation grows with
/// armor and shrinks as raw damage grows relative to it. The result never
/// exceeds `amount`.
///
/// ```
/// use platoon_core::soldier::absorbed_damage;
///
/// assert_eq!(absorbed_damage(50, 50), 25);
/// assert_eq!(absorbed_damage(0, 10), 0);
/// assert_eq!(absorbed_damage(1, 50), 0);
/// ```
#[must_use]
pub fn absorbed_damage(amount: u32, armor: u32) -> u32 {
    if amount == 0 {
        return 0;
    }
    let amount = u64::from(amount);
    let absorbed = amount * amount / (amount + u64::from(armor));
    // absorbed <= amount, which came from a u32
    #[allow(clippy::cast_possible_truncation)]
    let absorbed = absorbed as u32;
    absorbed
}

/// `floor(base * multiplier)` as the decimal product would give it.
///
/// A multiplier such as 1.3 has no exact binary form, so `10 * 1.3` lands a
/// hair below or above 13. Products within a few ulps of an integer are taken
/// to be that integer before flooring.
fn floor_product(base: u32, multiplier: f64) -> f64 {
    let product = f64::from(base) * multiplier;
    let nearest = product.round();
    if (product - nearest).abs() <= product * 4.0 * f64::EPSILON {
        nearest
    } else {
        product.floor()
    }
}

/// A single fighter.
///
/// Armor, damage and kind never change after construction. Health only goes
/// down and is floored at zero; a soldier with zero health is dead, is never
/// targeted and never acts.
///
/// Cloning a soldier gives an independent copy with the same parameters and
/// the same current health.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Soldier {
    id: SoldierId,
    kind: SoldierKind,
    health: u32,
    armor: u32,
    damage: u32,
    #[serde(skip)]
    hit_damage: i32,
}

impl Soldier {
    /// Creates a soldier of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::NonPositive`] if health, armor, damage or the
    /// attack count is zero, [`BattleError::MultiplierBelowOne`] for a
    /// sniper multiplier below 1, and [`BattleError::DamageTooLarge`] if one
    /// hit would deal more than `i32::MAX`.
    pub fn new(kind: SoldierKind, health: u32, armor: u32, damage: u32) -> Result<Self> {
        ensure_positive("health", i64::from(health))?;
        ensure_positive("armor", i64::from(armor))?;
        ensure_positive("damage", i64::from(damage))?;
        kind.validate()?;

        let scaled = kind.scaled_damage(damage);
        if scaled > f64::from(i32::MAX) {
            return Err(BattleError::DamageTooLarge(scaled));
        }
        // Integral and within 1..=i32::MAX after the checks above.
        #[allow(clippy::cast_possible_truncation)]
        let hit_damage = scaled as i32;

        Ok(Self {
            id: SoldierId::default(),
            kind,
            health,
            armor,
            damage,
            hit_damage,
        })
    }

    /// Creates a basic soldier.
    ///
    /// # Errors
    ///
    /// See [`Soldier::new`].
    pub fn basic(health: u32, armor: u32, damage: u32) -> Result<Self> {
        Self::new(SoldierKind::Basic, health, armor, damage)
    }

    /// Creates a sniper.
    ///
    /// # Errors
    ///
    /// See [`Soldier::new`].
    pub fn sniper(multiplier: f64, health: u32, armor: u32, damage: u32) -> Result<Self> {
        Self::new(SoldierKind::Sniper { multiplier }, health, armor, damage)
    }

    /// Creates a stormtrooper.
    ///
    /// # Errors
    ///
    /// See [`Soldier::new`].
    pub fn stormtrooper(
        attacks: u32,
        can_damage_same: bool,
        health: u32,
        armor: u32,
        damage: u32,
    ) -> Result<Self> {
        Self::new(
            SoldierKind::Stormtrooper {
                attacks,
                can_damage_same,
            },
            health,
            armor,
            damage,
        )
    }

    /// Creates a supporter.
    ///
    /// # Errors
    ///
    /// See [`Soldier::new`].
    pub fn supporter(attacks: u32, health: u32, armor: u32, damage: u32) -> Result<Self> {
        Self::new(SoldierKind::Supporter { attacks }, health, armor, damage)
    }

    pub(crate) fn with_id(mut self, id: SoldierId) -> Self {
        self.id = id;
        self
    }

    /// Attack policy of this soldier.
    #[must_use]
    pub const fn kind(&self) -> SoldierKind {
        self.kind
    }

    /// Armor value.
    #[must_use]
    pub const fn armor(&self) -> u32 {
        self.armor
    }

    /// Base damage before any multiplier.
    #[must_use]
    pub const fn damage(&self) -> u32 {
        self.damage
    }

    /// Raw damage dealt by each hit of this soldier: the base damage, or
    /// `floor(damage * multiplier)` for a sniper.
    #[must_use]
    pub const fn hit_damage(&self) -> u32 {
        self.hit_damage.unsigned_abs()
    }

    /// Performs one action against `targets`.
    ///
    /// Targets are chosen uniformly at random from a private pool of the live
    /// entries of `targets`; the slice itself is never reordered or shrunk.
    /// A target leaves the pool when it dies, and also after any hit when the
    /// policy excludes repeat hits. The action ends early once the pool is
    /// empty. An empty `targets` slice, or a dead attacker, yields no hits.
    ///
    /// # Errors
    ///
    /// Propagates errors from the random source or from the targets.
    pub fn attack<T: Damageable>(
        &self,
        targets: &mut [T],
        rng: &mut RandomSource,
    ) -> Result<Vec<Hit>> {
        if !self.is_alive() {
            return Ok(Vec::new());
        }

        let mut pool: Vec<usize> = targets
            .iter()
            .enumerate()
            .filter(|(_, target)| target.is_alive())
            .map(|(index, _)| index)
            .collect();

        let budget = pool.len().min(self.kind.max_hits() as usize);
        let raw = self.hit_damage;
        let damage = self.hit_damage();
        let mut hits = Vec::with_capacity(budget);

        for _ in 0..budget {
            if pool.is_empty() {
                break;
            }

            let slot = rng.index(pool.len())?;
            let target = &mut targets[pool[slot]];
            let taken = target.take_damage(raw)?;

            debug!(
                attacker = %self.id,
                target = %target.id(),
                kind = %self.kind,
                damage,
                absorbed = taken.absorbed,
                health = taken.health,
                "hit"
            );

            hits.push(Hit {
                attacker: self.id,
                target: target.id(),
                damage,
                absorbed: taken.absorbed,
                target_health: taken.health,
                killed: taken.died,
            });

            if self.kind.excludes_hit_targets() || !target.is_alive() {
                pool.remove(slot);
            }
        }

        Ok(hits)
    }
}

impl Damageable for Soldier {
    fn id(&self) -> SoldierId {
        self.id
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn take_damage(&mut self, amount: i32) -> Result<DamageTaken> {
        let amount = u32::try_from(amount).map_err(|_| BattleError::NegativeDamage(amount))?;

        if self.health == 0 {
            return Ok(DamageTaken {
                absorbed: 0,
                health: 0,
                died: false,
            });
        }

        let absorbed = absorbed_damage(amount, self.armor);
        self.health = self.health.saturating_sub(absorbed);

        Ok(DamageTaken {
            absorbed,
            health: self.health,
            died: self.health == 0,
        })
    }
}
