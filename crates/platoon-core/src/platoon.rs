//! Platoons: named, ordered groups of living soldiers.
//!
//! A platoon owns its soldiers. Membership only ever shrinks: soldiers are
//! removed right after the action in which they died, so between actions a
//! platoon holds live soldiers only. Storage order is turn order.

use serde::Serialize;
use tracing::debug;

use crate::error::{BattleError, Result};
use crate::rng::RandomSource;
use crate::soldier::{Damageable, Hit, Soldier, SoldierId};

/// A named group of soldiers fighting together.
///
/// # Example
///
/// ```
/// use platoon_core::{Damageable, Platoon, RandomSource, Soldier};
///
/// let red = Platoon::new("Red", vec![Soldier::basic(100, 50, 50).unwrap()]).unwrap();
/// let mut blue = Platoon::new("Blue", vec![Soldier::basic(100, 50, 50).unwrap()]).unwrap();
///
/// let hits = red.attack(&mut blue, &mut RandomSource::new(1)).unwrap();
/// assert_eq!(hits.len(), 1);
/// assert_eq!(blue.soldiers()[0].health(), 75);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Platoon {
    name: String,
    soldiers: Vec<Soldier>,
}

impl Platoon {
    /// Creates a platoon and assigns each soldier an id from its position.
    ///
    /// An empty soldier list is accepted; such a platoon cannot fight.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::BlankName`] if `name` is empty or whitespace.
    pub fn new(name: impl Into<String>, soldiers: Vec<Soldier>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BattleError::BlankName);
        }

        let soldiers = soldiers
            .into_iter()
            .zip(0u32..)
            .map(|(soldier, id)| soldier.with_id(SoldierId::new(id)))
            .collect();

        Ok(Self { name, soldiers })
    }

    /// Name of the platoon.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Living soldiers in turn order.
    #[must_use]
    pub fn soldiers(&self) -> &[Soldier] {
        &self.soldiers
    }

    /// Number of living soldiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.soldiers.len()
    }

    /// Returns true if no soldiers are left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.soldiers.is_empty()
    }

    /// Returns true if at least one soldier is left.
    #[must_use]
    pub fn has_soldiers(&self) -> bool {
        !self.is_empty()
    }

    /// Sum of the health of all living soldiers.
    #[must_use]
    pub fn total_health(&self) -> u64 {
        self.soldiers.iter().map(|s| u64::from(s.health())).sum()
    }

    /// Has every soldier of this platoon act once against `opponent`.
    ///
    /// Soldiers act in stored order. A soldier only acts while the opponent
    /// still has members, and the opponent drops its dead after each action,
    /// so no action ever sees a dead target. This platoon's own membership
    /// cannot change during its attack.
    ///
    /// # Errors
    ///
    /// Propagates errors from the soldiers' actions.
    pub fn attack(&self, opponent: &mut Platoon, rng: &mut RandomSource) -> Result<Vec<Hit>> {
        let mut hits = Vec::new();

        for soldier in &self.soldiers {
            if opponent.is_empty() {
                break;
            }

            let action = soldier.attack(&mut opponent.soldiers, rng)?;
            if action.iter().any(|hit| hit.killed) {
                opponent.remove_dead();
            }
            hits.extend(action);
        }

        Ok(hits)
    }

    /// Removes dead soldiers and returns their ids in turn order.
    ///
    /// Calling this again without new deaths removes nothing.
    pub fn remove_dead(&mut self) -> Vec<SoldierId> {
        let removed: Vec<SoldierId> = self
            .soldiers
            .iter()
            .filter(|s| !s.is_alive())
            .map(Damageable::id)
            .collect();

        if !removed.is_empty() {
            self.soldiers.retain(Damageable::is_alive);
            for id in &removed {
                debug!(platoon = %self.name, soldier = %id, "soldier died");
            }
        }

        removed
    }
}
