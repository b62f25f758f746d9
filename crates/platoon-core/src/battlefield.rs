//! The battlefield: two platoons exchanging rounds until one is wiped out.
//!
//! The battlefield is a two-state machine:
//!
//! - **Active**: both platoons have soldiers; [`Battlefield::resolve_round`]
//!   is allowed.
//! - **Decided**: at least one platoon is empty; resolving a round fails with
//!   [`BattleError::PlatoonsCannotFight`] and nothing is mutated.
//!
//! Roles are tags, not identities: after every round the driver calls
//! [`Battlefield::swap_roles`] so the defender strikes back. [`Battlefield::fight`]
//! runs that loop to the end.
//!
//! # Example
//!
//! ```
//! use platoon_core::{Battlefield, Platoon, RandomSource, Soldier};
//!
//! let red = Platoon::new("Red", vec![Soldier::basic(100, 50, 50).unwrap()]).unwrap();
//! let blue = Platoon::new("Blue", vec![Soldier::basic(100, 50, 50).unwrap()]).unwrap();
//!
//! let mut battlefield = Battlefield::new(red, blue, RandomSource::new(7));
//! let outcome = battlefield.fight(100).unwrap();
//!
//! assert_eq!(outcome.winner.as_deref(), Some("Red"));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{BattleError, Result};
use crate::platoon::Platoon;
use crate::rng::RandomSource;
use crate::soldier::{Hit, SoldierId};

/// Whether the battle can still continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleState {
    /// Both platoons have soldiers.
    Active,
    /// At least one platoon is empty.
    Decided,
}

/// What happened during one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    /// 1-based round number
    pub round: u32,
    /// Name of the attacking platoon
    pub attacker: String,
    /// Name of the defending platoon
    pub defender: String,
    /// Every hit in the order it landed
    pub hits: Vec<Hit>,
    /// Defenders killed this round, in the order they died
    pub casualties: Vec<SoldierId>,
}

/// Final result of a battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    /// Name of the surviving platoon, or `None` if both were empty
    pub winner: Option<String>,
    /// Rounds resolved
    pub rounds: u32,
    /// Soldiers left in the winning platoon
    pub survivors: usize,
    /// Seed of the random source, for replay
    pub seed: u64,
}

/// Two platoons in attacker and defender roles, plus the random source
/// driving target selection.
#[derive(Debug, Clone)]
pub struct Battlefield {
    attacker: Platoon,
    defender: Platoon,
    rng: RandomSource,
    round: u32,
}

impl Battlefield {
    /// Creates a battlefield with `attacker` striking first.
    #[must_use]
    pub fn new(attacker: Platoon, defender: Platoon, rng: RandomSource) -> Self {
        Self {
            attacker,
            defender,
            rng,
            round: 0,
        }
    }

    /// Platoon currently in the attacker role.
    #[must_use]
    pub fn attacker(&self) -> &Platoon {
        &self.attacker
    }

    /// Platoon currently in the defender role.
    #[must_use]
    pub fn defender(&self) -> &Platoon {
        &self.defender
    }

    /// Number of rounds resolved so far.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Seed of the random source.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Returns true while both platoons have soldiers.
    #[must_use]
    pub fn can_fight(&self) -> bool {
        self.attacker.has_soldiers() && self.defender.has_soldiers()
    }

    /// Current state of the battle.
    #[must_use]
    pub fn state(&self) -> BattleState {
        if self.can_fight() {
            BattleState::Active
        } else {
            BattleState::Decided
        }
    }

    /// The surviving platoon once the battle is decided.
    ///
    /// Returns `None` while the battle is active, or if both platoons are empty.
    #[must_use]
    pub fn winner(&self) -> Option<&Platoon> {
        if self.can_fight() {
            return None;
        }
        [&self.attacker, &self.defender]
            .into_iter()
            .find(|platoon| platoon.has_soldiers())
    }

    /// Has the attacker platoon attack the defender platoon once.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::PlatoonsCannotFight`] if either platoon is empty;
    /// in that case no state changes.
    pub fn resolve_round(&mut self) -> Result<RoundReport> {
        if !self.can_fight() {
            return Err(BattleError::PlatoonsCannotFight);
        }

        self.round += 1;
        let hits = self.attacker.attack(&mut self.defender, &mut self.rng)?;
        let casualties: Vec<SoldierId> = hits
            .iter()
            .filter(|hit| hit.killed)
            .map(|hit| hit.target)
            .collect();

        info!(
            round = self.round,
            attacker = self.attacker.name(),
            defender = self.defender.name(),
            hits = hits.len(),
            casualties = casualties.len(),
            defenders_left = self.defender.len(),
            "round resolved"
        );

        Ok(RoundReport {
            round: self.round,
            attacker: self.attacker.name().to_owned(),
            defender: self.defender.name().to_owned(),
            hits,
            casualties,
        })
    }

    /// Exchanges the attacker and defender roles.
    pub fn swap_roles(&mut self) {
        std::mem::swap(&mut self.attacker, &mut self.defender);
    }

    /// Resolves rounds, swapping roles after each, until the battle is decided.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::RoundLimitReached`] if the battle is still active
    /// after `max_rounds` rounds in total. This happens when armor swallows
    /// every hit, e.g. damage 1 against armor 50.
    pub fn fight(&mut self, max_rounds: u32) -> Result<BattleOutcome> {
        while self.can_fight() {
            if self.round >= max_rounds {
                warn!(rounds = self.round, "battle undecided, giving up");
                return Err(BattleError::RoundLimitReached(max_rounds));
            }
            self.resolve_round()?;
            self.swap_roles();
        }

        let outcome = self.outcome();
        info!(
            winner = outcome.winner.as_deref().unwrap_or("none"),
            rounds = outcome.rounds,
            survivors = outcome.survivors,
            "battle decided"
        );
        Ok(outcome)
    }

    /// Summarises the battle as it stands.
    ///
    /// While the battle is active the winner is `None`.
    #[must_use]
    pub fn outcome(&self) -> BattleOutcome {
        let winner = self.winner();
        BattleOutcome {
            winner: winner.map(|platoon| platoon.name().to_owned()),
            rounds: self.round,
            survivors: winner.map_or(0, Platoon::len),
            seed: self.seed(),
        }
    }
}
