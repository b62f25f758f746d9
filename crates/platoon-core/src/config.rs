//! Battle setup: soldier templates and the two platoons built from them.
//!
//! A [`BattleConfig`] is plain data that deserializes from JSON. Validation
//! happens when it is turned into soldiers, so every invalid parameter is
//! reported through the same [`BattleError`] variants as direct construction.
//!
//! # Format
//!
//! ```json
//! {
//!   "seed": 42,
//!   "max_rounds": 10000,
//!   "templates": [
//!     { "type": "basic", "health": 100, "armor": 60, "damage": 50 },
//!     { "type": "sniper", "multiplier": 1.6, "health": 100, "armor": 45, "damage": 45 },
//!     { "type": "stormtrooper", "attacks": 5, "health": 100, "armor": 40, "damage": 45 },
//!     { "type": "supporter", "attacks": 5, "health": 100, "armor": 35, "damage": 40 }
//!   ],
//!   "attacker": { "name": "Bunnies", "copies": 5 },
//!   "defender": { "name": "Panthers", "copies": 6 }
//! }
//! ```
//!
//! Missing top-level fields fall back to [`BattleConfig::default`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::battlefield::Battlefield;
use crate::cloner::clone_soldiers;
use crate::error::{BattleError, Result};
use crate::platoon::Platoon;
use crate::rng::RandomSource;
use crate::soldier::{Soldier, SoldierKind};

/// Rounds allowed before a battle is declared undecided.
pub const DEFAULT_MAX_ROUNDS: u32 = 10_000;

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input was not valid configuration JSON.
    #[error("failed to parse battle config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but describes an invalid battle.
    #[error("invalid battle config: {0}")]
    Invalid(#[from] BattleError),
}

/// Variant-specific part of a [`SoldierSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KindSpec {
    /// Single-target soldier
    Basic,
    /// Single-target soldier with a damage multiplier
    Sniper {
        /// Damage multiplier, at least 1
        multiplier: f64,
    },
    /// Multi-hit soldier
    Stormtrooper {
        /// Maximum hits per action
        attacks: u32,
        /// Whether one action may hit the same target twice
        #[serde(default = "default_can_damage_same")]
        can_damage_same: bool,
    },
    /// Multi-hit soldier that never repeats a target within an action
    Supporter {
        /// Maximum hits per action
        attacks: u32,
    },
}

const fn default_can_damage_same() -> bool {
    true
}

impl From<KindSpec> for SoldierKind {
    fn from(spec: KindSpec) -> Self {
        match spec {
            KindSpec::Basic => Self::Basic,
            KindSpec::Sniper { multiplier } => Self::Sniper { multiplier },
            KindSpec::Stormtrooper {
                attacks,
                can_damage_same,
            } => Self::Stormtrooper {
                attacks,
                can_damage_same,
            },
            KindSpec::Supporter { attacks } => Self::Supporter { attacks },
        }
    }
}

/// Template soldier description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoldierSpec {
    /// Attack policy and its parameters
    #[serde(flatten)]
    pub kind: KindSpec,
    /// Starting health
    pub health: u32,
    /// Armor
    pub armor: u32,
    /// Base damage
    pub damage: u32,
}

impl SoldierSpec {
    /// Builds the soldier this spec describes.
    ///
    /// # Errors
    ///
    /// See [`Soldier::new`].
    pub fn build(&self) -> Result<Soldier> {
        Soldier::new(self.kind.into(), self.health, self.armor, self.damage)
    }
}

/// Name and size of one platoon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatoonSpec {
    /// Platoon name
    pub name: String,
    /// Clones of each template in this platoon
    pub copies: usize,
}

/// Full description of a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Seed for target selection; random when absent
    pub seed: Option<u64>,
    /// Rounds allowed before giving up
    pub max_rounds: u32,
    /// Soldier templates shared by both platoons
    pub templates: Vec<SoldierSpec>,
    /// Platoon that attacks first
    pub attacker: PlatoonSpec,
    /// Platoon that defends first
    pub defender: PlatoonSpec,
}

impl Default for BattleConfig {
    /// The classic roster: one template of each kind, five copies each for the
    /// attackers and six for the defenders.
    fn default() -> Self {
        Self {
            seed: None,
            max_rounds: DEFAULT_MAX_ROUNDS,
            templates: vec![
                SoldierSpec {
                    kind: KindSpec::Basic,
                    health: 100,
                    armor: 60,
                    damage: 50,
                },
                SoldierSpec {
                    kind: KindSpec::Sniper { multiplier: 1.6 },
                    health: 100,
                    armor: 45,
                    damage: 45,
                },
                SoldierSpec {
                    kind: KindSpec::Stormtrooper {
                        attacks: 5,
                        can_damage_same: true,
                    },
                    health: 100,
                    armor: 40,
                    damage: 45,
                },
                SoldierSpec {
                    kind: KindSpec::Supporter { attacks: 5 },
                    health: 100,
                    armor: 35,
                    damage: 40,
                },
            ],
            attacker: PlatoonSpec {
                name: "Bunnies".to_owned(),
                copies: 5,
            },
            defender: PlatoonSpec {
                name: "Panthers".to_owned(),
                copies: 6,
            },
        }
    }
}

impl BattleConfig {
    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] if the templates or platoons are invalid.
    pub fn from_json(json: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes this configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json_pretty(&self) -> std::result::Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that the configuration describes a valid battle.
    ///
    /// # Errors
    ///
    /// Returns the first construction error found.
    pub fn validate(&self) -> Result<()> {
        self.build_platoons().map(|_| ())
    }

    /// Builds the template soldiers.
    ///
    /// # Errors
    ///
    /// Returns the first invalid template's error.
    pub fn build_templates(&self) -> Result<Vec<Soldier>> {
        self.templates.iter().map(SoldierSpec::build).collect()
    }

    /// Builds the attacker and defender platoons.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid templates, zero copies, no templates, a
    /// blank platoon name or two platoons sharing a name.
    pub fn build_platoons(&self) -> Result<(Platoon, Platoon)> {
        if self.attacker.name == self.defender.name {
            return Err(BattleError::DuplicatePlatoonName(self.attacker.name.clone()));
        }
        let templates = self.build_templates()?;
        let attacker = Platoon::new(
            self.attacker.name.clone(),
            clone_soldiers(&templates, self.attacker.copies)?,
        )?;
        let defender = Platoon::new(
            self.defender.name.clone(),
            clone_soldiers(&templates, self.defender.copies)?,
        )?;
        Ok((attacker, defender))
    }

    /// Builds a ready-to-fight battlefield.
    ///
    /// The seed is taken from `seed`, then from the config, and is random if
    /// neither is set.
    ///
    /// # Errors
    ///
    /// See [`BattleConfig::build_platoons`].
    pub fn build_battlefield(&self, seed: Option<u64>) -> Result<Battlefield> {
        let (attacker, defender) = self.build_platoons()?;
        let rng = match seed.or(self.seed) {
            Some(seed) => RandomSource::new(seed),
            None => RandomSource::from_entropy(),
        };
        Ok(Battlefield::new(attacker, defender, rng))
    }
}
