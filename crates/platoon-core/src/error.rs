//! Error taxonomy for the battle simulation.
//!
//! Every failure in this crate is a contract violation rather than a transient
//! condition, so nothing here is retried. Errors fall into two groups:
//!
//! - **Construction**: invalid arguments when building soldiers, platoons,
//!   random ranges or cloned rosters. These are rejected outright.
//! - **Operation**: calls made while their preconditions do not hold, such as
//!   resolving a round when one platoon is already empty. Callers are expected
//!   to check the exposed queries (e.g. [`crate::Battlefield::can_fight`]) first.

use thiserror::Error;

/// Errors raised by the battle simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BattleError {
    /// A numeric parameter that must be strictly positive was not.
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending parameter
        field: &'static str,
        /// The rejected value
        value: i64,
    },

    /// A platoon name was empty or whitespace only.
    #[error("platoon name must not be blank")]
    BlankName,

    /// A sniper damage multiplier was below 1 (or not a number).
    #[error("damage multiplier must be at least 1, got {0}")]
    MultiplierBelowOne(f64),

    /// The damage dealt by a single hit would not fit in an `i32`.
    #[error("hit damage {0} exceeds the maximum of {max}", max = i32::MAX)]
    DamageTooLarge(f64),

    /// The cloner was given no templates to copy.
    #[error("no soldier templates to clone")]
    NoTemplates,

    /// Both platoons of a battle were given the same name.
    #[error("attacker and defender are both named {0:?}")]
    DuplicatePlatoonName(String),

    /// A random range contained no values.
    #[error("empty random range {low}..{high}")]
    EmptyRange {
        /// Inclusive lower bound
        low: i64,
        /// Upper bound (exclusive for half-open ranges)
        high: i64,
    },

    /// Negative damage was passed to `take_damage`.
    #[error("damage must not be negative, got {0}")]
    NegativeDamage(i32),

    /// A round was requested while one of the platoons has no soldiers.
    #[error("attacking or defending platoon is empty")]
    PlatoonsCannotFight,

    /// The battle was still undecided after the configured number of rounds.
    #[error("battle undecided after {0} rounds")]
    RoundLimitReached(u32),
}

impl BattleError {
    /// Returns true if this error was raised while constructing a value.
    #[must_use]
    pub const fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::NonPositive { .. }
                | Self::BlankName
                | Self::MultiplierBelowOne(_)
                | Self::DamageTooLarge(_)
                | Self::NoTemplates
                | Self::DuplicatePlatoonName(_)
                | Self::EmptyRange { .. }
        )
    }

    /// Returns true if this error was raised by an operation whose
    /// preconditions did not hold.
    #[must_use]
    pub const fn is_operation(&self) -> bool {
        !self.is_construction()
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BattleError>;

/// Checks that `value` is strictly positive.
pub(crate) fn ensure_positive(field: &'static str, value: i64) -> Result<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(BattleError::NonPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_errors_are_classified() {
        assert!(BattleError::BlankName.is_construction());
        assert!(BattleError::NoTemplates.is_construction());
        assert!(BattleError::MultiplierBelowOne(0.5).is_construction());
        assert!(BattleError::DamageTooLarge(3e9).is_construction());
        assert!(BattleError::DuplicatePlatoonName("A".into()).is_construction());
        assert!(BattleError::NonPositive { field: "armor", value: 0 }.is_construction());
    }

    #[test]
    fn operation_errors_are_classified() {
        assert!(BattleError::PlatoonsCannotFight.is_operation());
        assert!(BattleError::NegativeDamage(-1).is_operation());
        assert!(BattleError::RoundLimitReached(10).is_operation());
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive("health", 1).is_ok());
        assert_eq!(
            ensure_positive("health", 0),
            Err(BattleError::NonPositive { field: "health", value: 0 })
        );
        assert!(ensure_positive("health", -5).is_err());
    }

    #[test]
    fn messages_name_the_field() {
        let err = BattleError::NonPositive { field: "damage", value: -3 };
        assert_eq!(err.to_string(), "damage must be positive, got -3");
    }
}
