//! Running many independently seeded battles.
//!
//! Each battle is single-threaded and owns its own [`crate::RandomSource`];
//! only whole battles run in parallel. Battle `i` is seeded with
//! `base_seed.wrapping_add(i)`, and results are folded in battle order, so a
//! summary depends only on the config and the base seed.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::battlefield::BattleOutcome;
use crate::config::BattleConfig;
use crate::error::{BattleError, Result};

/// Aggregated results of a batch of battles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Battles run
    pub battles: usize,
    /// Wins per platoon name
    pub wins: BTreeMap<String, usize>,
    /// Battles that hit the round limit
    pub undecided: usize,
    /// Mean rounds over decided battles
    pub mean_rounds: f64,
}

impl BatchSummary {
    /// Fraction of battles won by `name`.
    #[must_use]
    pub fn win_rate(&self, name: &str) -> f64 {
        if self.battles == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = self.wins.get(name).copied().unwrap_or(0) as f64 / self.battles as f64;
        rate
    }
}

/// Runs `battles` battles from `config` in parallel and summarises them.
///
/// # Errors
///
/// Returns the configuration's construction error, if any. Battles that hit
/// the round limit are counted as undecided rather than failing the batch.
pub fn simulate_many(config: &BattleConfig, battles: usize, base_seed: u64) -> Result<BatchSummary> {
    config.validate()?;

    let outcomes = (0..battles)
        .into_par_iter()
        .map(|i| run_one(config, base_seed.wrapping_add(i as u64)))
        .collect::<Result<Vec<_>>>()?;

    let mut summary = BatchSummary {
        battles,
        ..BatchSummary::default()
    };
    let mut total_rounds = 0u64;
    let mut decided = 0u64;

    for outcome in outcomes {
        match outcome {
            Some(outcome) => {
                decided += 1;
                total_rounds += u64::from(outcome.rounds);
                if let Some(winner) = outcome.winner {
                    *summary.wins.entry(winner).or_insert(0) += 1;
                }
            }
            None => summary.undecided += 1,
        }
    }

    if decided > 0 {
        #[allow(clippy::cast_precision_loss)]
        let mean = total_rounds as f64 / decided as f64;
        summary.mean_rounds = mean;
    }

    info!(
        battles,
        undecided = summary.undecided,
        mean_rounds = summary.mean_rounds,
        "batch finished"
    );
    Ok(summary)
}

/// Runs one battle; `None` means it hit the round limit.
fn run_one(config: &BattleConfig, seed: u64) -> Result<Option<BattleOutcome>> {
    let mut battlefield = config.build_battlefield(Some(seed))?;
    match battlefield.fight(config.max_rounds) {
        Ok(outcome) => Ok(Some(outcome)),
        Err(BattleError::RoundLimitReached(_)) => Ok(None),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KindSpec, PlatoonSpec, SoldierSpec};

    fn small_config() -> BattleConfig {
        BattleConfig {
            attacker: PlatoonSpec {
                name: "A".to_owned(),
                copies: 2,
            },
            defender: PlatoonSpec {
                name: "B".to_owned(),
                copies: 2,
            },
            ..BattleConfig::default()
        }
    }

    #[test]
    fn every_battle_is_counted() {
        let summary = simulate_many(&small_config(), 16, 100).unwrap();
        let wins: usize = summary.wins.values().sum();
        assert_eq!(summary.battles, 16);
        assert_eq!(wins + summary.undecided, 16);
        assert!(summary.mean_rounds > 0.0);
    }

    #[test]
    fn same_base_seed_same_summary() {
        let a = simulate_many(&small_config(), 24, 7).unwrap();
        let b = simulate_many(&small_config(), 24, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn stalemates_are_undecided() {
        let config = BattleConfig {
            max_rounds: 10,
            templates: vec![SoldierSpec {
                kind: KindSpec::Basic,
                health: 10,
                armor: 50,
                damage: 1,
            }],
            ..small_config()
        };
        let summary = simulate_many(&config, 4, 0).unwrap();
        assert_eq!(summary.undecided, 4);
        assert!(summary.wins.is_empty());
        assert!(summary.mean_rounds.abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_config_fails_the_batch() {
        let config = BattleConfig {
            templates: Vec::new(),
            ..small_config()
        };
        assert_eq!(simulate_many(&config, 4, 0), Err(BattleError::NoTemplates));
    }

    #[test]
    fn shared_platoon_name_fails_the_batch() {
        let mut config = small_config();
        config.defender.name = "A".to_owned();
        assert_eq!(
            simulate_many(&config, 4, 0),
            Err(BattleError::DuplicatePlatoonName("A".to_owned()))
        );
    }

    #[test]
    fn win_rate_of_unknown_platoon_is_zero() {
        let summary = simulate_many(&small_config(), 4, 1).unwrap();
        assert!(summary.win_rate("nobody").abs() < f64::EPSILON);
        assert!(summary.win_rate("A") + summary.win_rate("B") <= 1.0 + f64::EPSILON);
    }

    #[test]
    fn empty_batch_is_empty() {
        let summary = simulate_many(&small_config(), 0, 0).unwrap();
        assert_eq!(summary.battles, 0);
        assert!(summary.win_rate("A").abs() < f64::EPSILON);
    }
}
