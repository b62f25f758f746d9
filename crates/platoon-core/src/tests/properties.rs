//! Property tests for the damage model and the attack policies.

use proptest::prelude::*;

use crate::rng::RandomSource;
use crate::soldier::{absorbed_damage, Damageable, Soldier};

use super::helpers::basic_soldiers;

/// Number of hits each target received in one action.
fn hit_counts(hits: &[crate::soldier::Hit], targets: usize) -> Vec<u32> {
    let mut counts = vec![0; targets];
    for hit in hits {
        counts[hit.target.as_u32() as usize] += 1;
    }
    counts
}

/// Targets carry ids 0..n so hits can be mapped back to them.
fn numbered_targets(count: usize, health: u32) -> Vec<Soldier> {
    crate::platoon::Platoon::new("targets", basic_soldiers(count, health, 1, 1))
        .unwrap()
        .soldiers()
        .to_vec()
}

proptest! {
    #[test]
    fn absorbed_matches_formula_and_bounds(damage in 0u32..100_000, armor in 1u32..100_000) {
        let absorbed = absorbed_damage(damage, armor);
        let expected = u64::from(damage) * u64::from(damage) / (u64::from(damage) + u64::from(armor));
        prop_assert_eq!(u64::from(absorbed), expected);
        prop_assert!(absorbed <= damage);
    }

    #[test]
    fn health_never_negative_and_death_fires_once(
        health in 1u32..500,
        armor in 1u32..100,
        blows in proptest::collection::vec(0i32..400, 1..30),
    ) {
        let mut soldier = Soldier::basic(health, armor, 1).unwrap();
        let mut deaths = 0;
        let mut last = health;

        for blow in blows {
            let taken = soldier.take_damage(blow).unwrap();
            prop_assert!(taken.health <= last);
            prop_assert_eq!(taken.health, soldier.health());
            last = taken.health;
            if taken.died {
                deaths += 1;
            }
        }

        prop_assert!(deaths <= 1);
        prop_assert_eq!(deaths == 1, !soldier.is_alive());
    }

    #[test]
    fn clone_health_is_independent(health in 1u32..500, blow in 1i32..1000) {
        let original = Soldier::sniper(1.5, health, 10, 10).unwrap();
        let mut copy = original.clone();
        copy.take_damage(blow).unwrap();
        prop_assert_eq!(original.health(), health);
        prop_assert_eq!(copy.kind(), original.kind());
        prop_assert_eq!(copy.armor(), original.armor());
    }

    #[test]
    fn sniper_damage_matches_decimal_product(
        hundredths in 100u32..500,
        damage in 1u32..10_000,
        seed in any::<u64>(),
    ) {
        let multiplier = f64::from(hundredths) / 100.0;
        let expected = damage * hundredths / 100;
        let sniper = Soldier::sniper(multiplier, 100, 10, damage).unwrap();
        prop_assert_eq!(sniper.hit_damage(), expected);

        let mut pool = numbered_targets(1, 1_000_000);
        let hits = sniper.attack(&mut pool, &mut RandomSource::new(seed)).unwrap();
        prop_assert_eq!(hits[0].damage, expected);
        prop_assert_eq!(hits[0].absorbed, absorbed_damage(expected, 1));
    }

    #[test]
    fn stormtrooper_without_repeats_never_hits_twice(
        seed in any::<u64>(),
        attacks in 1u32..10,
        targets in 1usize..10,
    ) {
        let soldier = Soldier::stormtrooper(attacks, false, 100, 10, 5).unwrap();
        let mut pool = numbered_targets(targets, 1000);
        let hits = soldier.attack(&mut pool, &mut RandomSource::new(seed)).unwrap();

        prop_assert_eq!(hits.len(), targets.min(attacks as usize));
        prop_assert!(hit_counts(&hits, targets).iter().all(|&n| n <= 1));
    }

    #[test]
    fn supporter_never_hits_twice(
        seed in any::<u64>(),
        attacks in 1u32..10,
        targets in 1usize..10,
        health in 1u32..20,
    ) {
        let soldier = Soldier::supporter(attacks, 100, 10, 5).unwrap();
        let mut pool = numbered_targets(targets, health);
        let hits = soldier.attack(&mut pool, &mut RandomSource::new(seed)).unwrap();

        prop_assert!(hits.len() <= attacks as usize);
        prop_assert!(hit_counts(&hits, targets).iter().all(|&n| n <= 1));
    }

    #[test]
    fn no_hit_lands_on_a_dead_target(
        seed in any::<u64>(),
        attacks in 1u32..10,
        targets in 1usize..6,
    ) {
        // 5 raw against armor 1 absorbs 4, enough to kill 4-health targets.
        let soldier = Soldier::stormtrooper(attacks, true, 100, 10, 5).unwrap();
        let mut pool = numbered_targets(targets, 4);
        let hits = soldier.attack(&mut pool, &mut RandomSource::new(seed)).unwrap();

        prop_assert!(hits.iter().all(|h| h.killed));
        prop_assert!(hit_counts(&hits, targets).iter().all(|&n| n <= 1));
    }
}
