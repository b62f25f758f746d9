//! Text rendering of battle state.
//!
//! Rendering only reads platoons; nothing here can change a battle.

use platoon_core::{BatchSummary, Battlefield, Damageable, Platoon, RoundReport};

/// Renders one platoon: its name, then each soldier's health on its own line.
pub fn platoon(platoon: &Platoon) -> String {
    let healths: String = platoon
        .soldiers()
        .iter()
        .map(|soldier| format!("{}\n", soldier.health()))
        .collect();
    format!("Platoon: {}\nSoldier health:\n{healths}", platoon.name())
}

/// Renders both platoons under their current roles.
pub fn battlefield(battlefield: &Battlefield) -> String {
    format!(
        "Attackers:\n{}\nDefenders:\n{}",
        platoon(battlefield.attacker()),
        platoon(battlefield.defender())
    )
}

/// One-line summary of a round.
pub fn round(report: &RoundReport) -> String {
    format!(
        "Round {}: {} -> {} ({} hits, {} killed)",
        report.round,
        report.attacker,
        report.defender,
        report.hits.len(),
        report.casualties.len()
    )
}

/// Renders the winner line.
pub fn winner(name: &str) -> String {
    format!("Platoon \"{name}\" won")
}

/// Renders a batch summary with one line per platoon.
pub fn summary(summary: &BatchSummary) -> String {
    let wins: String = summary
        .wins
        .iter()
        .map(|(name, wins)| {
            format!(
                "{name}: {wins} wins ({:.1}%)\n",
                summary.win_rate(name) * 100.0
            )
        })
        .collect();
    format!(
        "Battles: {}\n{wins}Undecided: {}\nMean rounds: {:.1}\n",
        summary.battles, summary.undecided, summary.mean_rounds
    )
}
