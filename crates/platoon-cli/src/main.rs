//! Platoons command line driver.
//!
//! Builds two platoons from a battle config, then alternates rounds until one
//! platoon is wiped out, printing both platoons after every round.

mod render;

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use platoon_core::{simulate_many, BattleConfig, BattleError, Battlefield};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Turn-based platoon battle simulator
#[derive(Parser, Debug)]
#[command(name = "platoons")]
#[command(about = "Simulate a battle between two platoons of soldiers")]
struct Args {
    /// Battle config (JSON); the classic roster is used when omitted
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Random seed; overrides the config seed
    #[arg(long, short = 's')]
    seed: Option<u64>,

    /// Wait for Enter between rounds
    #[arg(long)]
    step: bool,

    /// Only print the winner
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Run this many seeded battles in parallel and print win statistics
    #[arg(long)]
    batch: Option<usize>,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the battle printout.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("platoon_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    if args.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    if let Some(battles) = args.batch {
        let base_seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
        info!(battles, base_seed, "running batch");
        let summary = simulate_many(&config, battles, base_seed)?;
        println!("Base seed: {base_seed}");
        print!("{}", render::summary(&summary));
        return Ok(());
    }

    let mut battlefield = config.build_battlefield(args.seed)?;
    info!(seed = battlefield.seed(), "battle starting");
    run_battle(&mut battlefield, &args, config.max_rounds)
}

fn load_config(path: Option<&PathBuf>) -> Result<BattleConfig> {
    let Some(path) = path else {
        return Ok(BattleConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    BattleConfig::from_json(&json).with_context(|| format!("in {}", path.display()))
}

/// Drives the battle round by round, rendering after each one.
fn run_battle(battlefield: &mut Battlefield, args: &Args, max_rounds: u32) -> Result<()> {
    let show = !args.quiet;

    if show {
        println!("Seed: {}\n", battlefield.seed());
        println!("{}", render::battlefield(battlefield));
        pause(args.step)?;
    }

    while battlefield.can_fight() {
        if battlefield.round() >= max_rounds {
            return Err(BattleError::RoundLimitReached(max_rounds))
                .with_context(|| format!("seed {}", battlefield.seed()));
        }

        let report = battlefield.resolve_round()?;
        if show {
            println!("{}\n", render::round(&report));
            println!("{}", render::battlefield(battlefield));
        }
        battlefield.swap_roles();

        if show {
            pause(args.step)?;
        }
    }

    match battlefield.winner() {
        Some(winner) => println!("{}", render::winner(winner.name())),
        None => println!("No platoon is left standing"),
    }
    Ok(())
}

fn pause(enabled: bool) -> Result<()> {
    if enabled {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
    }
    Ok(())
}
