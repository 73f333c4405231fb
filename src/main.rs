//! Dominion - Entry Point
//!
//! Runs a prototype session either in batch mode (`--turns N`, prints the
//! final world as JSON) or as an interactive prompt.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use dominion::command::parse_command;
use dominion::core::config::EngineConfig;
use dominion::core::error::Result;
use dominion::core::types::{CityId, LocationId, PlayerId};
use dominion::simulation::SimulationEngine;
use dominion::world::seed::CityRoster;

/// Dominion - diplomacy and war between cities, one day at a time
#[derive(Parser, Debug)]
#[command(name = "dominion")]
#[command(about = "Run a prototype diplomacy and war session")]
struct Args {
    /// Engine configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// City roster used to generate extra cities (TOML)
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Number of roster cities to generate
    #[arg(long, default_value_t = 0)]
    cities: usize,

    /// Override the configured RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the configured number of human players
    #[arg(long)]
    humans: Option<usize>,

    /// Override the configured number of bots
    #[arg(long)]
    bots: Option<usize>,

    /// Run this many turns, print the world as JSON and exit
    #[arg(long)]
    turns: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dominion=info")),
        )
        .init();

    let args = Args::parse();
    let engine = build_engine(&args)?;

    match args.turns {
        Some(turns) => run_batch(engine, turns),
        None => run_interactive(engine),
    }
}

fn build_engine(args: &Args) -> Result<SimulationEngine> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(humans) = args.humans {
        config.session.human_players = humans;
    }
    if let Some(bots) = args.bots {
        config.session.bot_players = bots;
    }
    config.validate()?;

    let mut engine = SimulationEngine::new(config);
    if args.cities > 0 || args.roster.is_some() {
        let roster = match &args.roster {
            Some(path) => CityRoster::load(path)?,
            None => CityRoster::default(),
        };
        engine = engine.with_roster(roster, args.cities);
    }
    engine.initialize();
    Ok(engine)
}

fn run_batch(mut engine: SimulationEngine, turns: u64) -> Result<()> {
    for _ in 0..turns {
        let report = engine.advance();
        if !report.is_quiet() {
            tracing::info!("{}", report.summary());
        }
    }
    println!("{}", engine.snapshot().try_to_json()?);
    Ok(())
}

fn run_interactive(mut engine: SimulationEngine) -> Result<()> {
    println!("\n=== DOMINION ===");
    println!();
    println!("Commands:");
    println!("  tick / t                 - Advance one turn");
    println!("  run <n>                  - Advance n turns");
    println!("  status / s               - Show the world");
    println!("  analyst <city> <n>       - Reveal up to n deposits in a city");
    println!("  tax <location> <units>   - Transit income for units crossing");
    println!("  stance <a> <b>           - Show the stance between two players");
    println!("  <command>                - e.g. `war player-human-1 player-bot-1`");
    println!("  quit / q                 - Exit");
    println!();

    loop {
        print!("[turn {} {:?}] > ", engine.current_turn(), engine.current_phase());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        let words: Vec<&str> = input.split_whitespace().collect();

        match words.as_slice() {
            [] => continue,
            ["quit"] | ["q"] => break,
            ["tick"] | ["t"] => {
                let report = engine.advance();
                print_report(&report.summary(), &report.rejected);
            }
            ["run", n] => match n.parse::<u64>() {
                Ok(n) => {
                    for _ in 0..n {
                        engine.advance();
                    }
                    println!("Completed {} turns. Now at turn {}.", n, engine.current_turn());
                }
                Err(_) => println!("Usage: run <number>"),
            },
            ["status"] | ["s"] => println!("{}", engine.snapshot().summary()),
            ["analyst", city, n] => match n.parse::<usize>() {
                Ok(n) => {
                    let found = engine.dispatch_analyst(&CityId::from(*city), n);
                    println!("Analyst revealed {} deposit(s) in {}", found, city);
                }
                Err(_) => println!("Usage: analyst <city> <n>"),
            },
            ["tax", location, units] => match units.parse::<i32>() {
                Ok(units) => {
                    let income = engine.transit_tax_income(&LocationId::from(*location), units);
                    println!("{} units through {} pay {}", units, location, income);
                }
                Err(_) => println!("Usage: tax <location> <units>"),
            },
            ["stance", a, b] => {
                let (a, b) = (PlayerId::from(*a), PlayerId::from(*b));
                println!("{} -> {}: {:?}", a, b, engine.stance(&a, &b));
            }
            _ => match parse_command(input) {
                Ok(command) => match engine.execute_command(&command) {
                    Ok(()) => println!("Done: {}", command),
                    Err(violation) => println!("Refused: {}", violation),
                },
                Err(e) => println!("Could not parse command: {}", e),
            },
        }
    }

    println!("\nGoodbye! Stopped at turn {}.", engine.current_turn());
    engine.dispose();
    Ok(())
}

fn print_report(summary: &str, rejected: &[dominion::simulation::RejectedCommand]) {
    println!("{}", summary);
    for r in rejected {
        println!("  refused: {} ({})", r.command, r.reason);
    }
}
