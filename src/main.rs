use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use memory_game::console::{ConsoleInput, ConsoleRenderer};
use memory_game::{GameRng, MemoryConfig, Session};

#[derive(Parser, Debug)]
#[command(name = "memory", about = "Play Memory in the terminal")]
struct Args {
    /// Seed for the grid layout; drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the default configuration and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.dump_config {
        print!("{}", MemoryConfig::default_toml());
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => MemoryConfig::load_or_default(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => MemoryConfig::default(),
    };

    let rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    println!("Seed: {}", rng.seed());

    let stdin = io::stdin();
    let input = ConsoleInput::new(stdin.lock(), io::stdout(), rng.for_context("names"));
    let renderer = ConsoleRenderer::new(io::stdout());

    let mut session = Session::new(config, input, renderer, rng);
    let leaderboard = session.run().context("game session failed")?;

    if let Some(leader) = leaderboard.leader() {
        println!("{} wins with {} points", leader.name, leader.score);
    }
    Ok(())
}
