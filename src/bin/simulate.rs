use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cookie_crunch::engine::{Board, Game, GameStatus};
use cookie_crunch::heuristics::{choose_swap_mis, choose_swap_random};
use cookie_crunch::level::Level;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    /// Highest immediate score
    Mis,
    /// Any legal swap
    Random,
}

#[derive(Parser, Debug)]
#[clap(author, version, about = "Plays a level automatically and reports the result", long_about = None)]
struct Args {
    /// Path to the level file (JSON)
    level_file: PathBuf,

    /// Seed for token draws and random swap choice
    #[clap(short, long, default_value_t = 514514)]
    seed: u64,

    /// Stop after this many turns even if moves remain
    #[clap(short, long)]
    turns: Option<u32>,

    /// How swaps are chosen
    #[clap(long, value_enum, default_value_t = Strategy::Mis)]
    strategy: Strategy,

    /// Print the board and every cascade to stderr
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = Level::load(&args.level_file)
        .with_context(|| format!("failed to load level from {}", args.level_file.display()))?;
    println!(
        "Loaded {}x{} level from {} (target {}, {} moves)",
        level.width(),
        level.height(),
        args.level_file.display(),
        level.target_score(),
        level.moves()
    );

    let mut game = Game::new(Board::from_level(&level, args.seed));
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut turn = 0;

    if args.verbose {
        eprintln!("Initial board:\n{}\n", game.board());
    }

    while game.status() == GameStatus::InProgress {
        if args.turns.map_or(false, |limit| turn >= limit) {
            println!("Turn limit reached.");
            break;
        }
        turn += 1;

        if game.needs_shuffle() {
            game.shuffle()?;
            println!("Turn {}: no legal swap, shuffled ({} moves left)", turn, game.moves_left());
            continue;
        }

        let swap = match args.strategy {
            Strategy::Mis => choose_swap_mis(game.board()).map(|(_, swap)| swap),
            Strategy::Random => choose_swap_random(game.board(), &mut rng),
        }
        .context("board reported legal swaps but none was chosen")?;

        let report = game.process_swap(&swap)?;
        println!(
            "Turn {}: {} -> +{} in {} cascade(s), score {} ({} moves left)",
            turn,
            swap,
            report.points,
            report.cascades.len(),
            game.score(),
            game.moves_left()
        );

        if args.verbose {
            for (i, cascade) in report.cascades.iter().enumerate() {
                eprintln!("  cascade {}:", i + 1);
                for chain in &cascade.chains {
                    eprintln!("    {}", chain);
                }
                eprintln!(
                    "    fallen {}, spawned {}",
                    cascade.fallen.iter().map(Vec::len).sum::<usize>(),
                    cascade.spawned.iter().map(Vec::len).sum::<usize>()
                );
            }
            eprintln!("{}\n", game.board());
        }
    }

    println!();
    match game.status() {
        GameStatus::LevelComplete => println!("Level complete!"),
        GameStatus::GameOver => println!("Game over."),
        GameStatus::InProgress => println!("Stopped."),
    }
    println!("Final score: {} / {}", game.score(), level.target_score());
    println!("Turns played: {}", turn);
    Ok(())
}
