use anyhow::{Context, Result};
use clap::Parser;
use match3_engine::engine::Board;
use match3_engine::game::{Game, GameStatus};
use match3_engine::heuristics::choose_swap_greedy;
use match3_engine::level::Level;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play a match-three level with the greedy strategy", long_about = None)]
struct Args {
    /// Path to the level file (JSON). Defaults to a fully tiled board.
    #[clap(short, long)]
    level: Option<PathBuf>,

    /// Seed for the random source
    #[clap(short, long, default_value_t = 514514)]
    seed: u64,

    /// Print the summary as JSON
    #[clap(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    status: GameStatus,
    score: u32,
    target_score: u32,
    moves_used: u32,
    final_board: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let level = match &args.level {
        Some(path) => Level::load(path)
            .with_context(|| format!("Failed to load level from {}", path.display()))?,
        None => Level::full(3000, 20),
    };

    let mut game = Game::new(Board::with_seed(&level, args.seed));
    info!(seed = args.seed, "auto player started");

    while !game.is_over() {
        match choose_swap_greedy(game.board()) {
            Some((expected, swap)) => {
                let report = game.play_swap(swap);
                debug!(expected, gained = report.score_gained, moves_left = game.moves_left(), "played swap");
            }
            // Unreachable after a reshuffle, but a manual shuffle keeps the loop moving.
            None => {
                game.shuffle();
            }
        }
    }

    let summary = Summary {
        seed: args.seed,
        status: game.status(),
        score: game.score(),
        target_score: level.target_score(),
        moves_used: level.moves().saturating_sub(game.moves_left()),
        final_board: game.board().to_plain_rows(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Level finished: {:?}", summary.status);
        println!("Score: {} / {}", summary.score, summary.target_score);
        println!("Moves used: {}", summary.moves_used);
        println!("Final board state:\n{}", game.board());
    }
    Ok(())
}
