use anyhow::{Context, Result};
use clap::Parser;
use match3_engine::engine::{Board, NUM_COLUMNS, NUM_ROWS};
use match3_engine::game::{Game, GameStatus, TurnEvent};
use match3_engine::heuristics::{hint, hint_for};
use match3_engine::level::Level;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play a match-three level in the terminal", long_about = None)]
struct Args {
    /// Path to a level file (JSON). Defaults to a fully tiled board.
    #[clap(short, long)]
    level: Option<PathBuf>,

    /// Seed for the random source, for reproducible games
    #[clap(short, long)]
    seed: Option<u64>,
}

fn parse_direction(s: &str) -> Option<(isize, isize)> {
    match s {
        "l" => Some((-1, 0)),
        "r" => Some((1, 0)),
        "u" => Some((0, 1)),
        "d" => Some((0, -1)),
        _ => None,
    }
}

fn print_report_summary(events: &[TurnEvent]) {
    for event in events {
        match event {
            TurnEvent::BombDetonated { count, score, .. } => {
                println!("💣 Bomb cascade x{} for {} points!", count, score)
            }
            TurnEvent::ChainsCleared(chains) => {
                for chain in chains {
                    println!("  {} chain of {} (+{})", chain.direction(), chain.len(), chain.score());
                }
            }
            TurnEvent::Placed(_) => println!("Board reshuffled."),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let level = match &args.level {
        Some(path) => Level::load(path)
            .with_context(|| format!("Failed to load level from {}", path.display()))?,
        None => Level::full(3000, 20),
    };
    let board = match args.seed {
        Some(seed) => Board::with_seed(&level, seed),
        None => Board::new(&level),
    };
    let mut game = Game::new(board);
    println!("Welcome to Match Three!");

    loop {
        println!("---------------------");
        println!(
            "Moves left: {}, Score: {} / {}",
            game.moves_left(),
            game.score(),
            game.board().target_score()
        );
        println!("{}", game.board());

        match game.status() {
            GameStatus::LevelComplete => {
                println!("\n🎉 LEVEL COMPLETE! 🎉 Final Score: {}", game.score());
                break;
            }
            GameStatus::GameOver => {
                println!("\nGAME OVER. Final Score: {}", game.score());
                break;
            }
            GameStatus::Playing => {}
        }

        print!("Enter your move (col row l/r/u/d), 'h [col row]' for a hint, 's' to shuffle, 'q' to quit: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let trimmed_input = input.trim();

        match trimmed_input {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "h" => {
                match hint(game.board()) {
                    Some(swap) => {
                        let a = game.board().piece(swap.piece_a());
                        let b = game.board().piece(swap.piece_b());
                        println!(
                            "Hint: swap ({}, {}) with ({}, {})",
                            a.column(),
                            a.row(),
                            b.column(),
                            b.row()
                        );
                    }
                    None => println!("No moves available."),
                }
                continue;
            }
            "s" => {
                let report = game.shuffle();
                print_report_summary(&report.events);
                continue;
            }
            _ => {}
        }

        let parts: Vec<&str> = trimmed_input.split_whitespace().collect();
        if parts.len() == 3 && parts[0] == "h" {
            let (Ok(column), Ok(row)) = (parts[1].parse::<usize>(), parts[2].parse::<usize>()) else {
                println!("Invalid input: e.g. 'h 3 4' suggests a move for the piece at (3, 4).");
                continue;
            };
            if column >= NUM_COLUMNS || row >= NUM_ROWS {
                println!("Invalid coordinates.");
                continue;
            }
            let Some(piece) = game.board().piece_at(column, row) else {
                println!("No piece at ({}, {}).", column, row);
                continue;
            };
            match hint_for(game.board(), column, row).and_then(|swap| swap.other(piece)) {
                Some(partner) => {
                    let partner = game.board().piece(partner);
                    println!(
                        "Hint: swap ({}, {}) with ({}, {})",
                        column,
                        row,
                        partner.column(),
                        partner.row()
                    );
                }
                None => println!("The piece at ({}, {}) has no legal move.", column, row),
            }
            continue;
        }
        if parts.len() != 3 {
            println!("Invalid input format. Use 'col row dir', 'h', 'h col row', 's', or 'q'.");
            continue;
        }
        let (Ok(column), Ok(row), Some((dx, dy))) = (
            parts[0].parse::<usize>(),
            parts[1].parse::<usize>(),
            parse_direction(parts[2]),
        ) else {
            println!("Invalid input: e.g. '3 4 r' swaps (3, 4) with its right neighbour.");
            continue;
        };
        if column >= NUM_COLUMNS || row >= NUM_ROWS {
            println!(
                "Invalid coordinates: column must be below {} and row below {}.",
                NUM_COLUMNS, NUM_ROWS
            );
            continue;
        }

        match game.board().swap_toward(column, row, dx, dy) {
            Some(swap) => {
                let report = game.play_swap(swap);
                if report.was_rejected() {
                    println!("Invalid move: that swap makes no match.");
                } else {
                    print_report_summary(&report.events);
                    println!("Turn score: {}", report.score_gained);
                }
            }
            None => println!("Invalid move: both cells must hold a piece."),
        }
    }
    Ok(())
}
