//! # Match-Three Rule Engine
//!
//! This library provides the rules of a tile-matching puzzle played on a 9x9 board:
//! which swaps are legal, which swaps create matches, how matches are scored, how
//! cleared cells are refilled by gravity, and how bombs set off chained area clears.
//!
//! It is used by two binaries:
//! - `human_player`: interactive play in the terminal.
//! - `auto_player`: plays a level to the end with a greedy move chooser and reports
//!   the result.
//!
//! Rendering, input and audio are left to the caller. The `game` module records each
//! step of a turn as an event a presentation layer can replay.
//!
//! ## Modules
//! - `grid`: fixed-size two-dimensional storage (`Grid`).
//! - `piece`: piece kinds, piece identity (`PieceId`) and tiles.
//! - `swap`: unordered swap proposals.
//! - `chain`: matched runs and their scores.
//! - `engine`: the `Board` and every board operation (shuffle, swap detection, match
//!   removal, bomb cascades, gravity and refill).
//! - `game`: the turn loop (`Game`), score, move budget and level status.
//! - `level`: level files (tile layout, target score, move budget).
//! - `heuristics`: move selection (hints and the greedy chooser).
//! - `error`: error types for level loading and board parsing.
//! - `utils`: building boards from text, mainly for tests.

pub mod chain;
pub mod engine;
pub mod error;
pub mod game;
pub mod grid;
pub mod heuristics;
pub mod level;
pub mod piece;
pub mod swap;
pub mod utils;
