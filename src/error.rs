//! Error types for loading levels and parsing board fixtures.
//!
//! Only malformed *input* is reported through these types. Misuse of the board
//! itself (out-of-range coordinates, ids from another board) is a bug and panics.

use std::path::PathBuf;
use thiserror::Error;

/// A level file that cannot be turned into a board.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed level JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("level has {found} tile rows, expected {expected}")]
    RowCount { expected: usize, found: usize },

    #[error("tile row {row} has {found} entries, expected {expected}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("tile value {value} at row {row} column {column} is not 0 or 1")]
    InvalidTileValue { row: usize, column: usize, value: u8 },

    #[error("level has no playable tiles")]
    NoTiles,
}

/// A text board fixture that cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid number of rows: expected at most {expected}, found {found}")]
    TooManyRows { expected: usize, found: usize },

    #[error("row {row} is too long: expected at most {expected} characters, found {found}")]
    RowTooLong {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized character '{character}' in row {row} col {column}")]
    UnrecognizedCharacter {
        character: char,
        row: usize,
        column: usize,
    },
}
