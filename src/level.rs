//! Level definitions.
//!
//! A level is a tile-presence matrix plus a target score and a move budget, stored as JSON:
//!
//! ```json
//! {
//!   "tiles": [[0, 1, 1, 1, 1, 1, 1, 1, 0], ...],
//!   "targetScore": 1000,
//!   "moves": 15
//! }
//! ```
//!
//! The matrix lists the top row first. The board flips it so that board row 0 is the bottom.

use crate::engine::{NUM_COLUMNS, NUM_ROWS};
use crate::error::LevelError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A validated level.
///
/// Every constructor validates, so a `Level` value always has exactly
/// `NUM_ROWS x NUM_COLUMNS` entries, each 0 or 1, with at least one tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    tiles: Vec<Vec<u8>>,
    target_score: u32,
    moves: u32,
}

impl Level {
    /// Builds a level from its parts.
    ///
    /// # Errors
    /// Returns a `LevelError` if the tile matrix has the wrong shape or contents.
    pub fn new(tiles: Vec<Vec<u8>>, target_score: u32, moves: u32) -> Result<Self, LevelError> {
        let level = Level {
            tiles,
            target_score,
            moves,
        };
        level.validate()?;
        Ok(level)
    }

    /// A level where every cell is playable.
    pub fn full(target_score: u32, moves: u32) -> Self {
        Level {
            tiles: vec![vec![1; NUM_COLUMNS]; NUM_ROWS],
            target_score,
            moves,
        }
    }

    /// Parses and validates a level from JSON text.
    ///
    /// # Examples
    /// ```
    /// use match3_engine::level::Level;
    /// let json = r#"{"tiles": [[1,1,1,1,1,1,1,1,1],[1,1,1,1,1,1,1,1,1],[1,1,1,1,1,1,1,1,1],
    ///                          [1,1,1,1,1,1,1,1,1],[1,1,1,1,1,1,1,1,1],[1,1,1,1,1,1,1,1,1],
    ///                          [1,1,1,1,1,1,1,1,1],[1,1,1,1,1,1,1,1,1],[0,0,0,0,0,0,0,0,0]],
    ///                "targetScore": 1000, "moves": 15}"#;
    /// let level = Level::from_json_str(json).unwrap();
    /// assert_eq!(level.target_score(), 1000);
    /// // Source row 8 is the bottom row of the board.
    /// assert!(!level.has_tile(0, 0));
    /// assert!(level.has_tile(0, 8));
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let level: Level = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Reads, parses and validates a level file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_json_str(&content)?;
        debug!(
            path = %path.display(),
            target_score = level.target_score,
            moves = level.moves,
            "loaded level"
        );
        Ok(level)
    }

    fn validate(&self) -> Result<(), LevelError> {
        if self.tiles.len() != NUM_ROWS {
            return Err(LevelError::RowCount {
                expected: NUM_ROWS,
                found: self.tiles.len(),
            });
        }
        let mut tile_count = 0;
        for (row, row_values) in self.tiles.iter().enumerate() {
            if row_values.len() != NUM_COLUMNS {
                return Err(LevelError::ColumnCount {
                    row,
                    expected: NUM_COLUMNS,
                    found: row_values.len(),
                });
            }
            for (column, &value) in row_values.iter().enumerate() {
                match value {
                    0 => {}
                    1 => tile_count += 1,
                    _ => return Err(LevelError::InvalidTileValue { row, column, value }),
                }
            }
        }
        if tile_count == 0 {
            return Err(LevelError::NoTiles);
        }
        Ok(())
    }

    /// Whether board cell `(column, row)` is playable, with row 0 at the bottom.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the board.
    pub fn has_tile(&self, column: usize, row: usize) -> bool {
        assert!(column < NUM_COLUMNS && row < NUM_ROWS);
        self.tiles[NUM_ROWS - row - 1][column] == 1
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    /// The move budget.
    pub fn moves(&self) -> u32 {
        self.moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_json(tiles: &[Vec<u8>]) -> String {
        format!(
            r#"{{"tiles": {}, "targetScore": 3000, "moves": 20}}"#,
            serde_json::to_string(tiles).unwrap()
        )
    }

    #[test]
    fn test_parse_valid_level() {
        let mut tiles = vec![vec![1u8; NUM_COLUMNS]; NUM_ROWS];
        tiles[0][4] = 0; // top row, middle column
        let level = Level::from_json_str(&matrix_json(&tiles)).unwrap();
        assert_eq!(level.target_score(), 3000);
        assert_eq!(level.moves(), 20);
        assert!(!level.has_tile(4, NUM_ROWS - 1));
        assert!(level.has_tile(4, 0));
    }

    #[test]
    fn test_wrong_row_count() {
        let tiles = vec![vec![1u8; NUM_COLUMNS]; NUM_ROWS - 1];
        let err = Level::from_json_str(&matrix_json(&tiles)).unwrap_err();
        assert!(matches!(err, LevelError::RowCount { expected: 9, found: 8 }));
    }

    #[test]
    fn test_wrong_column_count() {
        let mut tiles = vec![vec![1u8; NUM_COLUMNS]; NUM_ROWS];
        tiles[3].push(1);
        let err = Level::from_json_str(&matrix_json(&tiles)).unwrap_err();
        assert!(matches!(err, LevelError::ColumnCount { row: 3, .. }));
    }

    #[test]
    fn test_invalid_tile_value() {
        let mut tiles = vec![vec![1u8; NUM_COLUMNS]; NUM_ROWS];
        tiles[2][5] = 2;
        let err = Level::from_json_str(&matrix_json(&tiles)).unwrap_err();
        assert!(matches!(
            err,
            LevelError::InvalidTileValue { row: 2, column: 5, value: 2 }
        ));
    }

    #[test]
    fn test_no_tiles() {
        let tiles = vec![vec![0u8; NUM_COLUMNS]; NUM_ROWS];
        let err = Level::from_json_str(&matrix_json(&tiles)).unwrap_err();
        assert!(matches!(err, LevelError::NoTiles));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let err = Level::from_json_str(r#"{"tiles": []}"#).unwrap_err();
        assert!(matches!(err, LevelError::Json(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Level::load("/nonexistent/level_0.json").unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("match3_level_{}.json", std::process::id()));
        let tiles = vec![vec![1u8; NUM_COLUMNS]; NUM_ROWS];
        fs::write(&path, matrix_json(&tiles)).unwrap();
        let level = Level::load(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(level, Level::full(3000, 20));
    }

    #[test]
    fn test_new_validates() {
        assert!(Level::new(vec![vec![1; NUM_COLUMNS]; NUM_ROWS], 10, 1).is_ok());
        assert!(Level::new(vec![], 10, 1).is_err());
    }
}
