use crate::engine::{Board, NUM_COLUMNS, NUM_ROWS};
use crate::error::ParseError;
use crate::grid::Grid;
use crate::piece::{PieceKind, Tile};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Seed for the random source of boards built from text, so refills are reproducible.
pub const FIXTURE_SEED: u64 = 514514;

/// Parses an array of string slices into a `Board`.
///
/// Each string is one board row, listed top to bottom as it would be drawn. The rows
/// are anchored at the bottom of the board: the last string is row 0. Rows and columns
/// not covered by the input have no tile.
///
/// Valid characters:
/// - a piece character accepted by [`PieceKind::from_char`] (`R O Y G B P *`): a tiled
///   cell holding that piece,
/// - `.`: a tiled, empty cell,
/// - `#` or space: a cell without a tile.
///
/// The board has a target score and move budget of 0 and a fixed random seed
/// ([`FIXTURE_SEED`]). Legal swaps are computed before returning.
///
/// # Errors
/// Returns a `ParseError` if there are more than `NUM_ROWS` rows, a row is longer than
/// `NUM_COLUMNS` characters, or a character is not recognised.
///
/// # Examples
/// ```
/// use match3_engine::utils::board_from_str_array;
/// use match3_engine::piece::PieceKind;
///
/// let board = board_from_str_array(&[
///     "G.",  // row 1
///     "RB",  // row 0
/// ]).unwrap();
/// assert_eq!(board.kind_at(0, 0), Some(PieceKind::Red));
/// assert_eq!(board.kind_at(0, 1), Some(PieceKind::Green));
/// assert!(board.has_tile(1, 1));
/// assert_eq!(board.piece_at(1, 1), None);
/// assert!(!board.has_tile(2, 0));
///
/// assert!(board_from_str_array(&["RXB"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, ParseError> {
    board_from_str_array_with_level(s, 0, 0)
}

/// Like [`board_from_str_array`], with the given target score and move budget, so a
/// `Game` started on the board is still being played.
///
/// # Examples
/// ```
/// use match3_engine::game::{Game, GameStatus};
/// use match3_engine::utils::board_from_str_array_with_level;
///
/// let board = board_from_str_array_with_level(&["RRGR"], 500, 3).unwrap();
/// let game = Game::from_prepared(board);
/// assert_eq!(game.status(), GameStatus::Playing);
/// assert_eq!(game.moves_left(), 3);
/// ```
pub fn board_from_str_array_with_level(
    s: &[&str],
    target_score: u32,
    moves: u32,
) -> Result<Board, ParseError> {
    if s.len() > NUM_ROWS {
        return Err(ParseError::TooManyRows {
            expected: NUM_ROWS,
            found: s.len(),
        });
    }

    let mut tiles = Grid::new(NUM_COLUMNS, NUM_ROWS);
    let mut placements = Vec::new();

    for (line, row_str) in s.iter().enumerate() {
        let row = s.len() - line - 1;
        let width = row_str.chars().count();
        if width > NUM_COLUMNS {
            return Err(ParseError::RowTooLong {
                row,
                expected: NUM_COLUMNS,
                found: width,
            });
        }

        for (column, c) in row_str.chars().enumerate() {
            match c {
                '#' | ' ' => {}
                '.' => tiles.set(column, row, Some(Tile)),
                _ => {
                    let kind = PieceKind::from_char(c).ok_or(ParseError::UnrecognizedCharacter {
                        character: c,
                        row,
                        column,
                    })?;
                    tiles.set(column, row, Some(Tile));
                    placements.push((column, row, kind));
                }
            }
        }
    }

    let mut board = Board::from_tiles(
        tiles,
        target_score,
        moves,
        SmallRng::seed_from_u64(FIXTURE_SEED),
    );
    for (column, row, kind) in placements {
        board.place_piece(column, row, kind);
    }
    board.detect_possible_swaps();
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&[
            "RGYBPO*RG",
            ".........",
            "RGYBPO*RG",
            ".........",
            "RGYBPO*RG",
            ".........",
            "RGYBPO*RG",
            ".........",
            "RGYBPO*RG",
        ])
        .unwrap();
        assert_eq!(board.kind_at(0, 8), Some(PieceKind::Red));
        assert_eq!(board.kind_at(6, 0), Some(PieceKind::Bomb));
        assert_eq!(board.kind_at(0, 7), None);
        assert!(board.has_tile(0, 7));
        assert_eq!(board.piece_count(), 45);
    }

    #[test]
    fn test_round_trips_through_plain_rows() {
        let rows = [
            "#RGYBPO*#",
            "#.......#",
            "RRGGBBYYP",
            "#########",
            "GB.#.#.BG",
            "RGYBPORGY",
            "YBRGYBRGB",
            "OOPPOOPPO",
            "*.*.*.*.*",
        ];
        let board = board_from_str_array(&rows).unwrap();
        assert_eq!(board.to_plain_rows(), rows.to_vec());
    }

    #[test]
    fn test_board_from_str_array_invalid_char() {
        let result = board_from_str_array(&["RGYBPX"]);
        assert_eq!(
            result.unwrap_err(),
            ParseError::UnrecognizedCharacter {
                character: 'X',
                row: 0,
                column: 5
            }
        );
    }

    #[test]
    fn test_board_from_str_array_row_too_long() {
        let too_long_row = "R".repeat(NUM_COLUMNS + 1);
        let result = board_from_str_array(&[too_long_row.as_str()]);
        assert!(matches!(
            result.unwrap_err(),
            ParseError::RowTooLong { row: 0, .. }
        ));
    }

    #[test]
    fn test_board_from_str_array_too_many_rows() {
        let rows = vec!["R"; NUM_ROWS + 1];
        let err = board_from_str_array(&rows).unwrap_err();
        assert!(err.to_string().contains("invalid number of rows"));
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let board = board_from_str_array(&[]).unwrap();
        for row in 0..NUM_ROWS {
            for column in 0..NUM_COLUMNS {
                assert!(!board.has_tile(column, row));
            }
        }
    }

    #[test]
    fn test_level_parameters_are_applied() {
        let board = board_from_str_array_with_level(&["RRGR"], 750, 12).unwrap();
        assert_eq!(board.target_score(), 750);
        assert_eq!(board.maximum_moves(), 12);
        let plain = board_from_str_array(&["RRGR"]).unwrap();
        assert_eq!(plain.target_score(), 0);
        assert_eq!(plain.maximum_moves(), 0);
        assert_eq!(board.to_plain_rows(), plain.to_plain_rows());
    }

    #[test]
    fn test_swaps_detected_on_parse() {
        let board = board_from_str_array(&["RRGR"]).unwrap();
        assert_eq!(board.possible_swaps().len(), 1);
    }
}
