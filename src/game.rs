//! Turn-loop driver.
//!
//! `Game` owns a `Board` for one level and sequences a whole turn: validating the
//! proposed swap, applying it, detonating a swapped bomb, clearing matches, letting
//! pieces fall and refilling until the board settles, then preparing the next turn.
//!
//! Every step a renderer would animate is recorded as a `TurnEvent`, in order, so a
//! presentation layer can replay the turn after the fact.

use crate::chain::Chain;
use crate::engine::Board;
use crate::piece::{PieceId, PieceKind};
use crate::swap::Swap;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Where a level stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum GameStatus {
    /// Moves remain and the target has not been reached.
    Playing,
    /// The score reached the level's target.
    LevelComplete,
    /// The move budget ran out below the target.
    GameOver,
}

/// One observable step of a turn.
#[derive(Clone, Debug, Serialize)]
pub enum TurnEvent {
    /// A fresh layout was placed (initial shuffle or reshuffle).
    Placed(Vec<PieceId>),
    /// A legal swap was applied.
    Swapped(Swap),
    /// A swap was rejected; the board did not change.
    InvalidSwap(Swap),
    /// A swapped bomb went off.
    BombDetonated {
        column: usize,
        row: usize,
        count: u32,
        cleared: Vec<PieceId>,
        score: u32,
    },
    /// Matches were removed. Chains carry their scores.
    ChainsCleared(Vec<Chain>),
    /// Pieces fell into holes, per column.
    Fell(Vec<Vec<PieceId>>),
    /// New pieces were created at the top, per column.
    ToppedUp(Vec<Vec<PieceId>>),
}

/// Everything that happened in one call to [`Game::play_swap`] or [`Game::shuffle`].
#[derive(Clone, Debug, Serialize)]
pub struct TurnReport {
    pub events: Vec<TurnEvent>,
    pub score_gained: u32,
    pub status: GameStatus,
}

impl TurnReport {
    fn new(status: GameStatus) -> Self {
        TurnReport {
            events: Vec::new(),
            score_gained: 0,
            status,
        }
    }

    /// Returns `true` if the proposed swap was refused.
    pub fn was_rejected(&self) -> bool {
        matches!(self.events.first(), Some(TurnEvent::InvalidSwap(_)))
    }
}

/// Lets pieces fall and refills the top, recording both steps.
fn settle(board: &mut Board, events: &mut Vec<TurnEvent>) {
    let fallen = board.fill_holes();
    if !fallen.is_empty() {
        events.push(TurnEvent::Fell(fallen));
    }
    let added = board.top_up_pieces();
    if !added.is_empty() {
        events.push(TurnEvent::ToppedUp(added));
    }
}

fn piece_and_bomb_counts(board: &Board) -> (usize, usize) {
    board.pieces().fold((0, 0), |(pieces, bombs), id| {
        let is_bomb = board.kind_of(id) == PieceKind::Bomb;
        (pieces + 1, bombs + usize::from(is_bomb))
    })
}

/// Applies an already-validated swap and resolves everything it sets off.
///
/// Does not reset the combo multiplier or prepare the next turn. Returns the points
/// earned.
pub(crate) fn resolve_swap(board: &mut Board, swap: &Swap, events: &mut Vec<TurnEvent>) -> u32 {
    let mut gained = 0;
    board.perform_swap(swap);
    events.push(TurnEvent::Swapped(*swap));

    let bomb = [swap.piece_a(), swap.piece_b()]
        .into_iter()
        .find(|&id| board.kind_of(id) == PieceKind::Bomb);
    if let Some(bomb) = bomb {
        let (column, row) = (board.piece(bomb).column(), board.piece(bomb).row());
        let detonation = board.detonate_bomb(column, row);
        let score = detonation.score();
        gained += score;
        events.push(TurnEvent::BombDetonated {
            column,
            row,
            count: detonation.count,
            cleared: detonation.cleared,
            score,
        });
        settle(board, events);
    }

    loop {
        let before = piece_and_bomb_counts(board);
        let chains = board.remove_matches();
        if chains.is_empty() {
            break;
        }
        // A block made only of crossing runs turns into bombs that match each other again
        // without anything being removed.
        if piece_and_bomb_counts(board) == before {
            warn!(chains = chains.len(), "matches made no progress, stopping cascade");
            break;
        }
        gained += chains.iter().map(Chain::score).sum::<u32>();
        events.push(TurnEvent::ChainsCleared(chains));
        settle(board, events);
    }
    gained
}

/// A level being played.
///
/// # Examples
/// ```
/// use match3_engine::engine::Board;
/// use match3_engine::game::{Game, GameStatus};
/// use match3_engine::heuristics::hint;
/// use match3_engine::level::Level;
///
/// let mut game = Game::new(Board::with_seed(&Level::full(100_000, 5), 1));
/// assert_eq!(game.moves_left(), 5);
///
/// let swap = hint(game.board()).unwrap();
/// let report = game.play_swap(swap);
/// assert!(!report.was_rejected());
/// assert!(report.score_gained > 0);
/// assert_eq!(game.moves_left(), 4);
/// assert_eq!(game.status(), GameStatus::Playing);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    score: u32,
    moves_left: u32,
    status: GameStatus,
}

impl Game {
    /// Starts a level: places a fresh layout and grants the level's move budget.
    pub fn new(mut board: Board) -> Self {
        board.shuffle();
        Self::from_prepared(board)
    }

    /// Starts a level on a board whose pieces are already in place.
    ///
    /// Legal swaps are recomputed and the combo multiplier reset, but no pieces move.
    pub fn from_prepared(mut board: Board) -> Self {
        board.reset_combo_multiplier();
        board.detect_possible_swaps();
        let moves_left = board.maximum_moves();
        info!(
            target_score = board.target_score(),
            moves = moves_left,
            "level started"
        );
        let mut game = Game {
            board,
            score: 0,
            moves_left,
            status: GameStatus::Playing,
        };
        game.update_status();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns `true` once the level is won or lost.
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    /// Plays one turn.
    ///
    /// An illegal swap, or any swap after the level has ended, is reported as
    /// `InvalidSwap` and changes nothing. A legal swap is applied, a swapped bomb
    /// detonates at its new position, and matches are cleared and refilled until the
    /// board settles. Then the next turn begins: legal swaps are recomputed, a move is
    /// spent, the combo multiplier resets, and the board is reshuffled if no legal
    /// swap is left.
    #[instrument(level = "debug", skip_all, fields(swap = %swap))]
    pub fn play_swap(&mut self, swap: Swap) -> TurnReport {
        let mut report = TurnReport::new(self.status);
        if self.is_over() || !self.board.is_possible_swap(&swap) {
            debug!("swap rejected");
            report.events.push(TurnEvent::InvalidSwap(swap));
            return report;
        }

        self.board.reset_combo_multiplier();
        let gained = resolve_swap(&mut self.board, &swap, &mut report.events);
        self.score += gained;
        report.score_gained = gained;

        self.begin_next_turn(&mut report);
        report
    }

    /// Replaces the layout with a fresh one at the cost of a move.
    pub fn shuffle(&mut self) -> TurnReport {
        let mut report = TurnReport::new(self.status);
        if self.is_over() {
            return report;
        }
        let placed = self.board.shuffle();
        report.events.push(TurnEvent::Placed(placed));
        self.spend_move();
        report.status = self.status;
        report
    }

    fn begin_next_turn(&mut self, report: &mut TurnReport) {
        let swaps = self.board.detect_possible_swaps();
        self.spend_move();
        self.board.reset_combo_multiplier();
        if swaps == 0 {
            debug!("no legal swaps left, reshuffling");
            let placed = self.board.shuffle();
            report.events.push(TurnEvent::Placed(placed));
        }
        report.status = self.status;
    }

    fn spend_move(&mut self) {
        self.moves_left = self.moves_left.saturating_sub(1);
        self.update_status();
    }

    fn update_status(&mut self) {
        if self.score >= self.board.target_score() {
            self.status = GameStatus::LevelComplete;
        } else if self.moves_left == 0 {
            self.status = GameStatus::GameOver;
        }
        if self.status != GameStatus::Playing {
            info!(
                score = self.score,
                moves_left = self.moves_left,
                status = ?self.status,
                "level finished"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{NUM_COLUMNS, NUM_ROWS};
    use crate::level::Level;
    use crate::utils::{board_from_str_array, board_from_str_array_with_level};

    // Full board with a single legal move: swapping (2,0) with (3,0) completes "RRR".
    fn one_move_rows() -> [&'static str; 9] {
        [
            "GBYGBYGBY",
            "BYGBYGBYG",
            "YGBYGBYGB",
            "GBYGBYGBY",
            "BYGBYGBYG",
            "YGBYGBYGB",
            "GBYGBYGBY",
            "BYGBYGBYG",
            "RRGRYGBYB",
        ]
    }

    // A game on `rows` that is still being played: the target is out of reach.
    fn playing_game(rows: &[&str], moves: u32) -> Game {
        let board = board_from_str_array_with_level(rows, 100_000, moves).unwrap();
        let game = Game::from_prepared(board);
        assert_eq!(game.status(), GameStatus::Playing);
        game
    }

    fn assert_full(board: &Board) {
        assert_eq!(board.piece_count(), NUM_COLUMNS * NUM_ROWS);
    }

    #[test]
    fn test_new_game_is_shuffled_and_playing() {
        let game = Game::new(Board::with_seed(&Level::full(500, 10), 5));
        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.moves_left(), 10);
        assert_eq!(game.score(), 0);
        assert_full(game.board());
        assert!(!game.board().possible_swaps().is_empty());
    }

    #[test]
    fn test_illegal_swap_changes_nothing() {
        let mut game = playing_game(&one_move_rows(), 5);
        let before = game.board().to_plain_rows();
        let swap = game.board().swap_toward(0, 8, 1, 0).unwrap();
        assert!(!game.board().is_possible_swap(&swap));

        let report = game.play_swap(swap);
        assert!(report.was_rejected());
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.score_gained, 0);
        assert_eq!(report.status, GameStatus::Playing);
        assert_eq!(game.board().to_plain_rows(), before);
        assert_eq!(game.moves_left(), 5);
        assert_eq!(game.score(), 0);
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_swap_after_level_ends_is_rejected() {
        // Fixture boards without a target are complete before the first move.
        let board = board_from_str_array(&one_move_rows()).unwrap();
        let mut game = Game::from_prepared(board);
        assert_eq!(game.status(), GameStatus::LevelComplete);
        let swap = game.board().swap_toward(2, 0, 1, 0).unwrap();
        assert!(game.board().is_possible_swap(&swap));
        assert!(game.play_swap(swap).was_rejected());
    }

    #[test]
    fn test_legal_swap_clears_and_refills() {
        let mut game = playing_game(&one_move_rows(), 5);

        let swap = game.board().swap_toward(2, 0, 1, 0).unwrap();
        assert!(game.board().is_possible_swap(&swap));
        let report = game.play_swap(swap);

        assert!(!report.was_rejected());
        assert!(matches!(report.events[0], TurnEvent::Swapped(_)));
        let first_clear = report
            .events
            .iter()
            .find_map(|e| match e {
                TurnEvent::ChainsCleared(chains) => Some(chains.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(first_clear.len(), 1);
        assert_eq!(first_clear[0].len(), 3);
        assert_eq!(first_clear[0].score(), 60);
        assert!(report.score_gained >= 60);
        assert_eq!(game.score(), report.score_gained);
        assert_full(game.board());
        assert_eq!(game.moves_left(), 4);
        assert_eq!(game.board().combo_multiplier(), 1);
        assert!(!game.board().possible_swaps().is_empty());
    }

    #[test]
    fn test_bomb_swap_detonates() {
        let mut rows = one_move_rows();
        rows[4] = "BYGB*GBYG";
        let mut game = playing_game(&rows, 3);

        let swap = game.board().swap_toward(4, 4, 1, 0).unwrap();
        let report = game.play_swap(swap);
        let detonation = report
            .events
            .iter()
            .find_map(|e| match e {
                TurnEvent::BombDetonated {
                    column,
                    row,
                    count,
                    cleared,
                    score,
                } => Some((*column, *row, *count, cleared.len(), *score)),
                _ => None,
            })
            .unwrap();
        assert_eq!(detonation, (5, 4, 3, 9, 1620));
        assert!(report.score_gained >= 1620);
        assert_full(game.board());
    }

    #[test]
    fn test_reaching_target_completes_level() {
        let board = board_from_str_array_with_level(&one_move_rows(), 60, 5).unwrap();
        let mut game = Game::from_prepared(board);
        assert_eq!(game.status(), GameStatus::Playing);

        let swap = game.board().swap_toward(2, 0, 1, 0).unwrap();
        let report = game.play_swap(swap);
        assert!(report.score_gained >= 60);
        assert_eq!(report.status, GameStatus::LevelComplete);
        assert_eq!(game.status(), GameStatus::LevelComplete);
        assert!(game.is_over());
        assert_eq!(game.moves_left(), 4);
    }

    #[test]
    fn test_running_out_of_moves_is_game_over() {
        let mut game = Game::new(Board::with_seed(&Level::full(1_000_000, 2), 8));
        let report = game.shuffle();
        assert!(matches!(report.events[0], TurnEvent::Placed(_)));
        assert_eq!(game.moves_left(), 1);
        assert_eq!(game.status(), GameStatus::Playing);
        game.shuffle();
        assert_eq!(game.moves_left(), 0);
        assert_eq!(game.status(), GameStatus::GameOver);
        assert!(game.shuffle().events.is_empty());
    }

    #[test]
    fn test_resolve_stops_when_matches_only_make_bombs() {
        // Swapping (2,0) with (3,0) completes a 3x3 block of reds: every piece sits on a
        // crossing, so all nine become bombs and nothing is removed.
        let mut board = board_from_str_array(&[
            "RRRB", //
            "RRRB", //
            "RRGR",
        ])
        .unwrap();
        let a = board.piece_at(2, 0).unwrap();
        let b = board.piece_at(3, 0).unwrap();
        let mut events = Vec::new();
        let gained = resolve_swap(&mut board, &Swap::new(a, b), &mut events);

        assert_eq!(gained, 60 * (1 + 2 + 3 + 4 + 5 + 6));
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[1], TurnEvent::ChainsCleared(chains) if chains.len() == 6));
        for row in 0..3 {
            for column in 0..3 {
                assert_eq!(board.kind_at(column, row), Some(PieceKind::Bomb));
            }
        }
    }
}
