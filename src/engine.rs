//! Core rule engine for the match-three board.
//!
//! This module defines the `Board`, which owns every piece and tile of a level and
//! implements the game mechanics:
//! - initial layout generation (`shuffle`), rejecting layouts with no legal move,
//! - legal-swap enumeration and swap application,
//! - match detection and removal, including bomb creation where a horizontal and a
//!   vertical match cross, and combo scoring,
//! - bomb detonation cascades,
//! - gravity (`fill_holes`) and refilling from the top (`top_up_pieces`).
//!
//! Pieces live in an arena owned by the board and are referred to by `PieceId`.
//! `Swap` and `Chain` values only hold ids, so they stay valid while pieces move but
//! must not be kept across a reshuffle.
//!
//! Coordinates are `(column, row)`, with row 0 at the bottom.

use crate::chain::{Chain, ChainDirection};
use crate::grid::Grid;
use crate::level::Level;
use crate::piece::{Piece, PieceId, PieceKind, Tile};
use crate::swap::Swap;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, instrument, trace};

/// Number of columns on every board.
pub const NUM_COLUMNS: usize = 9;

/// Number of rows on every board.
pub const NUM_ROWS: usize = 9;

/// Points per piece beyond the second in a chain, before the combo multiplier.
pub const BASE_CHAIN_SCORE: u32 = 60;

/// Points per cleared cell of a bomb blast.
pub const BOMB_CELL_SCORE: u32 = 60;

// A layout that cannot host a single legal swap would otherwise reshuffle forever.
const MAX_SHUFFLE_ATTEMPTS: usize = 10_000;

/// Points awarded for a bomb cascade whose counter finished at `count`.
///
/// A cascade is worth `count * 9 * BOMB_CELL_SCORE`, but only when `count - 2 > 0`.
///
/// # Examples
/// ```
/// use match3_engine::engine::bomb_score;
/// assert_eq!(bomb_score(2), 0);
/// assert_eq!(bomb_score(3), 1620);
/// ```
pub fn bomb_score(count: u32) -> u32 {
    if count > 2 {
        count * 9 * BOMB_CELL_SCORE
    } else {
        0
    }
}

/// Result of a bomb cascade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detonation {
    /// Cumulative counter: starts at 1 and grows by one per detonation, including the
    /// recursive detonations of bombs caught in a blast.
    pub count: u32,
    /// Every piece removed by the cascade, in clearing order.
    pub cleared: Vec<PieceId>,
}

impl Detonation {
    /// Points this cascade is worth, see [`bomb_score`].
    pub fn score(&self) -> u32 {
        bomb_score(self.count)
    }
}

/// Matches found along one axis, with the flat list of every piece involved.
struct AxisMatches {
    chains: Vec<Chain>,
    matched: Vec<PieceId>,
}

/// The game board: tiles, pieces, legal swaps and the combo state of the current turn.
#[derive(Clone, Debug)]
pub struct Board {
    /// Arena of every piece created since the last shuffle, indexed by `PieceId`.
    pieces: Vec<Piece>,
    grid: Grid<PieceId>,
    tiles: Grid<Tile>,
    possible_swaps: HashSet<Swap>,
    combo_multiplier: u32,
    target_score: u32,
    maximum_moves: u32,
    rng: SmallRng,
}

impl Board {
    /// Creates an empty board for `level`, seeded from system entropy.
    ///
    /// Call [`Board::shuffle`] to place the first pieces.
    pub fn new(level: &Level) -> Self {
        Self::from_level(level, SmallRng::from_entropy())
    }

    /// Creates an empty board for `level` whose random draws are fully determined by `seed`.
    ///
    /// # Examples
    /// ```
    /// use match3_engine::engine::Board;
    /// use match3_engine::level::Level;
    ///
    /// let level = Level::full(1000, 20);
    /// let mut a = Board::with_seed(&level, 42);
    /// let mut b = Board::with_seed(&level, 42);
    /// a.shuffle();
    /// b.shuffle();
    /// assert_eq!(a.to_plain_rows(), b.to_plain_rows());
    /// assert!(!a.possible_swaps().is_empty());
    /// ```
    pub fn with_seed(level: &Level, seed: u64) -> Self {
        Self::from_level(level, SmallRng::seed_from_u64(seed))
    }

    fn from_level(level: &Level, rng: SmallRng) -> Self {
        let mut tiles = Grid::new(NUM_COLUMNS, NUM_ROWS);
        for row in 0..NUM_ROWS {
            for column in 0..NUM_COLUMNS {
                if level.has_tile(column, row) {
                    tiles.set(column, row, Some(Tile));
                }
            }
        }
        Self::from_tiles(tiles, level.target_score(), level.moves(), rng)
    }

    pub(crate) fn from_tiles(
        tiles: Grid<Tile>,
        target_score: u32,
        maximum_moves: u32,
        rng: SmallRng,
    ) -> Self {
        assert!(
            tiles.columns() == NUM_COLUMNS && tiles.rows() == NUM_ROWS,
            "tile grid must be {}x{}",
            NUM_COLUMNS,
            NUM_ROWS
        );
        Board {
            pieces: Vec::new(),
            grid: Grid::new(NUM_COLUMNS, NUM_ROWS),
            tiles,
            possible_swaps: HashSet::new(),
            combo_multiplier: 1,
            target_score,
            maximum_moves,
            rng,
        }
    }

    /// Returns the tile at `(column, row)`, or `None` for a non-playable cell.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the board.
    pub fn tile_at(&self, column: usize, row: usize) -> Option<Tile> {
        self.tiles.get(column, row).copied()
    }

    /// Returns `true` if `(column, row)` is a playable cell.
    pub fn has_tile(&self, column: usize, row: usize) -> bool {
        self.tiles.is_occupied(column, row)
    }

    /// Returns the piece occupying `(column, row)`, if any.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the board.
    pub fn piece_at(&self, column: usize, row: usize) -> Option<PieceId> {
        self.grid.get(column, row).copied()
    }

    /// Returns the current state of a piece.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this board since its last shuffle.
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0]
    }

    /// Shorthand for `self.piece(id).kind()`.
    pub fn kind_of(&self, id: PieceId) -> PieceKind {
        self.pieces[id.0].kind
    }

    /// The kind of the piece at `(column, row)`, if the cell is occupied.
    pub fn kind_at(&self, column: usize, row: usize) -> Option<PieceKind> {
        self.grid.get(column, row).map(|id| self.pieces[id.0].kind)
    }

    /// Iterates over the pieces currently on the board, bottom row first.
    pub fn pieces(&self) -> impl Iterator<Item = PieceId> + '_ {
        (0..NUM_ROWS).flat_map(move |row| {
            (0..NUM_COLUMNS).filter_map(move |column| self.piece_at(column, row))
        })
    }

    /// Number of pieces currently on the board.
    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn maximum_moves(&self) -> u32 {
        self.maximum_moves
    }

    /// Multiplier the next scored chain will use.
    pub fn combo_multiplier(&self) -> u32 {
        self.combo_multiplier
    }

    /// Restarts combo scoring at x1. Called at the start of every turn.
    pub fn reset_combo_multiplier(&mut self) {
        self.combo_multiplier = 1;
    }

    /// The legal swaps found by the last call to [`Board::detect_possible_swaps`].
    pub fn possible_swaps(&self) -> &HashSet<Swap> {
        &self.possible_swaps
    }

    /// Returns `true` if `swap` was legal at the last swap detection.
    pub fn is_possible_swap(&self, swap: &Swap) -> bool {
        self.possible_swaps.contains(swap)
    }

    /// Creates a piece in the arena and puts it at `(column, row)`.
    fn spawn_piece(&mut self, column: usize, row: usize, kind: PieceKind) -> PieceId {
        let id = PieceId(self.pieces.len());
        self.pieces.push(Piece::new(column, row, kind));
        self.grid.set(column, row, Some(id));
        id
    }

    /// Places a new piece of `kind` at `(column, row)`, replacing any piece already there.
    ///
    /// Intended for building specific positions (tests, puzzles). Legal swaps are not
    /// recomputed; call [`Board::detect_possible_swaps`] afterwards.
    ///
    /// # Panics
    /// Panics if the cell has no tile or is outside the board.
    pub fn place_piece(&mut self, column: usize, row: usize, kind: PieceKind) -> PieceId {
        assert!(
            self.has_tile(column, row),
            "cannot place a piece on untiled cell ({}, {})",
            column,
            row
        );
        self.spawn_piece(column, row, kind)
    }

    /// Fills the board with a fresh random layout that has at least one legal swap.
    ///
    /// Every piece from the previous layout is discarded, together with its id.
    /// Layouts are generated by [`Board::create_initial_pieces`] and rejected until
    /// [`Board::detect_possible_swaps`] finds a move. Also resets the combo multiplier.
    ///
    /// # Returns
    /// The ids of all placed pieces, bottom row first, each exactly once.
    ///
    /// # Panics
    /// Panics if the tile layout is so sparse that no legal swap turns up after many attempts.
    #[instrument(level = "debug", skip(self))]
    pub fn shuffle(&mut self) -> Vec<PieceId> {
        self.reset_combo_multiplier();
        for attempt in 1..=MAX_SHUFFLE_ATTEMPTS {
            let placed = self.create_initial_pieces();
            let swaps = self.detect_possible_swaps();
            if swaps > 0 {
                debug!(attempt, pieces = placed.len(), swaps, "shuffled board");
                return placed;
            }
            trace!(attempt, "layout has no legal swap, regenerating");
        }
        panic!(
            "no legal swap after {} shuffles: tile layout cannot host a match",
            MAX_SHUFFLE_ATTEMPTS
        );
    }

    /// Discards all pieces and fills every tiled cell with a random ordinary piece.
    ///
    /// Cells are filled bottom row first, left to right. A kind is redrawn while it would
    /// complete a run of three with the two cells to its left or the two cells below it,
    /// so the layout contains no ready-made match.
    pub fn create_initial_pieces(&mut self) -> Vec<PieceId> {
        self.pieces.clear();
        self.grid.clear();
        self.possible_swaps.clear();

        let mut placed = Vec::new();
        for row in 0..NUM_ROWS {
            for column in 0..NUM_COLUMNS {
                if !self.has_tile(column, row) {
                    continue;
                }
                let kind = loop {
                    let kind = PieceKind::random(&mut self.rng);
                    let completes_row = column >= 2
                        && self.kind_at(column - 1, row) == Some(kind)
                        && self.kind_at(column - 2, row) == Some(kind);
                    let completes_column = row >= 2
                        && self.kind_at(column, row - 1) == Some(kind)
                        && self.kind_at(column, row - 2) == Some(kind);
                    if !completes_row && !completes_column {
                        break kind;
                    }
                };
                placed.push(self.spawn_piece(column, row, kind));
            }
        }
        placed
    }

    /// Recomputes the set of legal swaps and returns how many there are.
    ///
    /// Each piece is tentatively exchanged with its right neighbour and, separately, with
    /// the neighbour above. The exchange is legal if it creates a run of three at either
    /// cell, or if either piece is a bomb. The board is left unchanged.
    pub fn detect_possible_swaps(&mut self) -> usize {
        let mut set = HashSet::new();
        for row in 0..NUM_ROWS {
            for column in 0..NUM_COLUMNS {
                let Some(piece) = self.piece_at(column, row) else {
                    continue;
                };
                if column < NUM_COLUMNS - 1 {
                    if let Some(other) = self.piece_at(column + 1, row) {
                        if self.probe_swap((column, row), (column + 1, row)) {
                            set.insert(Swap::new(piece, other));
                        }
                    }
                }
                if row < NUM_ROWS - 1 {
                    if let Some(other) = self.piece_at(column, row + 1) {
                        if self.probe_swap((column, row), (column, row + 1)) {
                            set.insert(Swap::new(piece, other));
                        }
                    }
                }
            }
        }
        trace!(swaps = set.len(), "detected possible swaps");
        self.possible_swaps = set;
        self.possible_swaps.len()
    }

    /// Exchanges the grid contents of two occupied cells, checks for a match, and swaps back.
    fn probe_swap(&mut self, a: (usize, usize), b: (usize, usize)) -> bool {
        let piece_a = self.grid.get(a.0, a.1).copied();
        let piece_b = self.grid.get(b.0, b.1).copied();
        self.grid.set(a.0, a.1, piece_b);
        self.grid.set(b.0, b.1, piece_a);

        let contains_bomb = self.kind_at(a.0, a.1) == Some(PieceKind::Bomb)
            || self.kind_at(b.0, b.1) == Some(PieceKind::Bomb);
        let legal = contains_bomb || self.has_chain_at(b.0, b.1) || self.has_chain_at(a.0, a.1);

        self.grid.set(a.0, a.1, piece_a);
        self.grid.set(b.0, b.1, piece_b);
        legal
    }

    /// Returns `true` if the piece at `(column, row)` is part of a run of three or more
    /// along its row or its column. An empty cell has no chain.
    pub fn has_chain_at(&self, column: usize, row: usize) -> bool {
        let Some(kind) = self.kind_at(column, row) else {
            return false;
        };

        let mut horizontal_length = 1;
        let mut i = column;
        while i > 0 && self.kind_at(i - 1, row) == Some(kind) {
            i -= 1;
            horizontal_length += 1;
        }
        let mut i = column + 1;
        while i < NUM_COLUMNS && self.kind_at(i, row) == Some(kind) {
            i += 1;
            horizontal_length += 1;
        }
        if horizontal_length >= 3 {
            return true;
        }

        let mut vertical_length = 1;
        let mut i = row;
        while i > 0 && self.kind_at(column, i - 1) == Some(kind) {
            i -= 1;
            vertical_length += 1;
        }
        let mut i = row + 1;
        while i < NUM_ROWS && self.kind_at(column, i) == Some(kind) {
            i += 1;
            vertical_length += 1;
        }
        vertical_length >= 3
    }

    /// Builds the swap a gesture from `(column, row)` in direction `(dx, dy)` proposes.
    ///
    /// Returns `None` if the target cell is off the board or either cell is empty.
    /// The swap is not checked for legality.
    pub fn swap_toward(&self, column: usize, row: usize, dx: isize, dy: isize) -> Option<Swap> {
        let to_column = column as isize + dx;
        let to_row = row as isize + dy;
        if !self.grid.contains(column as isize, row as isize)
            || !self.grid.contains(to_column, to_row)
        {
            return None;
        }
        let from = self.piece_at(column, row)?;
        let to = self.piece_at(to_column as usize, to_row as usize)?;
        Some(Swap::new(from, to))
    }

    /// Exchanges the two pieces of `swap`, updating both the grid and the pieces' positions.
    ///
    /// No legality check is made; callers gate on [`Board::is_possible_swap`].
    /// Applying the same swap twice restores the original position.
    pub fn perform_swap(&mut self, swap: &Swap) {
        let (column_a, row_a) = {
            let piece = &self.pieces[swap.piece_a().0];
            (piece.column, piece.row)
        };
        let (column_b, row_b) = {
            let piece = &self.pieces[swap.piece_b().0];
            (piece.column, piece.row)
        };

        self.grid.set(column_a, row_a, Some(swap.piece_b()));
        let piece_b = &mut self.pieces[swap.piece_b().0];
        piece_b.column = column_a;
        piece_b.row = row_a;

        self.grid.set(column_b, row_b, Some(swap.piece_a()));
        let piece_a = &mut self.pieces[swap.piece_a().0];
        piece_a.column = column_b;
        piece_a.row = row_b;
    }

    fn detect_horizontal_matches(&self) -> AxisMatches {
        let mut found = AxisMatches {
            chains: Vec::new(),
            matched: Vec::new(),
        };
        for row in 0..NUM_ROWS {
            let mut column = 0;
            while column < NUM_COLUMNS - 2 {
                if let Some(kind) = self.kind_at(column, row) {
                    if self.kind_at(column + 1, row) == Some(kind)
                        && self.kind_at(column + 2, row) == Some(kind)
                    {
                        let mut chain = Chain::new(ChainDirection::Horizontal);
                        while column < NUM_COLUMNS && self.kind_at(column, row) == Some(kind) {
                            if let Some(id) = self.piece_at(column, row) {
                                chain.add(id);
                                found.matched.push(id);
                            }
                            column += 1;
                        }
                        found.chains.push(chain);
                        continue;
                    }
                }
                column += 1;
            }
        }
        found
    }

    fn detect_vertical_matches(&self) -> AxisMatches {
        let mut found = AxisMatches {
            chains: Vec::new(),
            matched: Vec::new(),
        };
        for column in 0..NUM_COLUMNS {
            let mut row = 0;
            while row < NUM_ROWS - 2 {
                if let Some(kind) = self.kind_at(column, row) {
                    if self.kind_at(column, row + 1) == Some(kind)
                        && self.kind_at(column, row + 2) == Some(kind)
                    {
                        let mut chain = Chain::new(ChainDirection::Vertical);
                        while row < NUM_ROWS && self.kind_at(column, row) == Some(kind) {
                            if let Some(id) = self.piece_at(column, row) {
                                chain.add(id);
                                found.matched.push(id);
                            }
                            row += 1;
                        }
                        found.chains.push(chain);
                        continue;
                    }
                }
                row += 1;
            }
        }
        found
    }

    /// Finds every run of three or more, removes the matched pieces and scores the chains.
    ///
    /// Rows are scanned left to right and columns bottom to top; each maximal run becomes
    /// one chain. A piece that belongs to both a horizontal and a vertical run turns into a
    /// bomb and stays in its cell; every other matched piece is removed from the grid.
    ///
    /// Horizontal chains are scored first, then vertical ones, each at
    /// `60 * (length - 2) * combo_multiplier`, with the multiplier going up by one per chain.
    ///
    /// # Returns
    /// All chains found, horizontal first, without duplicates. Empty if nothing matched.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_matches(&mut self) -> Vec<Chain> {
        let horizontal = self.detect_horizontal_matches();
        let vertical = self.detect_vertical_matches();

        let horizontal_set: HashSet<PieceId> = horizontal.matched.iter().copied().collect();
        let intersections: HashSet<PieceId> = vertical
            .matched
            .iter()
            .copied()
            .filter(|id| horizontal_set.contains(id))
            .collect();

        let mut horizontal_chains = horizontal.chains;
        let mut vertical_chains = vertical.chains;

        self.remove_pieces(&horizontal_chains, &intersections);
        self.remove_pieces(&vertical_chains, &intersections);

        self.calculate_scores(&mut horizontal_chains);
        self.calculate_scores(&mut vertical_chains);

        let mut chains = horizontal_chains;
        for chain in vertical_chains {
            if !chains.contains(&chain) {
                chains.push(chain);
            }
        }
        if !chains.is_empty() {
            debug!(
                chains = chains.len(),
                bombs = intersections.len(),
                next_multiplier = self.combo_multiplier,
                "removed matches"
            );
        }
        chains
    }

    fn remove_pieces(&mut self, chains: &[Chain], intersections: &HashSet<PieceId>) {
        for chain in chains {
            for &id in chain.pieces() {
                if intersections.contains(&id) {
                    self.pieces[id.0].kind = PieceKind::Bomb;
                } else {
                    let (column, row) = (self.pieces[id.0].column, self.pieces[id.0].row);
                    self.grid.set(column, row, None);
                }
            }
        }
    }

    fn calculate_scores(&mut self, chains: &mut [Chain]) {
        for chain in chains {
            chain.score = BASE_CHAIN_SCORE * (chain.len() as u32 - 2) * self.combo_multiplier;
            self.combo_multiplier += 1;
        }
    }

    /// Detonates a bomb at `(column, row)` and returns the cascade counter.
    ///
    /// See [`Board::detonate_bomb`]; this returns only its `count`.
    pub fn handle_bombs(&mut self, column: usize, row: usize) -> u32 {
        self.detonate_bomb(column, row).count
    }

    /// Clears the 3x3 neighbourhood centred on `(column, row)` and chains into every bomb
    /// caught in the blast.
    ///
    /// The neighbourhood is clipped to the board and to tiled cells. Bombs found in it
    /// (including one at the centre) are collected, and once the neighbourhood is cleared
    /// each of them detonates at its own position. The counter starts at 1 and is advanced
    /// once per detonation across the whole cascade.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the board.
    #[instrument(level = "debug", skip(self))]
    pub fn detonate_bomb(&mut self, column: usize, row: usize) -> Detonation {
        assert!(
            column < NUM_COLUMNS && row < NUM_ROWS,
            "bomb coordinate ({}, {}) out of range",
            column,
            row
        );
        let mut count = 1;
        let mut cleared = Vec::new();
        self.detonate(column, row, &mut count, &mut cleared);
        debug!(count, cleared = cleared.len(), "bomb cascade finished");
        Detonation { count, cleared }
    }

    fn detonate(&mut self, column: usize, row: usize, count: &mut u32, cleared: &mut Vec<PieceId>) {
        *count += 1;
        let mut bombs = Vec::new();
        let columns = column.saturating_sub(1)..=(column + 1).min(NUM_COLUMNS - 1);
        for col in columns {
            for r in row.saturating_sub(1)..=(row + 1).min(NUM_ROWS - 1) {
                if !self.has_tile(col, r) {
                    continue;
                }
                if let Some(id) = self.grid.take(col, r) {
                    if self.pieces[id.0].kind == PieceKind::Bomb {
                        bombs.push(id);
                    }
                    cleared.push(id);
                }
            }
        }
        for bomb in bombs {
            let (bomb_column, bomb_row) = (self.pieces[bomb.0].column, self.pieces[bomb.0].row);
            trace!(bomb_column, bomb_row, "chained detonation");
            self.detonate(bomb_column, bomb_row, count, cleared);
        }
    }

    /// Lets pieces fall into empty tiled cells below them.
    ///
    /// Each column is scanned from the bottom; every empty tiled cell takes the nearest
    /// piece above it. Pieces skip over untiled cells.
    ///
    /// # Returns
    /// For each column where something moved, the pieces that fell, in the order they
    /// were moved (lowest destination first).
    pub fn fill_holes(&mut self) -> Vec<Vec<PieceId>> {
        let mut columns = Vec::new();
        for column in 0..NUM_COLUMNS {
            let mut fallen = Vec::new();
            for row in 0..NUM_ROWS {
                if !self.has_tile(column, row) || self.grid.is_occupied(column, row) {
                    continue;
                }
                for lookup in (row + 1)..NUM_ROWS {
                    if let Some(id) = self.grid.take(column, lookup) {
                        self.grid.set(column, row, Some(id));
                        self.pieces[id.0].row = row;
                        fallen.push(id);
                        break;
                    }
                }
            }
            if !fallen.is_empty() {
                columns.push(fallen);
            }
        }
        columns
    }

    /// Creates new pieces in the empty tiled cells at the top of each column.
    ///
    /// Each column is filled from the top row downward until the first occupied cell.
    /// A new piece's kind only has to differ from the kind created just before it in the
    /// same call, so a refill can still produce matches.
    ///
    /// # Returns
    /// For each column that received pieces, the new pieces from top to bottom.
    pub fn top_up_pieces(&mut self) -> Vec<Vec<PieceId>> {
        let mut columns = Vec::new();
        let mut previous = PieceKind::Unknown;
        for column in 0..NUM_COLUMNS {
            let mut added = Vec::new();
            for row in (0..NUM_ROWS).rev() {
                if self.grid.is_occupied(column, row) {
                    break;
                }
                if !self.has_tile(column, row) {
                    continue;
                }
                let kind = loop {
                    let kind = PieceKind::random(&mut self.rng);
                    if kind != previous {
                        break kind;
                    }
                };
                previous = kind;
                added.push(self.spawn_piece(column, row, kind));
            }
            if !added.is_empty() {
                columns.push(added);
            }
        }
        columns
    }

    /// Renders the board as plain text, top row first.
    ///
    /// Pieces use [`PieceKind::to_char`], `.` is an empty tiled cell and `#` has no tile.
    /// This is the format [`crate::utils::board_from_str_array`] reads.
    pub fn to_plain_rows(&self) -> Vec<String> {
        (0..NUM_ROWS)
            .rev()
            .map(|row| {
                (0..NUM_COLUMNS)
                    .map(|column| match self.kind_at(column, row) {
                        Some(kind) => kind.to_char(),
                        None if self.has_tile(column, row) => '.',
                        None => '#',
                    })
                    .collect()
            })
            .collect()
    }

    /// Generates a terminal rendering of the board with an optional highlighted cell.
    ///
    /// Rows are printed top first and labelled with their board row number, so the labels
    /// count down. Colours use ANSI escape codes; untiled cells are left blank.
    pub fn to_string_with_highlight(&self, pos: Option<(usize, usize)>) -> String {
        let mut output = String::new();

        output.push_str("  ");
        for column in 0..NUM_COLUMNS {
            output.push_str(&format!("{:<2}", column));
        }
        output.push('\n');

        for row in (0..NUM_ROWS).rev() {
            output.push_str(&format!("{:<2}", row));
            for column in 0..NUM_COLUMNS {
                let is_highlight = pos.map_or(false, |p| p == (column, row));
                match self.kind_at(column, row) {
                    Some(kind) => {
                        let content = if is_highlight {
                            "..".to_string()
                        } else if kind == PieceKind::Bomb {
                            "**".to_string()
                        } else {
                            "  ".to_string()
                        };
                        output.push_str(&format!(
                            "\x1b[1;{};m{}\x1b[m",
                            kind.to_ansi_color_code(),
                            content
                        ));
                    }
                    None if self.has_tile(column, row) => output.push_str("\x1b[1;40;m  \x1b[m"),
                    None => output.push_str("  "),
                }
            }
            if row > 0 {
                output.push('\n');
            }
        }
        output
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}
