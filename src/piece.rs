//! Pieces, piece kinds and tiles.
//!
//! - `PieceKind`: the closed set of piece types, including the special `Bomb`.
//! - `PieceId`: the stable identity of a piece (an index into the board's arena).
//! - `Piece`: the arena entry holding a piece's current position and kind.
//! - `Tile`: marker for a playable cell.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The type of a piece.
///
/// Two pieces match iff their kinds are equal. `Unknown` is a placeholder that is
/// never produced by [`PieceKind::random`] and never placed on a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    /// Placeholder used before any kind has been drawn.
    Unknown,
    /// Represents a red piece.
    Red,
    /// Represents an orange piece.
    Orange,
    /// Represents a yellow piece.
    Yellow,
    /// Represents a green piece.
    Green,
    /// Represents a blue piece.
    Blue,
    /// Represents a purple piece.
    Purple,
    /// Created where a horizontal and a vertical match cross. Always swappable;
    /// clears its 3x3 neighbourhood when swapped.
    Bomb,
}

/// The ordinary kinds, in the order `random` draws them.
pub const ORDINARY_KINDS: [PieceKind; 6] = [
    PieceKind::Red,
    PieceKind::Orange,
    PieceKind::Yellow,
    PieceKind::Green,
    PieceKind::Blue,
    PieceKind::Purple,
];

impl PieceKind {
    /// Draws a uniformly random ordinary kind. Never returns `Bomb` or `Unknown`.
    ///
    /// # Examples
    /// ```
    /// use match3_engine::piece::PieceKind;
    /// use rand::SeedableRng;
    /// let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
    /// let kind = PieceKind::random(&mut rng);
    /// assert!(kind.is_ordinary());
    /// ```
    pub fn random(rng: &mut impl Rng) -> PieceKind {
        ORDINARY_KINDS[rng.gen_range(0..ORDINARY_KINDS.len())]
    }

    /// Returns `true` for the six colour kinds.
    pub fn is_ordinary(&self) -> bool {
        !matches!(self, PieceKind::Unknown | PieceKind::Bomb)
    }

    /// Converts the kind to its character representation.
    ///
    /// # Examples
    /// ```
    /// use match3_engine::piece::PieceKind;
    /// assert_eq!(PieceKind::Red.to_char(), 'R');
    /// assert_eq!(PieceKind::Bomb.to_char(), '*');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            PieceKind::Unknown => '?',
            PieceKind::Red => 'R',
            PieceKind::Orange => 'O',
            PieceKind::Yellow => 'Y',
            PieceKind::Green => 'G',
            PieceKind::Blue => 'B',
            PieceKind::Purple => 'P',
            PieceKind::Bomb => '*',
        }
    }

    /// Parses the character form produced by [`PieceKind::to_char`].
    /// `Unknown` has no parseable form.
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c {
            'R' => Some(PieceKind::Red),
            'O' => Some(PieceKind::Orange),
            'Y' => Some(PieceKind::Yellow),
            'G' => Some(PieceKind::Green),
            'B' => Some(PieceKind::Blue),
            'P' => Some(PieceKind::Purple),
            '*' => Some(PieceKind::Bomb),
            _ => None,
        }
    }

    /// Returns the ANSI background colour code string for terminal output.
    pub(crate) fn to_ansi_color_code(&self) -> &'static str {
        match self {
            PieceKind::Unknown => "40",
            PieceKind::Red => "41",
            PieceKind::Green => "42",
            PieceKind::Yellow => "43",
            PieceKind::Blue => "44",
            PieceKind::Purple => "45",
            PieceKind::Orange => "101",
            PieceKind::Bomb => "47",
        }
    }
}

/// Identity of a piece on a board.
///
/// Pieces are compared by identity, never by value: two pieces of the same kind
/// are still distinct. Ids are only meaningful for the board that issued them and
/// only until that board is reshuffled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub(crate) usize);

impl PieceId {
    /// The raw arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A piece's current state. Only the owning board mutates it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub(crate) column: usize,
    pub(crate) row: usize,
    pub(crate) kind: PieceKind,
}

impl Piece {
    pub(crate) fn new(column: usize, row: usize, kind: PieceKind) -> Self {
        Piece { column, row, kind }
    }

    /// Current column.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Current row (row 0 is the bottom of the board).
    pub fn row(&self) -> usize {
        self.row
    }

    /// Current kind.
    pub fn kind(&self) -> PieceKind {
        self.kind
    }
}

/// Marks a playable cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tile;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_random_only_ordinary_kinds() {
        let mut rng = SmallRng::seed_from_u64(514514);
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let kind = PieceKind::random(&mut rng);
            assert!(kind.is_ordinary(), "random produced {:?}", kind);
            seen.insert(kind);
        }
        // Every ordinary kind shows up over 1000 draws.
        assert_eq!(seen.len(), ORDINARY_KINDS.len());
    }

    #[test]
    fn test_char_round_trip() {
        for kind in ORDINARY_KINDS.iter().chain([PieceKind::Bomb].iter()) {
            assert_eq!(PieceKind::from_char(kind.to_char()), Some(*kind));
        }
        assert_eq!(PieceKind::from_char('?'), None);
        assert_eq!(PieceKind::from_char('x'), None);
    }

    #[test]
    fn test_is_ordinary() {
        assert!(!PieceKind::Bomb.is_ordinary());
        assert!(!PieceKind::Unknown.is_ordinary());
        assert!(PieceKind::Purple.is_ordinary());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&PieceKind::Bomb).unwrap();
        assert_eq!(json, "\"bomb\"");
    }
}
