use crate::piece::PieceId;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A proposed exchange of two pieces.
///
/// A swap is unordered: `Swap::new(a, b) == Swap::new(b, a)`. It refers to pieces by
/// identity, so it stays meaningful while the pieces move, but it must not be kept past
/// the turn it was proposed in.
///
/// # Examples
/// ```
/// use match3_engine::swap::Swap;
/// use match3_engine::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["RG"]).unwrap();
/// let (a, b) = (board.piece_at(0, 0).unwrap(), board.piece_at(1, 0).unwrap());
/// assert_eq!(Swap::new(a, b), Swap::new(b, a));
/// ```
#[derive(Clone, Copy, Debug, Eq, Serialize)]
pub struct Swap {
    piece_a: PieceId,
    piece_b: PieceId,
}

impl Swap {
    pub fn new(piece_a: PieceId, piece_b: PieceId) -> Self {
        Swap { piece_a, piece_b }
    }

    pub fn piece_a(&self) -> PieceId {
        self.piece_a
    }

    pub fn piece_b(&self) -> PieceId {
        self.piece_b
    }

    /// Returns `true` if `id` is one of the two pieces.
    pub fn involves(&self, id: PieceId) -> bool {
        self.piece_a == id || self.piece_b == id
    }

    /// Returns the partner of `id`, or `None` if `id` is not part of this swap.
    pub fn other(&self, id: PieceId) -> Option<PieceId> {
        if self.piece_a == id {
            Some(self.piece_b)
        } else if self.piece_b == id {
            Some(self.piece_a)
        } else {
            None
        }
    }

    fn ordered(&self) -> (PieceId, PieceId) {
        if self.piece_a <= self.piece_b {
            (self.piece_a, self.piece_b)
        } else {
            (self.piece_b, self.piece_a)
        }
    }
}

impl PartialEq for Swap {
    fn eq(&self, other: &Self) -> bool {
        self.ordered() == other.ordered()
    }
}

// Must agree with the symmetric `eq` above.
impl Hash for Swap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordered().hash(state);
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "swap #{} with #{}",
            self.piece_a.index(),
            self.piece_b.index()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_swap_is_symmetric() {
        let a = PieceId(1);
        let b = PieceId(2);
        let c = PieceId(3);
        assert_eq!(Swap::new(a, b), Swap::new(b, a));
        assert_ne!(Swap::new(a, b), Swap::new(a, c));
    }

    #[test]
    fn test_swap_hash_matches_eq() {
        let mut set = HashSet::new();
        set.insert(Swap::new(PieceId(4), PieceId(9)));
        assert!(set.contains(&Swap::new(PieceId(9), PieceId(4))));
        set.insert(Swap::new(PieceId(9), PieceId(4)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_other_and_involves() {
        let swap = Swap::new(PieceId(0), PieceId(5));
        assert!(swap.involves(PieceId(5)));
        assert!(!swap.involves(PieceId(1)));
        assert_eq!(swap.other(PieceId(0)), Some(PieceId(5)));
        assert_eq!(swap.other(PieceId(5)), Some(PieceId(0)));
        assert_eq!(swap.other(PieceId(2)), None);
    }
}
