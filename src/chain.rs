//! Matched runs of same-kind pieces.

use crate::piece::PieceId;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The axis a chain runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ChainDirection {
    Horizontal,
    Vertical,
}

impl fmt::Display for ChainDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainDirection::Horizontal => write!(f, "Horizontal"),
            ChainDirection::Vertical => write!(f, "Vertical"),
        }
    }
}

/// A maximal run of three or more same-kind pieces along one axis.
///
/// Pieces are kept in physical order (left to right, or bottom to top). Equality and
/// hashing only look at which pieces are members, so the same run found twice compares
/// equal regardless of order, direction or score.
#[derive(Clone, Debug, Serialize)]
pub struct Chain {
    pieces: Vec<PieceId>,
    direction: ChainDirection,
    pub(crate) score: u32,
}

impl Chain {
    pub fn new(direction: ChainDirection) -> Self {
        Chain {
            pieces: Vec::new(),
            direction,
            score: 0,
        }
    }

    /// Appends a piece to the end of the run.
    pub fn add(&mut self, piece: PieceId) {
        self.pieces.push(piece);
    }

    pub fn pieces(&self) -> &[PieceId] {
        &self.pieces
    }

    pub fn first_piece(&self) -> Option<PieceId> {
        self.pieces.first().copied()
    }

    pub fn last_piece(&self) -> Option<PieceId> {
        self.pieces.last().copied()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn direction(&self) -> ChainDirection {
        self.direction
    }

    /// Points awarded for this chain. Zero until the board scores it.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn contains(&self, piece: PieceId) -> bool {
        self.pieces.contains(&piece)
    }

    fn sorted_members(&self) -> Vec<PieceId> {
        let mut members = self.pieces.clone();
        members.sort_unstable();
        members
    }
}

impl PartialEq for Chain {
    fn eq(&self, other: &Self) -> bool {
        self.pieces.len() == other.pieces.len() && self.sorted_members() == other.sorted_members()
    }
}

impl Eq for Chain {}

impl Hash for Chain {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted_members().hash(state);
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type: {} pieces: [", self.direction)?;
        for (i, piece) in self.pieces.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "#{}", piece.index())?;
        }
        write!(f, "] score: {}", self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn chain_of(direction: ChainDirection, ids: &[usize]) -> Chain {
        let mut chain = Chain::new(direction);
        for &id in ids {
            chain.add(PieceId(id));
        }
        chain
    }

    #[test]
    fn test_chain_accessors() {
        let chain = chain_of(ChainDirection::Horizontal, &[3, 4, 5]);
        assert_eq!(chain.len(), 3);
        assert!(!chain.is_empty());
        assert_eq!(chain.first_piece(), Some(PieceId(3)));
        assert_eq!(chain.last_piece(), Some(PieceId(5)));
        assert!(chain.contains(PieceId(4)));
        assert_eq!(chain.score(), 0);
    }

    #[test]
    fn test_chain_equality_ignores_order() {
        let a = chain_of(ChainDirection::Horizontal, &[1, 2, 3]);
        let mut b = chain_of(ChainDirection::Vertical, &[3, 1, 2]);
        b.score = 120;
        assert_eq!(a, b);

        let c = chain_of(ChainDirection::Horizontal, &[1, 2, 4]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_chain_dedup_in_set() {
        let mut set = HashSet::new();
        set.insert(chain_of(ChainDirection::Horizontal, &[7, 8, 9]));
        set.insert(chain_of(ChainDirection::Horizontal, &[9, 8, 7]));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_empty_chain() {
        let chain = Chain::new(ChainDirection::Vertical);
        assert!(chain.is_empty());
        assert_eq!(chain.first_piece(), None);
        assert_eq!(chain.last_piece(), None);
    }
}
