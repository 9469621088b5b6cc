use crate::engine::Board;
use crate::game::resolve_swap;
use crate::swap::Swap;

/// Orders a swap by the positions of its two pieces: lowest row first, then lowest column.
fn position_key(board: &Board, swap: &Swap) -> ((usize, usize), (usize, usize)) {
    let a = board.piece(swap.piece_a());
    let b = board.piece(swap.piece_b());
    let pa = (a.row(), a.column());
    let pb = (b.row(), b.column());
    if pa <= pb {
        (pa, pb)
    } else {
        (pb, pa)
    }
}

/// The board's legal swaps in a stable order (see `position_key`).
fn sorted_possible_swaps(board: &Board) -> Vec<Swap> {
    let mut swaps: Vec<Swap> = board.possible_swaps().iter().copied().collect();
    swaps.sort_by_key(|swap| position_key(board, swap));
    swaps
}

/// Calculates the points a swap would earn this turn, without touching `board`.
///
/// The swap is played on a copy of the board, including bomb detonation and every
/// cascade that follows. The copy shares the board's random state, so the refills
/// it draws are the ones the real board would draw next.
///
/// # Returns
/// The total points of the turn. The swap is assumed to be legal.
pub fn evaluate_swap(board: &Board, swap: &Swap) -> u32 {
    let mut probe = board.clone();
    probe.reset_combo_multiplier();
    let mut events = Vec::new();
    resolve_swap(&mut probe, swap, &mut events)
}

/// Chooses a move with the Maximize Immediate Score strategy.
///
/// Every legal swap is evaluated with [`evaluate_swap`] and the best one is returned.
/// Ties go to the swap whose pieces sit lowest on the board, then furthest left.
///
/// # Returns
/// `Some((score, swap))`, or `None` if the board has no legal swap.
pub fn choose_swap_greedy(board: &Board) -> Option<(u32, Swap)> {
    let mut best: Option<(u32, Swap)> = None;
    for swap in sorted_possible_swaps(board) {
        let score = evaluate_swap(board, &swap);
        match best {
            Some((best_score, _)) if best_score >= score => {}
            _ => best = Some((score, swap)),
        }
    }
    best
}

/// Suggests a legal swap without scoring anything: the lowest, leftmost one.
pub fn hint(board: &Board) -> Option<Swap> {
    sorted_possible_swaps(board).into_iter().next()
}

/// Suggests a legal swap that moves the piece at `(column, row)`, if it has one.
///
/// # Panics
/// Panics if the coordinate is outside the board.
pub fn hint_for(board: &Board, column: usize, row: usize) -> Option<Swap> {
    let piece = board.piece_at(column, row)?;
    sorted_possible_swaps(board)
        .into_iter()
        .find(|swap| swap.involves(piece))
}
