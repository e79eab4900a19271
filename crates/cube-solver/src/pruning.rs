//! Successor pruning shared by the A* phase and the depth-first fallback.
//!
//! Consecutive turns of the same face always collapse into a single turn (or
//! nothing), so a path that contains them is never shorter than one that
//! doesn't. Both searches skip such successors.

use smallvec::SmallVec;

use crate::moves::Move;

/// Check whether `next` may follow `last` on a search path
pub fn is_redundant_successor(last: Option<Move>, next: Move) -> bool {
    match last {
        None => false,
        Some(last) => next == last.inverse() || next.is_same_face(last),
    }
}

/// Moves worth trying after `last`, in alphabet order.
pub fn allowed_moves(last: Option<Move>) -> SmallVec<[Move; Move::COUNT]> {
    Move::ALL
        .iter()
        .copied()
        .filter(|&mv| !is_redundant_successor(last, mv))
        .collect()
}

/// Check whether a whole path obeys the successor rules
pub fn is_canonical_path(moves: &[Move]) -> bool {
    moves
        .windows(2)
        .all(|pair| !is_redundant_successor(Some(pair[0]), pair[1]))
}
