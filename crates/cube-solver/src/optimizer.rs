//! Move sequence simplification and analysis.

use serde::Serialize;

use crate::cube::Face;
use crate::moves::{Move, Turn};

/// Merge runs of same-face turns into their net turn, dropping runs that
/// cancel out.
///
/// `U U U` becomes `U'`, `U U` becomes `U2`, `R R'` disappears. Merging is
/// done against a stack, so a cancellation that exposes two more same-face
/// turns (`R U U' R'`) keeps collapsing and the result is already a fixed
/// point. The output is never longer than the input and applies the same
/// transformation.
pub fn optimize(moves: &[Move]) -> Vec<Move> {
    let mut out: Vec<Move> = Vec::with_capacity(moves.len());
    for &mv in moves {
        match out.last().copied() {
            Some(top) if top.is_same_face(mv) => {
                out.pop();
                let net = top.turn.quarter_turns() + mv.turn.quarter_turns();
                if let Some(turn) = Turn::from_quarter_turns(net) {
                    out.push(Move::new(mv.face, turn));
                }
            }
            _ => out.push(mv),
        }
    }
    out
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnCounts {
    pub quarter: usize,
    pub prime: usize,
    pub half: usize,
}

/// Summary of a move sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceAnalysis {
    pub total_moves: usize,
    pub distinct_moves: usize,
    /// Moves per face in U R F D L B order
    pub face_distribution: [usize; 6],
    pub turn_counts: TurnCounts,
}

impl SequenceAnalysis {
    pub fn of(moves: &[Move]) -> Self {
        let mut seen = [false; Move::COUNT];
        let mut analysis = SequenceAnalysis {
            total_moves: moves.len(),
            ..Default::default()
        };

        for mv in moves {
            seen[mv.index()] = true;
            analysis.face_distribution[mv.face.index()] += 1;
            match mv.turn {
                Turn::Clockwise => analysis.turn_counts.quarter += 1,
                Turn::CounterClockwise => analysis.turn_counts.prime += 1,
                Turn::Half => analysis.turn_counts.half += 1,
            }
        }
        analysis.distinct_moves = seen.iter().filter(|&&s| s).count();
        analysis
    }

    pub fn moves_on(&self, face: Face) -> usize {
        self.face_distribution[face.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::CubeState;
    use crate::moves::{apply_sequence, format_moves, parse_moves};

    fn optimized(text: &str) -> String {
        format_moves(&optimize(&parse_moves(text).unwrap()))
    }

    #[test]
    fn test_three_quarters_become_prime() {
        assert_eq!(optimized("U U U"), "U'");
        assert_eq!(optimized("F' F' F'"), "F");
    }

    #[test]
    fn test_two_quarters_become_half() {
        assert_eq!(optimized("R R"), "R2");
        assert_eq!(optimized("D' D'"), "D2");
        assert_eq!(optimized("L2 L"), "L'");
    }

    #[test]
    fn test_inverse_pairs_cancel() {
        assert_eq!(optimized("R R'"), "");
        assert_eq!(optimized("B2 B2"), "");
        assert_eq!(optimized("U U U U"), "");
    }

    #[test]
    fn test_cancellation_cascades() {
        assert_eq!(optimized("R U U' R'"), "");
        assert_eq!(optimized("F R U U' R' F"), "F2");
        assert_eq!(optimized("L D D' L L"), "L'");
    }

    #[test]
    fn test_leaves_canonical_sequences_alone() {
        assert_eq!(optimized("R U R' U' F2 D"), "R U R' U' F2 D");
        assert_eq!(optimized("U D U"), "U D U");
        assert_eq!(optimized(""), "");
    }

    #[test]
    fn test_idempotent_and_preserves_state() {
        let moves = parse_moves("R R U U' F F F D2 D2 L B B' L' R2 R").unwrap();
        let once = optimize(&moves);
        assert_eq!(optimize(&once), once);
        assert!(once.len() <= moves.len());
        let start = CubeState::solved();
        assert_eq!(apply_sequence(&start, &moves), apply_sequence(&start, &once));
    }

    #[test]
    fn test_analysis_counts() {
        let analysis = SequenceAnalysis::of(&parse_moves("R U R' U' R2 F").unwrap());
        assert_eq!(analysis.total_moves, 6);
        assert_eq!(analysis.distinct_moves, 6);
        assert_eq!(analysis.moves_on(Face::R), 3);
        assert_eq!(analysis.moves_on(Face::U), 2);
        assert_eq!(analysis.moves_on(Face::B), 0);
        assert_eq!(
            analysis.turn_counts,
            TurnCounts {
                quarter: 3,
                prime: 2,
                half: 1
            }
        );
        assert_eq!(SequenceAnalysis::of(&[]), SequenceAnalysis::default());

        // Repeats of the same token count once
        let repeated = SequenceAnalysis::of(&parse_moves("R R R' R").unwrap());
        assert_eq!(repeated.total_moves, 4);
        assert_eq!(repeated.distinct_moves, 2);
    }
}
