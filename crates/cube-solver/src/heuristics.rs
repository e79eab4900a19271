//! Heuristic estimators of the number of moves left to solve a state.
//!
//! Every estimator is a pure function of the state, returns 0 exactly on the
//! solved cube, and changes by at most one per move, so A* with any of them
//! finds shortest solutions within its depth budget. Raw counts are divided
//! rounding up: any unsolved state scores at least 1.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cube::{solved_color, Color, CubeState};
use crate::error::CubeError;

/// A face turn relocates at most twelve facelets onto positions expecting a
/// different color; its own face's stickers stay on their face.
pub const FACELET_DIVISOR: u32 = 12;

/// A face turn disturbs four corners (up to 3 each) and four edges (up to 2 each).
pub const PIECE_DIVISOR: u32 = 20;

pub const CORNER_MISPLACED: u32 = 3;
pub const CORNER_TWISTED: u32 = 1;
pub const EDGE_MISPLACED: u32 = 2;
pub const EDGE_FLIPPED: u32 = 1;

/// Facelet indices of each corner slot, U/D sticker first, then clockwise.
pub const CORNER_FACELETS: [[usize; 3]; 8] = [
    [8, 9, 20],   // URF
    [6, 18, 38],  // UFL
    [0, 36, 47],  // ULB
    [2, 45, 11],  // UBR
    [29, 26, 15], // DFR
    [27, 44, 24], // DLF
    [33, 53, 42], // DBL
    [35, 17, 51], // DRB
];

/// Facelet indices of each edge slot.
pub const EDGE_FACELETS: [[usize; 2]; 12] = [
    [5, 10],  // UR
    [7, 19],  // UF
    [3, 37],  // UL
    [1, 46],  // UB
    [32, 16], // DR
    [28, 25], // DF
    [30, 43], // DL
    [34, 52], // DB
    [23, 12], // FR
    [21, 41], // FL
    [50, 39], // BL
    [48, 14], // BR
];

/// Relative weights of the combined estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedWeights {
    pub facelet: u32,
    pub piece: u32,
}

impl Default for CombinedWeights {
    fn default() -> Self {
        Self {
            facelet: 40,
            piece: 60,
        }
    }
}

/// Selects which estimator guides the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    FaceletMismatch,
    PieceBased,
    Combined(CombinedWeights),
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::PieceBased
    }
}

impl Heuristic {
    pub fn estimate(&self, state: &CubeState) -> u32 {
        match self {
            Heuristic::FaceletMismatch => facelet_mismatch(state),
            Heuristic::PieceBased => piece_based(state),
            Heuristic::Combined(weights) => combined(state, weights),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::FaceletMismatch => "facelet",
            Heuristic::PieceBased => "piece",
            Heuristic::Combined(_) => "combined",
        }
    }

    pub fn validate(&self) -> Result<(), CubeError> {
        if let Heuristic::Combined(weights) = self {
            if weights.facelet == 0 && weights.piece == 0 {
                return Err(CubeError::InvalidConfig(
                    "combined heuristic weights must not both be zero".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "facelet" | "facelet_mismatch" | "manhattan" => Ok(Heuristic::FaceletMismatch),
            "piece" | "piece_based" | "corner_edge" => Ok(Heuristic::PieceBased),
            "combined" => Ok(Heuristic::Combined(CombinedWeights::default())),
            _ => Err(CubeError::UnknownHeuristic(s.to_string())),
        }
    }
}

/// Misplaced non-center facelets, scaled down.
pub fn facelet_mismatch(state: &CubeState) -> u32 {
    (state.misplaced_facelets() as u32).div_ceil(FACELET_DIVISOR)
}

/// Weighted corner and edge penalty before normalisation.
pub fn piece_penalty(state: &CubeState) -> u32 {
    let corners: u32 = CORNER_FACELETS
        .iter()
        .map(|slot| slot_penalty(state, slot, CORNER_MISPLACED, CORNER_TWISTED))
        .sum();
    let edges: u32 = EDGE_FACELETS
        .iter()
        .map(|slot| slot_penalty(state, slot, EDGE_MISPLACED, EDGE_FLIPPED))
        .sum();
    corners + edges
}

pub fn piece_based(state: &CubeState) -> u32 {
    piece_penalty(state).div_ceil(PIECE_DIVISOR)
}

/// Weighted average of the two estimators, rounded down.
///
/// Computed in `u64`: any pair of `u32` weights is accepted, and the result
/// never exceeds the larger component.
pub fn combined(state: &CubeState, weights: &CombinedWeights) -> u32 {
    let facelet = u64::from(weights.facelet);
    let piece = u64::from(weights.piece);
    let total = facelet + piece;
    if total == 0 {
        return 0;
    }
    let weighted =
        facelet * u64::from(facelet_mismatch(state)) + piece * u64::from(piece_based(state));
    (weighted / total) as u32
}

/// Penalty for one piece slot.
///
/// A slot holds the right piece when it shows the solved color set; the
/// piece is oriented when every sticker also matches position by position.
fn slot_penalty<const N: usize>(
    state: &CubeState,
    slot: &[usize; N],
    misplaced: u32,
    misoriented: u32,
) -> u32 {
    let current: [Color; N] = slot.map(|i| state.facelet(i));
    let solved: [Color; N] = slot.map(solved_color);
    if current == solved {
        return 0;
    }

    let mut current_sorted = current;
    let mut solved_sorted = solved;
    current_sorted.sort_unstable();
    solved_sorted.sort_unstable();
    if current_sorted == solved_sorted {
        misoriented
    } else {
        misplaced
    }
}
