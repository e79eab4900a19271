//! Rubik's cube solver library.
//!
//! A 3x3x3 cube is modelled as 54 colored facelets. Face turns are fixed
//! permutations of those facelets, and [`solve`] searches for a turn sequence
//! back to the solved state with A* (admissible facelet or piece heuristics),
//! falling back to iterative deepening when A* stops without an answer.
//!
//! ```
//! use std::time::Duration;
//! use cube_solver::{parse_moves, solve, CubeState, SolverConfig};
//!
//! let state = CubeState::solved().apply_sequence(&parse_moves("R U").unwrap());
//! let config = SolverConfig { max_depth: 4, timeout: Duration::from_secs(10), ..Default::default() };
//! let result = solve(&state, &config).unwrap();
//! assert_eq!(cube_solver::format_moves(&result.solution.unwrap()), "U' R'");
//! ```

pub mod batch;
pub mod cube;
pub mod error;
pub mod frontier;
pub mod heuristics;
pub mod moves;
pub mod optimizer;
pub mod pruning;
pub mod solver;
pub mod stats;

// Re-export main types
pub use batch::{scrambled_states, solve_batch, BatchSummary};
pub use cube::{Color, CubeState, Face, Fingerprint, FACELET_COUNT};
pub use error::CubeError;
pub use heuristics::{CombinedWeights, Heuristic};
pub use moves::{
    apply_move, apply_sequence, apply_token, format_moves, invert_sequence, parse_moves,
    scramble, Move, Turn,
};
pub use optimizer::{optimize, SequenceAnalysis, TurnCounts};
pub use solver::{solve, solve_named, SolverConfig, SolverResult};
pub use stats::{SearchStatistics, Termination};
