//! Error type shared by every fallible boundary of the crate.
//!
//! Malformed input is rejected here, before any search work starts. A search
//! that finds nothing is not an error: see [`crate::SolverResult`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CubeError {
    /// A move token outside `{U,D,L,R,F,B}` with optional `'` or `2` suffix
    #[error("invalid move token `{0}`")]
    InvalidMoveToken(String),

    /// Not a well-formed 54-facelet state
    #[error("invalid state shape: {0}")]
    InvalidStateShape(String),

    #[error("unknown heuristic `{0}` (expected facelet, piece or combined)")]
    UnknownHeuristic(String),

    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}
