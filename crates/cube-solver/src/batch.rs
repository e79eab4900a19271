//! Parallel batch solving and benchmark summaries.
//!
//! Each solve owns its frontier, closed set and statistics; nothing is shared
//! between workers except the read-only move tables.

use std::time::Duration;

use log::info;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;

use crate::cube::CubeState;
use crate::error::CubeError;
use crate::moves::{apply_sequence, scramble};
use crate::solver::{solve, SolverConfig, SolverResult};

/// Solve every state with the same configuration, in parallel.
///
/// Results come back in input order.
pub fn solve_batch(
    states: &[CubeState],
    config: &SolverConfig,
) -> Result<Vec<SolverResult>, CubeError> {
    config.validate()?;
    states.par_iter().map(|state| solve(state, config)).collect()
}

/// `count` reproducible scrambles of `length` moves, applied to a solved cube.
///
/// Scramble `i` uses seed `seed + i` when a seed is given.
pub fn scrambled_states(count: usize, length: usize, seed: Option<u64>) -> Vec<CubeState> {
    (0..count)
        .map(|i| {
            let moves = scramble(length, seed.map(|s| s.wrapping_add(i as u64)));
            apply_sequence(&CubeState::solved(), &moves)
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub count: usize,
    pub solved: usize,
    /// Fraction in `[0, 1]`; zero for an empty batch
    pub success_rate: f64,
    /// Over solved cubes only
    pub mean_solution_length: f64,
    pub mean_nodes_explored: f64,
    #[serde(serialize_with = "serialize_millis", rename = "meanSolveTimeMs")]
    pub mean_solve_time: Duration,
    #[serde(serialize_with = "serialize_millis", rename = "maxSolveTimeMs")]
    pub max_solve_time: Duration,
}

impl BatchSummary {
    pub fn from_results(results: &[SolverResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let count = results.len();
        let solved: Vec<&SolverResult> = results.iter().filter(|r| r.is_solved()).collect();
        let total_length: usize = solved.iter().map(|r| r.stats.solution_length).sum();
        let total_nodes: u64 = results.iter().map(|r| r.stats.nodes_explored).sum();
        let total_time: Duration = results.iter().map(|r| r.stats.solve_time).sum();
        let max_solve_time = results
            .iter()
            .map(|r| r.stats.solve_time)
            .max()
            .unwrap_or_default();

        let summary = Self {
            count,
            solved: solved.len(),
            success_rate: solved.len() as f64 / count as f64,
            mean_solution_length: if solved.is_empty() {
                0.0
            } else {
                total_length as f64 / solved.len() as f64
            },
            mean_nodes_explored: total_nodes as f64 / count as f64,
            mean_solve_time: total_time.div_f64(count as f64),
            max_solve_time,
        };
        info!(
            "batch: {}/{} solved, mean length {:.2}, mean nodes {:.1}",
            summary.solved, summary.count, summary.mean_solution_length, summary.mean_nodes_explored
        );
        summary
    }
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64() * 1000.0)
}
