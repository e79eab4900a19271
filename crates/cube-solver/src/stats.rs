//! Per-solve statistics.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Why the search stopped.
///
/// When the fallback runs, this records what stopped the A* phase unless the
/// fallback itself succeeds or runs out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    #[default]
    Solved,
    FrontierExhausted,
    DepthLimit,
    /// A* frontier reached `SolverConfig::max_frontier`
    FrontierLimit,
    Timeout,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStatistics {
    /// States goal-tested: A* pops that were not stale, plus fallback visits
    pub nodes_explored: u64,
    /// Successors pushed onto the frontier
    pub nodes_generated: u64,
    pub max_frontier: usize,
    pub max_depth_reached: u32,
    pub solution_length: usize,
    #[serde(serialize_with = "serialize_millis", rename = "solveTimeMs")]
    pub solve_time: Duration,
    pub success: bool,
    pub fallback_used: bool,
    pub termination: Termination,
}

impl SearchStatistics {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes: {}, solution: {}, length: {}, time: {:.2}s",
            self.nodes_explored,
            if self.success { "yes" } else { "no" },
            self.solution_length,
            self.solve_time.as_secs_f64()
        )
    }
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64() * 1000.0)
}

/// Accumulates statistics for exactly one solve.
///
/// Counters live here while the search runs; [`StatsRecorder::finish`]
/// stops the clock and hands the finished record back.
#[derive(Debug)]
pub struct StatsRecorder {
    started: Instant,
    stats: SearchStatistics,
}

impl StatsRecorder {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            stats: SearchStatistics::default(),
        }
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    pub fn explored(&mut self) {
        self.stats.nodes_explored += 1;
    }

    pub fn generated(&mut self) {
        self.stats.nodes_generated += 1;
    }

    pub fn reached_depth(&mut self, depth: u32) {
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);
    }

    /// Record the frontier's high-water mark
    pub fn frontier_size(&mut self, size: usize) {
        self.stats.max_frontier = self.stats.max_frontier.max(size);
    }

    pub fn fallback(&mut self) {
        self.stats.fallback_used = true;
    }

    pub fn terminated(&mut self, termination: Termination) {
        self.stats.termination = termination;
    }

    pub fn snapshot(&self) -> &SearchStatistics {
        &self.stats
    }

    /// Stop the timer and record the outcome.
    pub fn finish(mut self, solution_length: Option<usize>) -> SearchStatistics {
        self.stats.solve_time = self.started.elapsed();
        self.stats.success = solution_length.is_some();
        self.stats.solution_length = solution_length.unwrap_or(0);
        if self.stats.success {
            self.stats.termination = Termination::Solved;
        }
        self.stats
    }
}
