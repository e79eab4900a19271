//! A* search with an iterative-deepening fallback.
//!
//! The A* phase expands states in `f = g + h` order, ties broken by `g`, then
//! by the alphabet position of the last move, then by insertion order, so a
//! given input always produces the same answer. If it stops without a
//! solution (frontier empty, depth bound hit, frontier budget full or time
//! up), an uninformed iterative-deepening search runs under whatever time is
//! left, as a backstop for shallow scrambles. The fallback only holds the
//! current path, so the frontier budget bounds the memory of a whole solve.
//!
//! Timeouts are polled, not preemptive: once per A* iteration and every
//! [`DEADLINE_POLL_INTERVAL`] fallback visits. An expansion in progress always
//! finishes.

use std::time::{Duration, Instant};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cube::CubeState;
use crate::error::CubeError;
use crate::frontier::{ClosedSet, Frontier, PathArena, SearchNode};
use crate::heuristics::Heuristic;
use crate::moves::Move;
use crate::optimizer::optimize;
use crate::pruning::allowed_moves;
use crate::stats::{SearchStatistics, StatsRecorder, Termination};

/// Fallback visits between two deadline checks
pub const DEADLINE_POLL_INTERVAL: u64 = 1024;

/// Roughly 100 MB of queued nodes
pub const DEFAULT_MAX_FRONTIER: usize = 1_000_000;

/// Configuration for the solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolverConfig {
    /// Longest solution the search will consider
    pub max_depth: u32,
    /// Wall-clock budget shared by both phases
    #[serde(rename = "timeoutSecs", with = "duration_secs")]
    pub timeout: Duration,
    pub heuristic: Heuristic,
    /// Most entries the A* frontier may hold before handing over to the fallback
    pub max_frontier: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_depth: 25,
            timeout: Duration::from_secs(60),
            heuristic: Heuristic::default(),
            max_frontier: DEFAULT_MAX_FRONTIER,
        }
    }
}

impl SolverConfig {
    pub fn new(max_depth: u32, timeout: Duration, heuristic: Heuristic) -> Self {
        Self {
            max_depth,
            timeout,
            heuristic,
            ..Default::default()
        }
    }

    /// A zero depth is allowed (only a solved cube succeeds); a zero timeout
    /// or frontier budget is not.
    pub fn validate(&self) -> Result<(), CubeError> {
        if self.timeout.is_zero() {
            return Err(CubeError::InvalidConfig(
                "timeout must be positive".to_string(),
            ));
        }
        if self.max_frontier == 0 {
            return Err(CubeError::InvalidConfig(
                "frontier budget must be positive".to_string(),
            ));
        }
        self.heuristic.validate()
    }
}

/// Result of one solve
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverResult {
    /// Optimized move sequence, `None` if nothing was found within budget
    pub solution: Option<Vec<Move>>,
    pub stats: SearchStatistics,
}

impl SolverResult {
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }
}

/// Find a move sequence that brings `state` to the solved configuration.
///
/// Only configuration errors are reported as `Err`; running out of depth or
/// time yields `Ok` with `solution: None`.
pub fn solve(state: &CubeState, config: &SolverConfig) -> Result<SolverResult, CubeError> {
    config.validate()?;

    let mut recorder = StatsRecorder::start();
    let deadline = recorder.started() + config.timeout;
    debug!(
        "solving with {} heuristic, max depth {}, timeout {:?}",
        config.heuristic, config.max_depth, config.timeout
    );

    let found = match astar(state, config, deadline, &mut recorder) {
        Ok(path) => Some(path),
        Err(cause) => {
            debug!(
                "A* stopped ({:?}) after {} nodes, falling back to iterative deepening",
                cause,
                recorder.snapshot().nodes_explored
            );
            recorder.terminated(cause);
            recorder.fallback();
            iterative_deepening(state, config.max_depth, deadline, &mut recorder)
        }
    };

    let solution = found.map(|path| optimize(&path));
    let stats = recorder.finish(solution.as_ref().map(Vec::len));
    match &solution {
        Some(moves) => info!("solved in {} moves ({})", moves.len(), stats),
        None => info!("no solution ({:?}; {})", stats.termination, stats),
    }

    Ok(SolverResult { solution, stats })
}

/// [`solve`] with a heuristic given by name, as accepted by [`Heuristic::from_str`].
///
/// [`Heuristic::from_str`]: std::str::FromStr::from_str
pub fn solve_named(
    state: &CubeState,
    max_depth: u32,
    timeout: Duration,
    heuristic_name: &str,
) -> Result<SolverResult, CubeError> {
    let heuristic: Heuristic = heuristic_name.parse()?;
    solve(state, &SolverConfig::new(max_depth, timeout, heuristic))
}

/// Best-first phase. Returns the raw path, or why it stopped.
fn astar(
    initial: &CubeState,
    config: &SolverConfig,
    deadline: Instant,
    recorder: &mut StatsRecorder,
) -> Result<Vec<Move>, Termination> {
    let mut frontier = Frontier::new();
    let outcome = best_first(initial, config, deadline, recorder, &mut frontier);
    recorder.frontier_size(frontier.high_water());
    outcome
}

fn best_first(
    initial: &CubeState,
    config: &SolverConfig,
    deadline: Instant,
    recorder: &mut StatsRecorder,
    frontier: &mut Frontier,
) -> Result<Vec<Move>, Termination> {
    let heuristic = config.heuristic;
    let mut closed = ClosedSet::new();
    let mut paths = PathArena::new();
    let mut depth_limited = false;

    frontier.push(SearchNode::root(*initial, heuristic.estimate(initial)));

    loop {
        if Instant::now() >= deadline {
            return Err(Termination::Timeout);
        }
        let Some(node) = frontier.pop() else {
            break;
        };

        // Lazy deletion: stale duplicates are dropped here instead of on push
        let fingerprint = node.state.fingerprint();
        if closed.contains(&fingerprint) {
            continue;
        }

        recorder.explored();
        recorder.reached_depth(node.g);
        if node.state.is_solved() {
            return Ok(paths.moves(node.path));
        }
        closed.insert(fingerprint);

        if node.g >= config.max_depth {
            depth_limited = true;
            continue;
        }

        for mv in allowed_moves(node.last_move) {
            let next = node.state.apply(mv);
            if closed.contains(&next.fingerprint()) {
                continue;
            }
            if frontier.len() >= config.max_frontier {
                return Err(Termination::FrontierLimit);
            }
            let h = heuristic.estimate(&next);
            let path = paths.extend(node.path, mv);
            frontier.push(SearchNode {
                state: next,
                g: node.g + 1,
                h,
                last_move: Some(mv),
                path: Some(path),
            });
            recorder.generated();
        }
    }

    Err(if depth_limited {
        Termination::DepthLimit
    } else {
        Termination::FrontierExhausted
    })
}

enum DfsOutcome {
    Found,
    Exhausted,
    TimedOut,
}

type Path = SmallVec<[Move; 32]>;

/// Uninformed fallback: depth cutoffs 1, 2, ..., `max_depth`.
fn iterative_deepening(
    initial: &CubeState,
    max_depth: u32,
    deadline: Instant,
    recorder: &mut StatsRecorder,
) -> Option<Vec<Move>> {
    let mut path = Path::new();
    for limit in 1..=max_depth {
        if Instant::now() >= deadline {
            recorder.terminated(Termination::Timeout);
            return None;
        }
        debug!("iterative deepening to depth {}", limit);
        path.clear();
        match depth_limited(initial, limit, &mut path, deadline, recorder) {
            DfsOutcome::Found => return Some(path.to_vec()),
            DfsOutcome::Exhausted => {}
            DfsOutcome::TimedOut => {
                recorder.terminated(Termination::Timeout);
                return None;
            }
        }
    }
    None
}

fn depth_limited(
    state: &CubeState,
    remaining: u32,
    path: &mut Path,
    deadline: Instant,
    recorder: &mut StatsRecorder,
) -> DfsOutcome {
    recorder.explored();
    recorder.reached_depth(path.len() as u32);
    if state.is_solved() {
        return DfsOutcome::Found;
    }
    if remaining == 0 {
        return DfsOutcome::Exhausted;
    }
    if recorder.snapshot().nodes_explored % DEADLINE_POLL_INTERVAL == 0
        && Instant::now() >= deadline
    {
        return DfsOutcome::TimedOut;
    }

    for mv in allowed_moves(path.last().copied()) {
        path.push(mv);
        match depth_limited(&state.apply(mv), remaining - 1, path, deadline, recorder) {
            DfsOutcome::Exhausted => {
                path.pop();
            }
            outcome => return outcome,
        }
    }
    DfsOutcome::Exhausted
}

/// Serde adapter storing a `Duration` as fractional seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
