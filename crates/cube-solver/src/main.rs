//! CLI entry point for the cube solver.
//!
//! Usage:
//!   cube-solver solve --scramble "R U R' U'" [options]
//!   cube-solver solve --state <54 facelet letters> [options]
//!   cube-solver solve --stdin [options]
//!   cube-solver scramble [--length <n>] [--seed <s>]
//!   cube-solver bench [--count <n>] [--length <n>] [--seed <s>] [options]
//!
//! Options:
//!   --max-depth <n>        Longest solution considered (default: 25)
//!   --timeout <seconds>    Wall-clock budget per solve (default: 60)
//!   --heuristic <name>     facelet | piece | combined (default: piece)
//!   --max-frontier <n>     A* queue budget before falling back (default: 1000000)
//!
//! Exit status: 0 solved, 1 no solution found, 2 bad input.
//! Set RUST_LOG=debug to follow the search on stderr.

use std::io::{self, Read};
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use cube_solver::{
    apply_sequence, format_moves, parse_moves, scramble, scrambled_states, solve, solve_batch,
    BatchSummary, CubeError, CubeState, Heuristic, SearchStatistics, SequenceAnalysis,
    SolverConfig, SolverResult,
};

#[derive(Parser)]
#[command(name = "cube-solver")]
#[command(about = "A* Rubik's cube solver with an iterative-deepening fallback")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single cube
    Solve {
        /// Moves to apply to a solved cube, e.g. "R U R' U'"
        #[arg(long, conflicts_with_all = ["state", "stdin"])]
        scramble: Option<String>,

        /// 54 color letters (W R G Y O B) in U R F D L B face order
        #[arg(long, conflicts_with = "stdin")]
        state: Option<String>,

        /// Read a JSON request {scramble | state, config} from stdin
        #[arg(long)]
        stdin: bool,

        #[command(flatten)]
        solver: SolverArgs,
    },

    /// Print a random scramble
    Scramble {
        #[arg(long, default_value = "20")]
        length: usize,

        /// Seed for a reproducible scramble
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Solve a batch of random scrambles in parallel and summarise
    Bench {
        #[arg(long, default_value = "10")]
        count: usize,

        #[arg(long, default_value = "4")]
        length: usize,

        /// Base seed; scramble i uses seed + i
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        solver: SolverArgs,
    },
}

/// Solver options; anything left unset keeps the request's or default value
#[derive(Args)]
struct SolverArgs {
    /// Maximum solution length
    #[arg(long)]
    max_depth: Option<u32>,

    /// Maximum search time in seconds
    #[arg(long)]
    timeout: Option<f64>,

    /// Heuristic name: facelet, piece or combined
    #[arg(long)]
    heuristic: Option<String>,

    /// Most queued A* states before switching to iterative deepening
    #[arg(long)]
    max_frontier: Option<usize>,
}

impl SolverArgs {
    fn apply(&self, mut config: SolverConfig) -> Result<SolverConfig, CliError> {
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(secs) = self.timeout {
            config.timeout = Duration::try_from_secs_f64(secs)
                .map_err(|e| CubeError::InvalidConfig(format!("timeout {}: {}", secs, e)))?;
        }
        if let Some(name) = &self.heuristic {
            config.heuristic = name.parse::<Heuristic>()?;
        }
        if let Some(max_frontier) = self.max_frontier {
            config.max_frontier = max_frontier;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Solve request accepted on stdin
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolveRequest {
    scramble: Option<String>,
    state: Option<CubeState>,
    #[serde(default)]
    config: SolverConfig,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Cube(#[from] CubeError),
    #[error("failed to read stdin: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON request: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(String),
}

/// Output format for a single solve
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solved: bool,
    solution: Option<String>,
    solution_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    scramble: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<SequenceAnalysis>,
    statistics: SearchStatistics,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let code = match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };
    process::exit(code);
}

fn run(command: Commands) -> Result<i32, CliError> {
    match command {
        Commands::Solve {
            scramble,
            state,
            stdin,
            solver,
        } => {
            let request = if stdin {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                serde_json::from_str(&buffer)?
            } else {
                SolveRequest {
                    scramble,
                    state: state.map(|text| text.parse()).transpose()?,
                    config: SolverConfig::default(),
                }
            };

            let config = solver.apply(request.config)?;
            let (initial, scramble) = match (request.state, request.scramble) {
                (Some(state), None) => (state, None),
                (None, Some(text)) => {
                    let moves = parse_moves(&text)?;
                    (apply_sequence(&CubeState::solved(), &moves), Some(format_moves(&moves)))
                }
                (Some(_), Some(_)) => {
                    return Err(CliError::Usage(
                        "give either a scramble or a state, not both".to_string(),
                    ))
                }
                (None, None) => {
                    return Err(CliError::Usage(
                        "must provide --scramble, --state or --stdin".to_string(),
                    ))
                }
            };

            let result = solve(&initial, &config)?;
            print_json(&format_result(&result, scramble))?;
            Ok(if result.is_solved() { 0 } else { 1 })
        }

        Commands::Scramble { length, seed } => {
            println!("{}", format_moves(&scramble(length, seed)));
            Ok(0)
        }

        Commands::Bench {
            count,
            length,
            seed,
            solver,
        } => {
            let config = solver.apply(SolverConfig::default())?;
            let states = scrambled_states(count, length, seed);
            let results = solve_batch(&states, &config)?;
            let summary = BatchSummary::from_results(&results);
            print_json(&summary)?;
            Ok(if summary.solved == summary.count { 0 } else { 1 })
        }
    }
}

fn format_result(result: &SolverResult, scramble: Option<String>) -> SolveOutput {
    SolveOutput {
        solved: result.is_solved(),
        solution: result.solution.as_deref().map(format_moves),
        solution_length: result.stats.solution_length,
        scramble,
        analysis: result.solution.as_deref().map(SequenceAnalysis::of),
        statistics: result.stats.clone(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
