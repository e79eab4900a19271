//! End-to-end solver scenarios through the public API.

use std::time::Duration;

use cube_solver::{
    apply_sequence, format_moves, parse_moves, solve, solve_named, CubeError, CubeState,
    Heuristic, SolverConfig, Termination,
};

fn scrambled(text: &str) -> CubeState {
    apply_sequence(&CubeState::solved(), &parse_moves(text).unwrap())
}

fn config(max_depth: u32, heuristic: Heuristic) -> SolverConfig {
    SolverConfig {
        max_depth,
        timeout: Duration::from_secs(60),
        heuristic,
        ..Default::default()
    }
}

fn assert_solves(state: &CubeState, moves: &[cube_solver::Move]) {
    assert!(
        apply_sequence(state, moves).is_solved(),
        "{} does not solve the cube",
        format_moves(moves)
    );
}

#[test_log::test]
fn test_solved_cube() {
    let result = solve(&CubeState::solved(), &SolverConfig::default()).unwrap();
    assert_eq!(result.solution.as_deref(), Some(&[][..]));
    assert_eq!(result.stats.nodes_explored, 1);
    assert_eq!(result.stats.solution_length, 0);
    assert!(result.stats.success);
}

#[test_log::test]
fn test_sexy_move_solved_within_six() {
    let state = scrambled("R U R' U'");
    let result = solve(&state, &config(8, Heuristic::PieceBased)).unwrap();
    let solution = result.solution.unwrap();
    assert!(solution.len() <= 6, "got {}", format_moves(&solution));
    assert_solves(&state, &solution);
    assert_eq!(solution.len(), 4);
}

#[test_log::test]
fn test_default_config_solves_sexy_move() {
    let state = scrambled("U R U' R'");
    let result = solve(&state, &SolverConfig::default()).unwrap();
    let solution = result.solution.unwrap();
    assert!(solution.len() <= 6);
    assert_solves(&state, &solution);
}

#[test_log::test]
fn test_every_heuristic_finds_an_optimal_solution() {
    for text in ["F2 B2 U", "L D' B", "U D R2"] {
        let state = scrambled(text);
        let lengths: Vec<usize> = [
            Heuristic::FaceletMismatch,
            Heuristic::PieceBased,
            Heuristic::Combined(Default::default()),
        ]
        .into_iter()
        .map(|heuristic| {
            let result = solve(&state, &config(5, heuristic)).unwrap();
            let solution = result.solution.unwrap();
            assert_solves(&state, &solution);
            solution.len()
        })
        .collect();
        assert_eq!(lengths, [3, 3, 3], "scramble {}", text);
    }
}

#[test_log::test]
fn test_depth_zero_only_solves_solved_cube() {
    let result = solve(&scrambled("R"), &config(0, Heuristic::PieceBased)).unwrap();
    assert!(result.solution.is_none());
    assert!(!result.stats.success);
    assert_eq!(result.stats.termination, Termination::DepthLimit);

    let result = solve(&CubeState::solved(), &config(0, Heuristic::PieceBased)).unwrap();
    assert_eq!(result.solution.map(|s| s.len()), Some(0));
}

#[test_log::test]
fn test_tiny_timeout_gives_up_cleanly() {
    let state = scrambled("R U F D L B R' U' F' D' L' B' R2 U2 F2 D2 L2 B2");
    let config = SolverConfig {
        max_depth: 25,
        timeout: Duration::from_millis(1),
        heuristic: Heuristic::PieceBased,
        ..Default::default()
    };
    let result = solve(&state, &config).unwrap();
    assert!(result.solution.is_none());
    assert!(result.stats.fallback_used);
    assert_eq!(result.stats.termination, Termination::Timeout);
}

#[test_log::test]
fn test_bad_inputs_are_errors() {
    assert!(matches!(
        parse_moves("R X"),
        Err(CubeError::InvalidMoveToken(token)) if token == "X"
    ));
    assert!(matches!(parse_moves("R3"), Err(CubeError::InvalidMoveToken(_))));
    assert!(matches!(
        "WWW".parse::<CubeState>(),
        Err(CubeError::InvalidStateShape(_))
    ));
    assert!(matches!(
        solve_named(&CubeState::solved(), 5, Duration::from_secs(1), "euclid"),
        Err(CubeError::UnknownHeuristic(_))
    ));
}

#[test_log::test]
fn test_facelet_string_input_round_trips_through_solver() {
    let state = scrambled("B' L2");
    let parsed: CubeState = state.to_facelet_string().parse().unwrap();
    let result = solve(&parsed, &config(4, Heuristic::FaceletMismatch)).unwrap();
    assert_eq!(format_moves(&result.solution.unwrap()), "L2 B");
}

#[test_log::test]
fn test_statistics_are_consistent() {
    let result = solve(&scrambled("R U2 F'"), &config(5, Heuristic::PieceBased)).unwrap();
    let stats = &result.stats;
    assert!(stats.success);
    assert!(!stats.fallback_used);
    assert_eq!(stats.termination, Termination::Solved);
    assert_eq!(stats.solution_length, 3);
    assert!(stats.nodes_generated >= stats.nodes_explored - 1);
    assert!(stats.max_frontier > 0);
    assert_eq!(stats.max_depth_reached, 3);
}

#[test_log::test]
#[ignore = "slow outside release builds"]
fn test_seeded_eight_move_scrambles() {
    for seed in 0..3 {
        let moves = cube_solver::scramble(8, Some(seed));
        let state = apply_sequence(&CubeState::solved(), &moves);
        let result = solve(&state, &config(8, Heuristic::PieceBased)).unwrap();
        let solution = result.solution.unwrap();
        assert!(solution.len() <= 8);
        assert_solves(&state, &solution);
    }
}
