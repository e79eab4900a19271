//! Move engine: the 18-move alphabet and its facelet permutation tables.
//!
//! Move geometry is pure data. Each clockwise quarter turn is a gather table
//! (`new[i] = old[table[i]]`); counter-clockwise and half turns are composed
//! from those at compile time. Nothing here branches on which face is turning.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cube::{Color, CubeState, Face, FACELET_COUNT};
use crate::error::CubeError;

/// Direction of a face turn, as seen looking at the face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Turn {
    Clockwise,
    CounterClockwise,
    Half,
}

impl Turn {
    /// Net rotation in clockwise quarter turns (1, 3 or 2)
    pub fn quarter_turns(self) -> u8 {
        match self {
            Turn::Clockwise => 1,
            Turn::CounterClockwise => 3,
            Turn::Half => 2,
        }
    }

    /// Turn equivalent to `n` clockwise quarter turns, `None` for a multiple of four
    pub fn from_quarter_turns(n: u8) -> Option<Turn> {
        match n % 4 {
            1 => Some(Turn::Clockwise),
            2 => Some(Turn::Half),
            3 => Some(Turn::CounterClockwise),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn inverse(self) -> Turn {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Half => Turn::Half,
        }
    }
}

/// One of the 18 face turns.
///
/// The derived ordering matches [`Move::ALL`], which fixes successor
/// enumeration and frontier tie-breaking.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

impl Move {
    pub const COUNT: usize = 18;

    /// U U' U2 R R' R2 F F' F2 D D' D2 L L' L2 B B' B2
    pub const ALL: [Move; Move::COUNT] = {
        let turns = [Turn::Clockwise, Turn::CounterClockwise, Turn::Half];
        let mut out = [Move::new(Face::U, Turn::Clockwise); Move::COUNT];
        let mut i = 0;
        while i < Move::COUNT {
            out[i] = Move::new(Face::ALL[i / 3], turns[i % 3]);
            i += 1;
        }
        out
    };

    pub const fn new(face: Face, turn: Turn) -> Self {
        Self { face, turn }
    }

    /// Position in [`Move::ALL`]
    pub fn index(self) -> usize {
        self.face.index() * 3 + self.turn.index()
    }

    /// Quarter turns invert direction; half turns are their own inverse.
    pub fn inverse(self) -> Move {
        Move::new(self.face, self.turn.inverse())
    }

    pub fn is_same_face(self, other: Move) -> bool {
        self.face == other.face
    }

    /// Gather table for this move
    pub fn permutation(self) -> &'static [u8; FACELET_COUNT] {
        &MOVE_TABLES[self.index()]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.turn {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Half => "2",
        };
        write!(f, "{}{}", self.face.letter(), suffix)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Move {
    type Err = CubeError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || CubeError::InvalidMoveToken(token.to_string());
        let mut chars = token.chars();
        let face = chars.next().and_then(Face::from_letter).ok_or_else(invalid)?;
        let turn = match chars.next() {
            None => Turn::Clockwise,
            Some('\'') => Turn::CounterClockwise,
            Some('2') => Turn::Half,
            Some(_) => return Err(invalid()),
        };
        if chars.next().is_some() {
            return Err(invalid());
        }
        Ok(Move::new(face, turn))
    }
}

impl TryFrom<String> for Move {
    type Error = CubeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Move> for String {
    fn from(mv: Move) -> Self {
        mv.to_string()
    }
}

type Permutation = [u8; FACELET_COUNT];

/// Clockwise quarter turns in U R F D L B order.
const QUARTER_TURNS: [Permutation; 6] = [
    // U
    [
        6, 3, 0, 7, 4, 1, 8, 5, 2, 45, 46, 47, 12, 13, 14, 15, 16, 17, 9, 10, 11, 21, 22, 23, 24,
        25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 18, 19, 20, 39, 40, 41, 42, 43, 44, 36, 37,
        38, 48, 49, 50, 51, 52, 53,
    ],
    // R
    [
        0, 1, 20, 3, 4, 23, 6, 7, 26, 15, 12, 9, 16, 13, 10, 17, 14, 11, 18, 19, 29, 21, 22, 32,
        24, 25, 35, 27, 28, 51, 30, 31, 48, 33, 34, 45, 36, 37, 38, 39, 40, 41, 42, 43, 44, 8,
        46, 47, 5, 49, 50, 2, 52, 53,
    ],
    // F
    [
        0, 1, 2, 3, 4, 5, 44, 41, 38, 6, 10, 11, 7, 13, 14, 8, 16, 17, 24, 21, 18, 25, 22, 19,
        26, 23, 20, 15, 12, 9, 30, 31, 32, 33, 34, 35, 36, 37, 27, 39, 40, 28, 42, 43, 29, 45,
        46, 47, 48, 49, 50, 51, 52, 53,
    ],
    // D
    [
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 24, 25, 26, 18, 19, 20, 21, 22, 23,
        42, 43, 44, 33, 30, 27, 34, 31, 28, 35, 32, 29, 36, 37, 38, 39, 40, 41, 51, 52, 53, 45,
        46, 47, 48, 49, 50, 15, 16, 17,
    ],
    // L
    [
        53, 1, 2, 50, 4, 5, 47, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 0, 19, 20, 3, 22, 23,
        6, 25, 26, 18, 28, 29, 21, 31, 32, 24, 34, 35, 42, 39, 36, 43, 40, 37, 44, 41, 38, 45,
        46, 33, 48, 49, 30, 51, 52, 27,
    ],
    // B
    [
        11, 14, 17, 3, 4, 5, 6, 7, 8, 9, 10, 35, 12, 13, 34, 15, 16, 33, 18, 19, 20, 21, 22, 23,
        24, 25, 26, 27, 28, 29, 30, 31, 32, 36, 39, 42, 2, 37, 38, 1, 40, 41, 0, 43, 44, 51, 48,
        45, 52, 49, 46, 53, 50, 47,
    ],
];

/// Table for applying `first` and then `second`.
const fn compose(first: &Permutation, second: &Permutation) -> Permutation {
    let mut out = [0u8; FACELET_COUNT];
    let mut i = 0;
    while i < FACELET_COUNT {
        out[i] = first[second[i] as usize];
        i += 1;
    }
    out
}

const fn build_move_tables() -> [Permutation; Move::COUNT] {
    let mut tables = [[0u8; FACELET_COUNT]; Move::COUNT];
    let mut face = 0;
    while face < 6 {
        let quarter = &QUARTER_TURNS[face];
        let half = compose(quarter, quarter);
        tables[face * 3] = *quarter;
        tables[face * 3 + 1] = compose(&half, quarter);
        tables[face * 3 + 2] = half;
        face += 1;
    }
    tables
}

/// Indexed by [`Move::index`].
static MOVE_TABLES: [Permutation; Move::COUNT] = build_move_tables();

/// Apply one move, producing a new state.
pub fn apply_move(state: &CubeState, mv: Move) -> CubeState {
    let source = state.facelets();
    let mut facelets = [Color::White; FACELET_COUNT];
    for (dst, &from) in facelets.iter_mut().zip(mv.permutation().iter()) {
        *dst = source[from as usize];
    }
    CubeState::from_permuted(facelets)
}

pub fn apply_sequence(state: &CubeState, moves: &[Move]) -> CubeState {
    moves
        .iter()
        .fold(*state, |current, &mv| apply_move(&current, mv))
}

/// Parse and apply a single move token.
pub fn apply_token(state: &CubeState, token: &str) -> Result<CubeState, CubeError> {
    let mv: Move = token.parse()?;
    Ok(apply_move(state, mv))
}

impl CubeState {
    pub fn apply(&self, mv: Move) -> CubeState {
        apply_move(self, mv)
    }

    pub fn apply_sequence(&self, moves: &[Move]) -> CubeState {
        apply_sequence(self, moves)
    }
}

/// Parse a whitespace- or comma-separated move list such as `"R U R' U'"`.
pub fn parse_moves(text: &str) -> Result<Vec<Move>, CubeError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sequence that undoes `moves`
pub fn invert_sequence(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|mv| mv.inverse()).collect()
}

/// Random scramble with no two consecutive moves on the same face.
///
/// A seed makes the scramble reproducible.
pub fn scramble(length: usize, seed: Option<u64>) -> Vec<Move> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut moves: Vec<Move> = Vec::with_capacity(length);
    for _ in 0..length {
        let candidates: SmallVec<[Move; Move::COUNT]> = Move::ALL
            .iter()
            .copied()
            .filter(|mv| moves.last().map_or(true, |last| !last.is_same_face(*mv)))
            .collect();
        moves.push(candidates[rng.gen_range(0..candidates.len())]);
    }
    moves
}
