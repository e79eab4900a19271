//! Cube state representation.
//!
//! A state is 54 facelet colors laid out face by face in U, R, F, D, L, B
//! order. Each face is stored row-major as seen from outside the cube with the
//! usual unfolded-net orientation (U has B above it, D has F above it, the four
//! side faces are read with U on top).
//!
//! States are plain `Copy` values. Nothing mutates a state in place; the move
//! engine always produces a new one, so a single state can be shared by any
//! number of concurrent searches.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CubeError;

pub const FACELET_COUNT: usize = 54;
pub const FACELETS_PER_FACE: usize = 9;

/// Indices of the six center facelets. Moves never relocate them.
pub const CENTER_INDICES: [usize; 6] = [4, 13, 22, 31, 40, 49];

/// A face of the cube, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Face> {
        match letter {
            'U' => Some(Face::U),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'B' => Some(Face::B),
            _ => None,
        }
    }

    /// Color of this face's center on every valid state
    pub fn color(self) -> Color {
        Color::ALL[self.index()]
    }
}

/// Facelet color. Discriminants match the face each color belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    White = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Orange = 4,
    Blue = 5,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Orange,
        Color::Blue,
    ];

    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Orange => 'O',
            Color::Blue => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Color> {
        match letter.to_ascii_uppercase() {
            'W' => Some(Color::White),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'Y' => Some(Color::Yellow),
            'O' => Some(Color::Orange),
            'B' => Some(Color::Blue),
            _ => None,
        }
    }
}

const SOLVED_FACELETS: [Color; FACELET_COUNT] = {
    let mut facelets = [Color::White; FACELET_COUNT];
    let mut i = 0;
    while i < FACELET_COUNT {
        facelets[i] = Color::ALL[i / FACELETS_PER_FACE];
        i += 1;
    }
    facelets
};

/// Color expected at facelet `index` on the solved cube
pub fn solved_color(index: usize) -> Color {
    SOLVED_FACELETS[index]
}

/// Compact duplicate-detection key: 3 bits per facelet, 21 facelets per word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u64; 3]);

/// A full cube configuration.
///
/// Construction validates shape (54 facelets, 9 of each color, canonical
/// centers) but not physical reachability: a state with a single twisted
/// corner is accepted here and will simply never be solved. Callers that
/// build states by hand own that check.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CubeState {
    facelets: [Color; FACELET_COUNT],
}

impl CubeState {
    pub fn solved() -> Self {
        Self {
            facelets: SOLVED_FACELETS,
        }
    }

    /// Build a state from explicit facelets, validating its shape.
    pub fn from_facelets(facelets: &[Color]) -> Result<Self, CubeError> {
        let facelets: [Color; FACELET_COUNT] = facelets.try_into().map_err(|_| {
            CubeError::InvalidStateShape(format!(
                "expected {} facelets, got {}",
                FACELET_COUNT,
                facelets.len()
            ))
        })?;

        let mut counts = [0usize; 6];
        for color in facelets {
            counts[color as usize] += 1;
        }
        for (color, count) in Color::ALL.iter().zip(counts) {
            if count != FACELETS_PER_FACE {
                return Err(CubeError::InvalidStateShape(format!(
                    "color {:?} appears {} times, expected {}",
                    color, count, FACELETS_PER_FACE
                )));
            }
        }

        for (face, &center) in Face::ALL.iter().zip(CENTER_INDICES.iter()) {
            if facelets[center] != face.color() {
                return Err(CubeError::InvalidStateShape(format!(
                    "center of face {} is {:?}, expected {:?}",
                    face.letter(),
                    facelets[center],
                    face.color()
                )));
            }
        }

        Ok(Self { facelets })
    }

    /// Wrap facelets produced by a permutation of an already valid state.
    pub(crate) fn from_permuted(facelets: [Color; FACELET_COUNT]) -> Self {
        Self { facelets }
    }

    pub fn facelets(&self) -> &[Color; FACELET_COUNT] {
        &self.facelets
    }

    pub fn facelet(&self, index: usize) -> Color {
        self.facelets[index]
    }

    /// The nine facelets of one face, row-major
    pub fn face(&self, face: Face) -> [Color; FACELETS_PER_FACE] {
        let start = face.index() * FACELETS_PER_FACE;
        let mut out = [Color::White; FACELETS_PER_FACE];
        out.copy_from_slice(&self.facelets[start..start + FACELETS_PER_FACE]);
        out
    }

    /// Centers never move, so this is the same as comparing every
    /// non-center facelet against the solved layout.
    pub fn is_solved(&self) -> bool {
        self.facelets == SOLVED_FACELETS
    }

    /// Number of non-center facelets that differ from the solved layout
    pub fn misplaced_facelets(&self) -> usize {
        self.facelets
            .iter()
            .zip(SOLVED_FACELETS.iter())
            .enumerate()
            .filter(|(i, (current, solved))| i % FACELETS_PER_FACE != 4 && current != solved)
            .count()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let mut words = [0u64; 3];
        for (i, &color) in self.facelets.iter().enumerate() {
            words[i / 21] |= (color as u64) << (3 * (i % 21));
        }
        Fingerprint(words)
    }

    /// 54 color letters in storage order, e.g. `WWWWWWWWWRRR...`
    pub fn to_facelet_string(&self) -> String {
        self.facelets.iter().map(|c| c.letter()).collect()
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

impl FromStr for CubeState {
    type Err = CubeError;

    /// Parse 54 color letters (`W R G Y O B`); whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let facelets = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .enumerate()
            .map(|(i, c)| {
                Color::from_letter(c).ok_or_else(|| {
                    CubeError::InvalidStateShape(format!(
                        "unknown color letter `{}` at facelet {}",
                        c, i
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_facelets(&facelets)
    }
}

impl TryFrom<String> for CubeState {
    type Error = CubeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CubeState> for String {
    fn from(state: CubeState) -> Self {
        state.to_facelet_string()
    }
}

impl fmt::Debug for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CubeState({})", self.to_facelet_string())
    }
}

/// Unfolded net: U on top, then L F R B side by side, D at the bottom.
impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = |face: Face, r: usize| -> String {
            let cells = self.face(face);
            cells[r * 3..r * 3 + 3]
                .iter()
                .map(|c| c.letter().to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };

        for r in 0..3 {
            writeln!(f, "      {}", row(Face::U, r))?;
        }
        for r in 0..3 {
            writeln!(
                f,
                "{} {} {} {}",
                row(Face::L, r),
                row(Face::F, r),
                row(Face::R, r),
                row(Face::B, r)
            )?;
        }
        for r in 0..3 {
            writeln!(f, "      {}", row(Face::D, r))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED_STRING: &str = "WWWWWWWWWRRRRRRRRRGGGGGGGGGYYYYYYYYYOOOOOOOOOBBBBBBBBB";

    #[test]
    fn test_solved_layout() {
        let state = CubeState::solved();
        assert!(state.is_solved());
        assert_eq!(state.to_facelet_string(), SOLVED_STRING);
        for face in Face::ALL {
            assert!(state.face(face).iter().all(|&c| c == face.color()));
        }
        assert_eq!(state.misplaced_facelets(), 0);
    }

    #[test]
    fn test_parse_round_trips_and_ignores_whitespace() {
        let spaced = SOLVED_STRING
            .as_bytes()
            .chunks(9)
            .map(|chunk| std::str::from_utf8(chunk).unwrap())
            .collect::<Vec<_>>()
            .join(" \n");
        let state: CubeState = spaced.parse().unwrap();
        assert_eq!(state, CubeState::solved());
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = "WWW".parse::<CubeState>().unwrap_err();
        assert!(matches!(err, CubeError::InvalidStateShape(_)));
    }

    #[test]
    fn test_rejects_unknown_letter() {
        let bad = SOLVED_STRING.replacen('W', "X", 1);
        assert!(matches!(
            bad.parse::<CubeState>(),
            Err(CubeError::InvalidStateShape(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_color_counts() {
        let mut facelets = *CubeState::solved().facelets();
        facelets[0] = Color::Red;
        assert!(matches!(
            CubeState::from_facelets(&facelets),
            Err(CubeError::InvalidStateShape(_))
        ));
    }

    #[test]
    fn test_rejects_moved_center() {
        // Swap the U and R centers: counts stay at nine each
        let mut facelets = *CubeState::solved().facelets();
        facelets.swap(4, 13);
        let err = CubeState::from_facelets(&facelets).unwrap_err();
        assert!(err.to_string().contains("center"));
    }

    #[test]
    fn test_accepts_unreachable_but_well_formed_state() {
        // Two stickers of one edge swapped: a flipped edge is not reachable
        // by face turns but has a valid shape.
        let mut facelets = *CubeState::solved().facelets();
        facelets.swap(7, 19);
        let state = CubeState::from_facelets(&facelets).unwrap();
        assert!(!state.is_solved());
        assert_eq!(state.misplaced_facelets(), 2);
    }

    #[test]
    fn test_fingerprint_distinguishes_states() {
        let solved = CubeState::solved();
        let mut facelets = *solved.facelets();
        facelets.swap(0, 53);
        let other = CubeState::from_facelets(&facelets).unwrap();

        assert_eq!(solved.fingerprint(), CubeState::solved().fingerprint());
        assert_ne!(solved.fingerprint(), other.fingerprint());
    }

    #[test]
    fn test_serde_uses_facelet_string() {
        let json = serde_json::to_string(&CubeState::solved()).unwrap();
        assert_eq!(json, format!("\"{}\"", SOLVED_STRING));
        let back: CubeState = serde_json::from_str(&json).unwrap();
        assert!(back.is_solved());
        assert!(serde_json::from_str::<CubeState>("\"WWW\"").is_err());
    }

    #[test]
    fn test_display_net_shape() {
        let text = CubeState::solved().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0].trim(), "W W W");
        assert_eq!(lines[3], "O O O G G G R R R B B B");
        assert_eq!(lines[8].trim(), "Y Y Y");
    }
}
