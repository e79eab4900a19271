//! Open and closed pools for the A* phase.
//!
//! The frontier never supports decrease-key. A state may sit in it several
//! times with different costs; the solver discards an entry on pop when its
//! fingerprint is already closed (lazy deletion).

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

use crate::cube::{CubeState, Fingerprint};
use crate::moves::Move;

/// Handle to a path stored in a [`PathArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(usize);

#[derive(Debug, Clone, Copy)]
struct PathLink {
    parent: Option<PathId>,
    mv: Move,
}

/// Parent-linked storage for search paths.
///
/// Each node records only its last move and a link to its parent's path, so
/// extending a path is O(1) and the full sequence is rebuilt once, on success.
#[derive(Debug, Default)]
pub struct PathArena {
    links: Vec<PathLink>,
}

impl PathArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, parent: Option<PathId>, mv: Move) -> PathId {
        self.links.push(PathLink { parent, mv });
        PathId(self.links.len() - 1)
    }

    /// Moves from the root to `id`. `None` is the empty root path.
    pub fn moves(&self, id: Option<PathId>) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut cursor = id;
        while let Some(PathId(index)) = cursor {
            let link = self.links[index];
            moves.push(link.mv);
            cursor = link.parent;
        }
        moves.reverse();
        moves
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// A state waiting in the frontier.
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub state: CubeState,
    /// Moves taken from the initial state
    pub g: u32,
    /// Heuristic estimate of moves remaining
    pub h: u32,
    pub last_move: Option<Move>,
    pub path: Option<PathId>,
}

impl SearchNode {
    pub fn root(state: CubeState, h: u32) -> Self {
        Self {
            state,
            g: 0,
            h,
            last_move: None,
            path: None,
        }
    }

    pub fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// Frontier ordering: lower `f`, then lower `g`, then earlier last move in
/// the alphabet (the root sorts first), then insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub f: u32,
    pub g: u32,
    pub move_rank: u8,
    pub sequence: u64,
}

impl FrontierKey {
    fn new(node: &SearchNode, sequence: u64) -> Self {
        Self {
            f: node.f(),
            g: node.g,
            move_rank: node.last_move.map_or(0, |mv| mv.index() as u8 + 1),
            sequence,
        }
    }
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .cmp(&other.f)
            .then(self.g.cmp(&other.g))
            .then(self.move_rank.cmp(&other.move_rank))
            .then(self.sequence.cmp(&other.sequence))
    }
}

#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node: SearchNode,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Min-priority queue of search nodes keyed by [`FrontierKey`].
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    pushed: u64,
    high_water: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SearchNode) {
        let key = FrontierKey::new(&node, self.pushed);
        self.pushed += 1;
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            node,
        });
        self.high_water = self.high_water.max(self.heap.len());
    }

    pub fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop().map(|entry| entry.node)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the frontier has reached
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

/// Fingerprints of states that have been expanded.
#[derive(Debug, Default)]
pub struct ClosedSet {
    seen: HashSet<Fingerprint>,
}

impl ClosedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the fingerprint was already closed.
    pub fn insert(&mut self, fingerprint: Fingerprint) -> bool {
        self.seen.insert(fingerprint)
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.seen.contains(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
