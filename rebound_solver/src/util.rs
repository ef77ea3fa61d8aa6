use fxhash::FxHashMap;
use rebound_board::{Move, RobotPositions, Target};
use std::cmp::Reverse;
use std::collections::hash_map::Entry;

use crate::codec::{decode, StateKey};
use crate::Path;

/// The possible outcomes when trying to add a node to [`VisitedNodes`](VisitedNodes).
pub(crate) enum AddNodeOutcome {
    /// The added node was previously unknown and has been added.
    New,
    /// The node has been seen before but is worse than the newly added one.
    WorseKnown,
    /// The node has been seen before and can be reached with fewer moves. The
    /// new node has been discarded.
    BetterKnown,
}

impl AddNodeOutcome {
    /// Returns `true` if the node has been added to `VisitedNodes`.
    pub fn was_added(&self) -> bool {
        match self {
            AddNodeOutcome::New => true,
            AddNodeOutcome::WorseKnown => true,
            AddNodeOutcome::BetterKnown => false,
        }
    }

    /// Returns `true` if the node has been discarded.
    pub fn was_discarded(&self) -> bool {
        !self.was_added()
    }
}

/// Stores the expanded search tree as a map from state keys to the nodes'
/// visit information.
///
/// Provides the add-or-discard bookkeeping shared by all strategies and the
/// backwards [`path_to`](VisitedNodes::path_to) reconstruction.
#[derive(Debug, Clone)]
pub(crate) struct VisitedNodes {
    nodes: FxHashMap<StateKey, VisitedNode>,
}

/// Visit information of a single node.
#[derive(Debug, Clone)]
pub(crate) struct VisitedNode {
    /// The number of moves needed to reach this node.
    moves_to_reach: usize,
    /// The node this one was reached from and the move leading here. `None`
    /// for the root of the search.
    came_from: Option<(StateKey, Move)>,
}

impl VisitedNode {
    /// Returns the number of moves needed to reach this node.
    pub fn moves_to_reach(&self) -> usize {
        self.moves_to_reach
    }
}

impl VisitedNodes {
    /// Creates a new `VisitedNodes` with the given `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Marks `key` as the root of the search.
    pub fn insert_root(&mut self, key: StateKey) {
        self.nodes.insert(
            key,
            VisitedNode {
                moves_to_reach: 0,
                came_from: None,
            },
        );
    }

    /// Returns the visit information of a node if it has been visited before.
    pub fn get(&self, key: &StateKey) -> Option<&VisitedNode> {
        self.nodes.get(key)
    }

    /// Returns the number of moves needed to reach an already visited node.
    ///
    /// # Panics
    /// Panics if `key` has yet to be visited.
    pub fn moves_to_reach(&self, key: &StateKey) -> usize {
        self.get(key)
            .expect("Tried to look up a node that was never visited")
            .moves_to_reach()
    }

    /// Adds a node at `key`, reached from `from` with `moved`.
    ///
    /// If there's already a node at `key` that can be reached with fewer or
    /// equally many `moves`, the new node is discarded. Otherwise the known
    /// node is replaced.
    pub fn add_node(
        &mut self,
        key: StateKey,
        from: StateKey,
        moves: usize,
        moved: Move,
    ) -> AddNodeOutcome {
        match self.nodes.entry(key) {
            Entry::Occupied(occupied) if occupied.get().moves_to_reach() <= moves => {
                AddNodeOutcome::BetterKnown
            }
            Entry::Occupied(mut occupied) => {
                // A shorter path to a known node has been found.
                occupied.insert(VisitedNode {
                    moves_to_reach: moves,
                    came_from: Some((from, moved)),
                });
                AddNodeOutcome::WorseKnown
            }
            Entry::Vacant(vacant) => {
                vacant.insert(VisitedNode {
                    moves_to_reach: moves,
                    came_from: Some((from, moved)),
                });
                AddNodeOutcome::New
            }
        }
    }

    /// Returns the shortest known path to `key` by walking the tree back to
    /// the root.
    ///
    /// # Panics
    /// Panics if `key` has yet to be visited.
    pub fn path_to(&self, key: &StateKey) -> Path {
        let (end_pos, _) = decode(key);
        let mut movements = Vec::with_capacity(32);
        let mut current = *key;

        loop {
            let node = self
                .get(&current)
                .expect("Failed to find a supposed source position");
            match node.came_from {
                Some((previous, moved)) => {
                    movements.push(moved);
                    current = previous;
                }
                None => break,
            }
        }

        movements.reverse();
        let (start_pos, _) = decode(&current);
        Path::new(start_pos, end_pos, movements)
    }
}

/// Frontier ordering of the cost-aware strategies.
///
/// Priorities are ordered from high to low by `value`, so a priority queue
/// pops the node with the lowest value first. Between equal values the
/// earlier discovered node wins, keeping expansion order deterministic.
///
/// ```txt
/// FrontierPriority(value, seq)
///
/// (10, 7) < (10, 2) < (5, 9)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct FrontierPriority {
    // Reordering these fields changes the derived `Ord` implementation.
    value: Reverse<usize>,
    seq: Reverse<u64>,
}

impl FrontierPriority {
    pub fn new(value: usize, seq: u64) -> Self {
        Self {
            value: Reverse(value),
            seq: Reverse(seq),
        }
    }

    /// The keyed value, e.g. accumulated moves for uniform-cost searches.
    pub fn value(&self) -> usize {
        self.value.0
    }
}

/// The Manhattan distance of the target-colored robot to the target.
///
/// Used as the guiding estimate of the informed strategies. Since one slide
/// can cover many fields, the estimate may overshoot the real number of
/// remaining moves.
///
/// # Panics
/// Panics if no robot matches the target's color; validation rules that out
/// before a search starts.
pub(crate) fn target_distance(positions: &RobotPositions, target: Target) -> usize {
    positions
        .position_of(target.color)
        .expect("no robot matches the target color")
        .distance_to(target.position)
}
