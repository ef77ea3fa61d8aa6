//! Incremental search strategies for the sliding-robots puzzle.
//!
//! Every strategy is a manually stepped state machine: [`step`](Solver::step)
//! performs exactly one node expansion and returns, so a host loop can keep
//! redrawing and handling input while a long search runs. Dropping a solver
//! mid-search discards its frontier and visited set, no teardown needed.
//! [`run`](Solver::run) polls `step` to completion for callers without a
//! tick loop.

mod a_star;
mod breadth_first;
pub mod codec;
mod dijkstra;
mod greedy;
mod util;

use std::fmt;
use std::str::FromStr;

use getset::Getters;
use rebound_board::{ConfigError, Move, RobotPositions, Round};

pub use a_star::AStar;
pub use breadth_first::BreadthFirst;
pub use codec::{decode, encode, StateKey};
pub use dijkstra::Dijkstra;
pub use greedy::GreedyBestFirst;

/// A resumable search for a path to the target of a round.
///
/// Implementations own a copy of the round and the starting positions, so
/// several searches can run against the same board side by side without
/// touching the live game state.
pub trait Solver {
    /// Expands a single node of the search space.
    ///
    /// Returns [`Searching`](SearchStatus::Searching) while there is work
    /// left. Once a terminal status has been reached, further calls keep
    /// returning it.
    fn step(&mut self) -> SearchStatus;

    /// Polls [`step`](Self::step) until the search ends.
    fn run(&mut self) -> SearchStatus {
        loop {
            match self.step() {
                SearchStatus::Searching => continue,
                terminal => return terminal,
            }
        }
    }
}

/// The state of a search after a call to [`Solver::step`](Solver::step).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    /// The search has not ended yet, call `step` again.
    Searching,
    /// A path to the target has been found.
    Solved(Path),
    /// The whole reachable state space has been expanded without reaching
    /// the target. This is an expected outcome for some configurations, not
    /// a failure.
    Exhausted,
}

impl SearchStatus {
    /// Checks if the search has ended.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SearchStatus::Searching)
    }
}

/// A path from a starting position to another position.
///
/// Contains the starting positions of the robots, their final positions and
/// the moves leading from the former to the latter.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct Path {
    start_pos: RobotPositions,
    end_pos: RobotPositions,
    movements: Vec<Move>,
}

impl Path {
    /// Creates a new path containing the starting and final positions of the
    /// robots and the moves connecting them.
    pub fn new(start_pos: RobotPositions, end_pos: RobotPositions, movements: Vec<Move>) -> Self {
        debug_assert!(!movements.is_empty() || start_pos == end_pos);
        Self {
            start_pos,
            end_pos,
            movements,
        }
    }

    /// Creates a new path which ends on the starting position.
    pub fn new_start_on_target(start_pos: RobotPositions) -> Self {
        Self::new(start_pos, start_pos, Vec::new())
    }

    /// Returns the number of moves in the path.
    pub fn len(&self) -> usize {
        self.movements.len()
    }

    /// Checks if the path has a length of 0.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The available search strategies, selectable by name.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Algorithm {
    /// First-in-first-out expansion, optimal by move count.
    BreadthFirst,
    /// Uniform-cost expansion, optimal by move count.
    Dijkstra,
    /// Cost plus Manhattan estimate. Optimal only as long as the estimate
    /// never overshoots, which sliding moves do not guarantee.
    AStar,
    /// Manhattan estimate alone, fast but not optimal.
    GreedyBestFirst,
}

impl Algorithm {
    /// Starts a search with this strategy.
    ///
    /// The starting configuration is validated against the round before any
    /// node is expanded.
    pub fn begin(
        self,
        round: Round,
        start: RobotPositions,
    ) -> Result<Box<dyn Solver>, ConfigError> {
        Ok(match self {
            Algorithm::BreadthFirst => Box::new(BreadthFirst::begin(round, start)?),
            Algorithm::Dijkstra => Box::new(Dijkstra::begin(round, start)?),
            Algorithm::AStar => Box::new(AStar::begin(round, start)?),
            Algorithm::GreedyBestFirst => Box::new(GreedyBestFirst::begin(round, start)?),
        })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Algorithm::BreadthFirst => "bfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::GreedyBestFirst => "greedy",
        };
        f.pad(name)
    }
}

/// The error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unknown strategy {0:?}, expected one of bfs, dijkstra, astar or greedy")]
pub struct UnknownAlgorithm(String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Algorithm::BreadthFirst),
            "dijkstra" | "uniform-cost" => Ok(Algorithm::Dijkstra),
            "astar" | "a-star" => Ok(Algorithm::AStar),
            "greedy" | "greedy-best-first" => Ok(Algorithm::GreedyBestFirst),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}
