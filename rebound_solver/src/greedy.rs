use fxhash::FxBuildHasher;
use log::{debug, trace};
use priority_queue::PriorityQueue;
use rebound_board::{ConfigError, RobotPositions, Round};

use crate::codec::{decode, encode, StateKey};
use crate::util::{target_distance, FrontierPriority, VisitedNodes};
use crate::{SearchStatus, Solver};

/// A solver that always chases the state whose target-colored robot sits
/// closest to the target, measured in Manhattan distance.
///
/// Ignoring the accumulated moves makes this the fastest of the strategies
/// on most boards and the only one without any optimality claim.
pub struct GreedyBestFirst {
    round: Round,
    /// Frontier keyed by the estimate alone, earliest discovery first on
    /// ties.
    frontier: PriorityQueue<StateKey, FrontierPriority, FxBuildHasher>,
    visited_nodes: VisitedNodes,
    seq: u64,
    finished: Option<SearchStatus>,
}

impl GreedyBestFirst {
    /// Validates the starting configuration and seeds the search.
    pub fn begin(round: Round, start: RobotPositions) -> Result<Self, ConfigError> {
        round.validate_start(&start)?;

        let key = encode(&start, round.target());
        let mut visited_nodes = VisitedNodes::with_capacity(65536);
        visited_nodes.insert_root(key);
        let mut frontier =
            PriorityQueue::<_, _, FxBuildHasher>::with_capacity_and_hasher(65536, Default::default());
        frontier.push(
            key,
            FrontierPriority::new(target_distance(&start, round.target()), 0),
        );

        debug!("greedy best-first search seeded from {:?}", start);
        Ok(Self {
            round,
            frontier,
            visited_nodes,
            seq: 1,
            finished: None,
        })
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.seq;
        self.seq += 1;
        seq
    }

    fn finish(&mut self, status: SearchStatus) -> SearchStatus {
        match &status {
            SearchStatus::Solved(path) => debug!("solved in {} moves", path.len()),
            SearchStatus::Exhausted => debug!("state space exhausted without a solution"),
            SearchStatus::Searching => unreachable!(),
        }
        self.finished = Some(status.clone());
        status
    }
}

impl Solver for GreedyBestFirst {
    fn step(&mut self) -> SearchStatus {
        if let Some(finished) = &self.finished {
            return finished.clone();
        }

        let (key, _) = match self.frontier.pop() {
            Some(entry) => entry,
            None => return self.finish(SearchStatus::Exhausted),
        };
        let (positions, _) = decode(&key);

        if self.round.target_reached(&positions) {
            let path = self.visited_nodes.path_to(&key);
            return self.finish(SearchStatus::Solved(path));
        }

        let moves = self.visited_nodes.moves_to_reach(&key) + 1;
        trace!("expanding {:?} at {} moves", positions, moves - 1);

        let reachable: Vec<_> = positions.reachable_positions(self.round.board()).collect();
        for (next, moved) in reachable {
            let next_key = encode(&next, self.round.target());
            if self
                .visited_nodes
                .add_node(next_key, key, moves, moved)
                .was_discarded()
            {
                continue;
            }
            let estimate = target_distance(&next, self.round.target());
            let seq = self.next_seq();
            self.frontier
                .push_increase(next_key, FrontierPriority::new(estimate, seq));
        }

        SearchStatus::Searching
    }
}
