use std::collections::VecDeque;

use log::{debug, trace};
use rebound_board::{ConfigError, RobotPositions, Round};

use crate::codec::{decode, encode, StateKey};
use crate::util::VisitedNodes;
use crate::{SearchStatus, Solver};

/// Finds an optimal solution by expanding game states in the order they were
/// discovered, i.e. ordered by the number of moves needed to reach them.
#[derive(Debug, Clone)]
pub struct BreadthFirst {
    round: Round,
    /// The FIFO frontier of discovered but unexpanded states.
    queue: VecDeque<StateKey>,
    /// Manages knowledge of visited nodes.
    visited_nodes: VisitedNodes,
    /// Sticky terminal status once the search has ended.
    finished: Option<SearchStatus>,
}

impl BreadthFirst {
    /// Validates the starting configuration and seeds the search.
    pub fn begin(round: Round, start: RobotPositions) -> Result<Self, ConfigError> {
        round.validate_start(&start)?;

        let key = encode(&start, round.target());
        let mut visited_nodes = VisitedNodes::with_capacity(65536);
        visited_nodes.insert_root(key);
        let mut queue = VecDeque::with_capacity(4096);
        queue.push_back(key);

        debug!("breadth-first search seeded from {:?}", start);
        Ok(Self {
            round,
            queue,
            visited_nodes,
            finished: None,
        })
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

impl Solver for BreadthFirst {
    fn step(&mut self) -> SearchStatus {
        if let Some(finished) = &self.finished {
            return finished.clone();
        }

        let key = match self.queue.pop_front() {
            Some(key) => key,
            None => return self.finish(SearchStatus::Exhausted),
        };
        let (positions, _) = decode(&key);

        if self.round.target_reached(&positions) {
            let path = self.visited_nodes.path_to(&key);
            return self.finish(SearchStatus::Solved(path));
        }

        let moves = self.visited_nodes.moves_to_reach(&key) + 1;
        trace!("expanding {:?} at {} moves", positions, moves - 1);

        for (next, moved) in positions.reachable_positions(self.round.board()) {
            let next_key = encode(&next, self.round.target());
            // States found before this one are at most this far from the
            // start, so anything known can be discarded right away.
            if self
                .visited_nodes
                .add_node(next_key, key, moves, moved)
                .was_discarded()
            {
                continue;
            }
            self.queue.push_back(next_key);
        }

        SearchStatus::Searching
    }
}
