use fxhash::FxBuildHasher;
use log::{debug, trace};
use priority_queue::PriorityQueue;
use rebound_board::{ConfigError, RobotPositions, Round};

use crate::codec::{decode, encode, StateKey};
use crate::util::{FrontierPriority, VisitedNodes};
use crate::{SearchStatus, Solver};

/// Finds an optimal solution by always expanding the state with the fewest
/// accumulated moves.
///
/// With every move costing exactly one, this visits states in the same layers
/// as [`BreadthFirst`](crate::BreadthFirst) and returns paths of the same
/// length, just ordered through a priority queue.
pub struct Dijkstra {
    round: Round,
    /// Frontier keyed by accumulated moves, earliest discovery first on ties.
    frontier: PriorityQueue<StateKey, FrontierPriority, FxBuildHasher>,
    visited_nodes: VisitedNodes,
    /// Discovery counter used for deterministic tie-breaking.
    seq: u64,
    finished: Option<SearchStatus>,
}

impl Dijkstra {
    /// Validates the starting configuration and seeds the search.
    pub fn begin(round: Round, start: RobotPositions) -> Result<Self, ConfigError> {
        round.validate_start(&start)?;

        let key = encode(&start, round.target());
        let mut visited_nodes = VisitedNodes::with_capacity(65536);
        visited_nodes.insert_root(key);
        let mut frontier =
            PriorityQueue::<_, _, FxBuildHasher>::with_capacity_and_hasher(65536, Default::default());
        frontier.push(key, FrontierPriority::new(0, 0));

        debug!("uniform-cost search seeded from {:?}", start);
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

impl Solver for Dijkstra {
    fn step(&mut self) -> SearchStatus {
        if let Some(finished) = &self.finished {
            return finished.clone();
        }

        let (key, priority) = match self.frontier.pop() {
            Some(entry) => entry,
            None => return self.finish(SearchStatus::Exhausted),
        };
        let (positions, _) = decode(&key);

        if self.round.target_reached(&positions) {
            let path = self.visited_nodes.path_to(&key);
            return self.finish(SearchStatus::Solved(path));
        }

        let moves = priority.value() + 1;
        trace!("expanding {:?} at {} moves", positions, priority.value());

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
            let seq = self.next_seq();
            self.frontier
                .push_increase(next_key, FrontierPriority::new(moves, seq));
        }

        SearchStatus::Searching
    }
}

#[cfg(test)]
mod tests {
    use super::Dijkstra;
    use crate::breadth_first::BreadthFirst;
    use crate::{Path, SearchStatus, Solver};
    use rebound_board::{
        Board, Direction, Move, Position, Robot, RobotPositions, Round, Target,
    };

    fn open_board() -> Board {
        Board::new_empty(16).with_center_block()
    }

    fn lone_red(col: u16, row: u16) -> RobotPositions {
        RobotPositions::from_poses(&[(Robot::Red, Position::new(col, row))]).unwrap()
    }

    #[test]
    fn start_on_target() {
        let round = Round::new(open_board(), Target::new(Robot::Red, Position::new(4, 2)));
        let start = lone_red(4, 2);

        let mut solver = Dijkstra::begin(round, start).unwrap();
        assert_eq!(
            solver.run(),
            SearchStatus::Solved(Path::new_start_on_target(start))
        );
    }

    #[test]
    fn finds_the_same_detour_as_breadth_first() {
        let board = open_board().with_wall(15, 0, Direction::Left);
        let round = Round::new(board, Target::new(Robot::Red, Position::new(15, 0)));
        let start = lone_red(0, 0);

        let mut solver = Dijkstra::begin(round.clone(), start).unwrap();
        let expected = Path::new(
            start,
            lone_red(15, 0),
            vec![
                Move::new(Robot::Red, Direction::Down, Position::new(0, 15)),
                Move::new(Robot::Red, Direction::Right, Position::new(15, 15)),
                Move::new(Robot::Red, Direction::Up, Position::new(15, 0)),
            ],
        );
        assert_eq!(solver.run(), SearchStatus::Solved(expected));

        let bfs = match BreadthFirst::begin(round, start).unwrap().run() {
            SearchStatus::Solved(path) => path,
            status => panic!("expected a solution, got {:?}", status),
        };
        assert_eq!(bfs.len(), 3);
    }

    #[test]
    fn unreachable_target_exhausts() {
        let round = Round::new(open_board(), Target::new(Robot::Red, Position::new(8, 0)));
        let start = lone_red(0, 0);

        let mut solver = Dijkstra::begin(round, start).unwrap();
        assert_eq!(solver.run(), SearchStatus::Exhausted);
    }

    #[test]
    fn matches_breadth_first_lengths() {
        // Small board with a few asymmetric walls, checked against every
        // field as the target. Unreachable targets have to exhaust on both
        // sides, which stays cheap with two robots on an 8x8 board.
        let board = Board::new_empty(8)
            .with_center_block()
            .with_wall(2, 0, Direction::Right)
            .with_wall(5, 2, Direction::Down)
            .with_wall(1, 6, Direction::Left)
            .with_wall(6, 5, Direction::Up);
        let start = RobotPositions::from_poses(&[
            (Robot::Red, Position::new(0, 0)),
            (Robot::Blue, Position::new(7, 7)),
        ])
        .unwrap();

        for col in 0..8 {
            for row in 0..8 {
                let target = Target::new(Robot::Red, Position::new(col, row));
                if board.is_blocked(target.position) {
                    continue;
                }
                let round = Round::new(board.clone(), target);

                let dijkstra = Dijkstra::begin(round.clone(), start).unwrap().run();
                let bfs = BreadthFirst::begin(round, start).unwrap().run();

                match (dijkstra, bfs) {
                    (SearchStatus::Solved(a), SearchStatus::Solved(b)) => {
                        assert_eq!(a.len(), b.len(), "differing lengths for {}", target);
                    }
                    (SearchStatus::Exhausted, SearchStatus::Exhausted) => {}
                    (a, b) => panic!("strategies disagree on {}: {:?} vs {:?}", target, a, b),
                }
            }
        }
    }
}
