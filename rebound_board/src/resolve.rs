//! Movement resolution.
//!
//! Computes where a robot comes to rest when sliding across the board, given
//! the walls, the blocked center area and the other robots of a hypothetical
//! position set. The functions here are pure: the same inputs always resolve
//! to the same endpoints and nothing is mutated.
//!
//! Walls are stored one-sided, so a single physical wall shows up differently
//! depending on the approach. A wall on the edge a robot slides towards stops
//! the robot *on* that field, while the same wall seen from the neighboring
//! field refuses entry one field earlier. [`resolve_move`](resolve_move)
//! checks both readings at every step; getting this asymmetry wrong is the
//! classic mistake when touching this module.

use crate::{Board, Direction, Position, Robot, RobotPositions, DIRECTIONS};

/// A single executed robot move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Move {
    /// The robot that was moved.
    pub robot: Robot,
    /// The direction it slid in.
    pub direction: Direction,
    /// The field it came to rest on.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(robot: Robot, direction: Direction, position: Position) -> Self {
        Self {
            robot,
            direction,
            position,
        }
    }
}

/// The slide endpoints of one robot in all four directions.
///
/// A direction maps to `None` if the robot cannot move that way at all.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMoves {
    up: Option<Position>,
    down: Option<Position>,
    right: Option<Position>,
    left: Option<Position>,
}

impl ResolvedMoves {
    /// Returns the endpoint of a slide in `direction`, if the robot can move
    /// that way.
    pub fn get(&self, direction: Direction) -> Option<Position> {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Right => self.right,
            Direction::Left => self.left,
        }
    }

    /// Iterates over the directions the robot can actually move in.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, Position)> + '_ {
        DIRECTIONS
            .iter()
            .filter_map(move |&direction| self.get(direction).map(|pos| (direction, pos)))
    }

    /// Checks if the robot is pinned, i.e. cannot move in any direction.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Resolves the slides of a robot at `from` in all four directions.
///
/// `occupancy` is the full hypothetical position set the slide happens in,
/// including the sliding robot itself.
///
/// # Panics
/// Panics if `from` is out of bounds.
pub fn resolve_moves(board: &Board, occupancy: &RobotPositions, from: Position) -> ResolvedMoves {
    ResolvedMoves {
        up: resolve_move(board, occupancy, from, Direction::Up),
        down: resolve_move(board, occupancy, from, Direction::Down),
        right: resolve_move(board, occupancy, from, Direction::Right),
        left: resolve_move(board, occupancy, from, Direction::Left),
    }
}

/// Resolves a single slide of a robot at `from` towards `direction`.
///
/// Returns the field the robot comes to rest on, or `None` if it cannot move.
/// Scanning fields one at a time, the slide ends
///
/// * *before* a field holding another robot, belonging to the blocked center
///   or walled on the edge facing back at the robot,
/// * *on* a field walled on the edge the robot slides towards,
/// * *on* the last field before the edge of the board.
///
/// A wall on the starting field's edge towards `direction` pins the robot in
/// place.
///
/// # Panics
/// Panics if `from` is out of bounds.
pub fn resolve_move(
    board: &Board,
    occupancy: &RobotPositions,
    from: Position,
    direction: Direction,
) -> Option<Position> {
    if board[from].has_wall(direction) {
        return None;
    }

    let side_length = board.side_length();
    let mut reached = from;

    while let Some(next) = reached.step(direction, side_length) {
        if occupancy.contains_any_robot(next)
            || board.is_blocked(next)
            || board[next].has_wall(direction.opposite())
        {
            break;
        }
        reached = next;
        if board[next].has_wall(direction) {
            break;
        }
    }

    if reached == from {
        None
    } else {
        Some(reached)
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_move, resolve_moves};
    use crate::{Board, Direction, Position, RobotPositions, DIRECTIONS};

    fn lone_robot(col: u16, row: u16) -> RobotPositions {
        RobotPositions::from_poses(&[(crate::Robot::Red, Position::new(col, row))]).unwrap()
    }

    #[test]
    fn slides_to_the_boundary() {
        let board = Board::new_empty(16).with_center_block();
        let occupancy = lone_robot(0, 0);

        let moves = resolve_moves(&board, &occupancy, Position::new(0, 0));
        assert_eq!(moves.get(Direction::Right), Some(Position::new(15, 0)));
        assert_eq!(moves.get(Direction::Down), Some(Position::new(0, 15)));
        assert_eq!(moves.get(Direction::Up), None);
        assert_eq!(moves.get(Direction::Left), None);
        assert_eq!(moves.iter().count(), 2);
    }

    #[test]
    fn walled_in_corner_robot_is_pinned() {
        let board = Board::new_empty(16)
            .with_wall(0, 0, Direction::Right)
            .with_wall(0, 0, Direction::Down);
        let occupancy = lone_robot(0, 0);

        let moves = resolve_moves(&board, &occupancy, Position::new(0, 0));
        assert!(moves.is_empty());
    }

    #[test]
    fn blocking_wall_stops_entry() {
        // Wall on the left edge of the target field: approaching from the
        // left stops one field short.
        let board = Board::new_empty(16)
            .with_center_block()
            .with_wall(15, 0, Direction::Left);
        let occupancy = lone_robot(0, 0);

        assert_eq!(
            resolve_move(&board, &occupancy, Position::new(0, 0), Direction::Right),
            Some(Position::new(14, 0))
        );
    }

    #[test]
    fn docking_wall_stops_on_the_field() {
        // Wall on the right edge of (7, 0): the field can be entered but not
        // passed.
        let board = Board::new_empty(16)
            .with_center_block()
            .with_wall(7, 0, Direction::Right);
        let occupancy = lone_robot(0, 0);

        assert_eq!(
            resolve_move(&board, &occupancy, Position::new(0, 0), Direction::Right),
            Some(Position::new(7, 0))
        );
    }

    #[test]
    fn one_wall_reads_differently_per_approach() {
        // A wall on the bottom edge of (3, 3) is a docking wall when sliding
        // down and a blocking wall when sliding up.
        let board = Board::new_empty(16).with_wall(3, 3, Direction::Down);

        assert_eq!(
            resolve_move(&board, &lone_robot(3, 0), Position::new(3, 0), Direction::Down),
            Some(Position::new(3, 3))
        );
        assert_eq!(
            resolve_move(&board, &lone_robot(3, 10), Position::new(3, 10), Direction::Up),
            Some(Position::new(3, 4))
        );
    }

    #[test]
    fn wall_on_the_starting_field_pins() {
        let board = Board::new_empty(16).with_wall(0, 0, Direction::Right);
        let occupancy = lone_robot(0, 0);

        assert_eq!(
            resolve_move(&board, &occupancy, Position::new(0, 0), Direction::Right),
            None
        );
    }

    #[test]
    fn center_block_refuses_entry() {
        let board = Board::new_empty(16).with_center_block();
        let occupancy = lone_robot(7, 0);

        assert_eq!(
            resolve_move(&board, &occupancy, Position::new(7, 0), Direction::Down),
            Some(Position::new(7, 6))
        );
    }

    #[test]
    fn other_robot_shortens_the_slide() {
        let board = Board::new_empty(16).with_center_block();
        let occupancy = RobotPositions::from_tuples(&[(0, 0), (9, 0), (0, 5), (5, 5)]);

        // Blocked by blue at (9, 0), while an empty board would let the robot
        // slide through to the boundary.
        assert_eq!(
            resolve_move(&board, &occupancy, Position::new(0, 0), Direction::Right),
            Some(Position::new(8, 0))
        );
        assert_eq!(
            resolve_move(&board, &lone_robot(0, 0), Position::new(0, 0), Direction::Right),
            Some(Position::new(15, 0))
        );
    }

    #[test]
    fn resolution_is_pure() {
        let board = Board::new_empty(16)
            .with_center_block()
            .with_wall(4, 2, Direction::Down)
            .with_wall(11, 9, Direction::Left);
        let occupancy = RobotPositions::from_tuples(&[(0, 2), (9, 0), (0, 5), (5, 5)]);

        let first = resolve_moves(&board, &occupancy, Position::new(0, 2));
        let second = resolve_moves(&board, &occupancy, Position::new(0, 2));
        assert_eq!(first, second);
    }

    #[test]
    fn never_resolves_onto_robots_or_blocked_fields() {
        let board = Board::new_empty(16).with_center_block();
        let occupancy = RobotPositions::from_tuples(&[(7, 0), (8, 0), (7, 15), (6, 6)]);

        for (_, from) in occupancy.robots() {
            for &direction in DIRECTIONS.iter() {
                if let Some(end) = resolve_move(&board, &occupancy, from, direction) {
                    assert!(!occupancy.contains_any_robot(end));
                    assert!(!board.is_blocked(end));
                }
            }
        }
    }
}
