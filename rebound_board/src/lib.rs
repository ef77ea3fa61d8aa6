#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

//! Basic components of a sliding-robots puzzle board.
//!
//! The game is played on a square board with walls on some cell edges and a
//! permanently blocked block of cells in the center. A handful of colored
//! robots sit on the board. A robot moved in one of the four cardinal
//! directions slides until it is stopped by a wall, the blocked center,
//! another robot or the edge of the board. Each round a colored target is
//! chosen and the robot of that color has to come to rest on the target cell
//! in as few moves as possible.
//!
//! A [`Board`](Board) stores the walls and the blocked center, a
//! [`Round`](Round) pairs a board with the [`Target`](Target) to reach.
//! Robot positions live outside the board in a
//! [`RobotPositions`](RobotPositions) value, so any number of hypothetical
//! position sets can be probed against the same board. Slide endpoints are
//! computed by the [`resolve_moves`](resolve_moves) family of functions.

mod positions;
mod resolve;

use std::{fmt, ops};

use thiserror::Error;

pub use crate::positions::{Position, PositionEncoding, RobotPositions};
pub use crate::resolve::{resolve_move, resolve_moves, Move, ResolvedMoves};

/// The type used to store the fields of a board.
pub type Fields = Vec<Vec<Field>>;

/// All `Direction`s a robot can move in.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Right,
    Direction::Left,
];

/// All robots defined by their color.
pub const ROBOTS: [Robot; 4] = [Robot::Red, Robot::Blue, Robot::Green, Robot::Yellow];

/// The robots identified by their color.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Robot {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Robot {
    /// Index of the color in [`ROBOTS`](ROBOTS), the canonical robot order.
    pub(crate) const fn index(self) -> usize {
        match self {
            Robot::Red => 0,
            Robot::Blue => 1,
            Robot::Green => 2,
            Robot::Yellow => 3,
        }
    }
}

impl fmt::Display for Robot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let string = format!("{:?}", &self);
        f.pad(&string)
    }
}

/// The directions a robot can be moved in.
///
/// A `Direction` also names the edge of a cell facing that way, so a wall on
/// the `Up` edge of a cell is the wall at its top.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl Direction {
    /// Returns the direction pointing the opposite way.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Direction::Up => 1,
            Direction::Down => 2,
            Direction::Right => 4,
            Direction::Left => 8,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let string = format!("{:?}", &self);
        f.pad(&string)
    }
}

/// The target a round is played for.
///
/// The robot of the target's color has to come to rest on the target's cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Target {
    /// Color of the robot that has to reach the target.
    pub color: Robot,
    /// The cell the robot has to come to rest on.
    pub position: Position,
}

impl Target {
    /// Creates a new target.
    pub fn new(color: Robot, position: Position) -> Self {
        Self { color, position }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let string = format!("{} {:?}", self.color, self.position);
        f.pad(&string)
    }
}

/// The set of wall edges present on a single field.
///
/// Walls are stored on the side they were declared on only. A wall between
/// two neighboring fields may therefore be known to either of the two, and
/// movement resolution checks both.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct WallSet(u8);

impl WallSet {
    /// Checks if a wall on the edge facing `side` is present.
    #[inline(always)]
    pub fn contains(self, side: Direction) -> bool {
        self.0 & side.bit() != 0
    }

    /// Adds a wall on the edge facing `side`.
    pub fn insert(&mut self, side: Direction) {
        self.0 |= side.bit();
    }

    /// Checks if no walls are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A field on the board.
///
/// Contains the walls on the field's edges and whether the field belongs to
/// the permanently blocked center area no robot may ever enter.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Field {
    /// The walls on this field's edges.
    pub walls: WallSet,
    /// Returns `true` if the field is part of the blocked center area.
    pub blocked: bool,
}

impl Field {
    /// Checks if the field has a wall on the edge facing `side`.
    #[inline(always)]
    pub fn has_wall(&self, side: Direction) -> bool {
        self.walls.contains(side)
    }
}

/// A board containing walls and the blocked center area, but no robots.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Board {
    fields: Fields,
}

/// Board impl containing code to create or change a board.
impl Board {
    /// Create a new board with the given `fields`.
    ///
    /// # Panics
    /// Panics if not all vecs in `fields` are the same length.
    pub fn new(fields: Fields) -> Self {
        let board_size = fields.len();

        if fields.iter().any(|v| v.len() != board_size) {
            panic!("Tried to create a non-square board.")
        }

        Self { fields }
    }

    /// Create a new empty board with no walls with `side_length`.
    pub fn new_empty(side_length: PositionEncoding) -> Self {
        Self {
            fields: vec![vec![Field::default(); side_length as usize]; side_length as usize],
        }
    }

    /// Marks the 2x2 block in the center of the board as permanently blocked.
    ///
    /// # Panics
    /// Panics if the board has a side length of less than two.
    pub fn with_center_block(mut self) -> Self {
        let low = (self.side_length() / 2 - 1) as usize;
        for col in low..=low + 1 {
            for row in low..=low + 1 {
                self.fields[col][row].blocked = true;
            }
        }
        self
    }

    /// Adds a wall on the `side` edge of the field at `[col, row]`.
    ///
    /// # Panics
    /// Panics if `[col, row]` is out of bounds.
    pub fn with_wall(
        mut self,
        col: PositionEncoding,
        row: PositionEncoding,
        side: Direction,
    ) -> Self {
        self.fields[col as usize][row as usize].walls.insert(side);
        self
    }
}

/// Board impl containing code to interact with a board.
impl Board {
    /// Returns the side length of the board.
    pub fn side_length(&self) -> PositionEncoding {
        self.fields.len() as PositionEncoding
    }

    /// Checks if `pos` lies within the board.
    pub fn contains(&self, pos: Position) -> bool {
        pos.column() < self.side_length() && pos.row() < self.side_length()
    }

    /// Checks if the field at `pos` has a wall on the edge facing `side`.
    ///
    /// Only the field at `pos` is consulted. A wall declared on the opposite
    /// edge of the neighboring field blocks the same boundary but is not
    /// visible through this check.
    ///
    /// # Panics
    /// Panics if `pos` is out of bounds.
    pub fn has_wall(&self, pos: Position, side: Direction) -> bool {
        self[pos].has_wall(side)
    }

    /// Checks if the field at `pos` belongs to the blocked center area.
    ///
    /// # Panics
    /// Panics if `pos` is out of bounds.
    pub fn is_blocked(&self, pos: Position) -> bool {
        self[pos].blocked
    }

    /// Returns a reference to the fields of the board.
    pub fn get_fields(&self) -> &Fields {
        &self.fields
    }

    /// Returns a mutable reference to the fields of the board.
    pub fn get_mut_fields(&mut self) -> &mut Fields {
        &mut self.fields
    }
}

impl ops::Index<Position> for Board {
    type Output = Field;

    fn index(&self, index: Position) -> &Self::Output {
        &self.fields[index.column() as usize][index.row() as usize]
    }
}

impl ops::IndexMut<Position> for Board {
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        &mut self.fields[index.column() as usize][index.row() as usize]
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        writeln!(fmt, "Board ({0}x{0})", self.side_length())?;
        for row in 0..self.fields.len() {
            let mut line = String::with_capacity(self.fields.len());
            for col in 0..self.fields.len() {
                let field = &self.fields[col][row];
                line.push(match field {
                    f if f.blocked => 'M',
                    f if !f.walls.is_empty() => '#',
                    _ => '.',
                });
            }
            writeln!(fmt, "{}", line)?;
        }
        Ok(())
    }
}

/// One round of the game.
///
/// Represents the problem of finding a path from a starting position on a
/// board to a given target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    board: Board,
    target: Target,
}

impl Round {
    /// Creates a new round.
    pub fn new(board: Board, target: Target) -> Self {
        Self { board, target }
    }

    /// Returns the `Board` the robots move on.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the `Target` to be reached.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Checks if the target has been reached.
    pub fn target_reached(&self, positions: &RobotPositions) -> bool {
        positions.contains_colored_robot(self.target.color, self.target.position)
    }

    /// Checks that `positions` is a well-formed starting configuration for
    /// this round.
    ///
    /// Searching from a malformed configuration is rejected up front instead
    /// of producing nonsense paths. An unreachable target is *not* an error,
    /// a search from it simply ends without a solution.
    pub fn validate_start(&self, positions: &RobotPositions) -> Result<(), ConfigError> {
        for (robot, pos) in positions.robots() {
            if !self.board.contains(pos) {
                return Err(ConfigError::RobotOutOfBounds(robot, pos));
            }
            if self.board.is_blocked(pos) {
                return Err(ConfigError::RobotOnBlockedField(robot, pos));
            }
        }

        let occupied: Vec<_> = positions.robots().collect();
        for (i, &(robot, pos)) in occupied.iter().enumerate() {
            for &(other, other_pos) in &occupied[i + 1..] {
                if pos == other_pos {
                    return Err(ConfigError::OverlappingRobots(robot, other, pos));
                }
            }
        }

        if !self.board.contains(self.target.position) {
            return Err(ConfigError::TargetOutOfBounds(self.target.position));
        }
        if self.board.is_blocked(self.target.position) {
            return Err(ConfigError::TargetOnBlockedField(self.target.position));
        }
        if positions.position_of(self.target.color).is_none() {
            return Err(ConfigError::NoRobotForTarget(self.target.color));
        }

        Ok(())
    }
}

/// The ways a starting configuration can be malformed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A robot color was listed more than once.
    #[error("the {0} robot is listed more than once")]
    DuplicateRobot(Robot),
    /// Two robots were placed on the same field.
    #[error("the {0} and {1} robots both occupy {2:?}")]
    OverlappingRobots(Robot, Robot, Position),
    /// A robot was placed outside the board.
    #[error("the {0} robot at {1:?} is outside the board")]
    RobotOutOfBounds(Robot, Position),
    /// A robot was placed inside the blocked center area.
    #[error("the {0} robot at {1:?} is inside the blocked center")]
    RobotOnBlockedField(Robot, Position),
    /// The target lies outside the board.
    #[error("the target at {0:?} is outside the board")]
    TargetOutOfBounds(Position),
    /// The target lies inside the blocked center area.
    #[error("the target at {0:?} is inside the blocked center")]
    TargetOnBlockedField(Position),
    /// No robot matches the target's color.
    #[error("no {0} robot to send to the {0} target")]
    NoRobotForTarget(Robot),
}

#[cfg(test)]
mod tests {
    use crate::{Board, ConfigError, Direction, Position, Robot, RobotPositions, Round, Target};

    #[test]
    fn board_creation() {
        let board = Board::new_empty(16).with_center_block();
        assert_eq!(board.side_length(), 16);
    }

    #[test]
    #[should_panic]
    fn non_square_board() {
        Board::new(vec![vec![Default::default(); 3]; 4]);
    }

    #[test]
    fn center_block() {
        let board = Board::new_empty(16).with_center_block();
        for &(col, row) in &[(7, 7), (7, 8), (8, 7), (8, 8)] {
            assert!(board.is_blocked(Position::new(col, row)));
        }
        assert!(!board.is_blocked(Position::new(6, 7)));
        assert!(!board.is_blocked(Position::new(9, 8)));
    }

    #[test]
    fn walls_are_one_sided() {
        let board = Board::new_empty(16).with_wall(4, 5, Direction::Right);
        assert!(board.has_wall(Position::new(4, 5), Direction::Right));
        // The same boundary seen from (5, 5) is not stored there.
        assert!(!board.has_wall(Position::new(5, 5), Direction::Left));
    }

    #[test]
    #[should_panic]
    fn wall_query_out_of_bounds() {
        let board = Board::new_empty(16);
        board.has_wall(Position::new(16, 0), Direction::Up);
    }

    #[test]
    fn target_reached() {
        let board = Board::new_empty(16).with_center_block();
        let round = Round::new(board, Target::new(Robot::Red, Position::new(3, 4)));

        let positions = RobotPositions::from_tuples(&[(3, 4), (0, 0), (1, 0), (2, 0)]);
        assert!(round.target_reached(&positions));

        // The blue robot on the target cell does not count.
        let positions = RobotPositions::from_tuples(&[(0, 0), (3, 4), (1, 0), (2, 0)]);
        assert!(!round.target_reached(&positions));
    }

    #[test]
    fn validate_rejects_blocked_robot() {
        let board = Board::new_empty(16).with_center_block();
        let round = Round::new(board, Target::new(Robot::Red, Position::new(3, 4)));
        let positions = RobotPositions::from_tuples(&[(7, 7), (0, 0), (1, 0), (2, 0)]);

        assert_eq!(
            round.validate_start(&positions),
            Err(ConfigError::RobotOnBlockedField(
                Robot::Red,
                Position::new(7, 7)
            ))
        );
    }

    #[test]
    fn validate_rejects_out_of_bounds() {
        let board = Board::new_empty(16).with_center_block();
        let round = Round::new(board, Target::new(Robot::Red, Position::new(3, 4)));
        let positions = RobotPositions::from_tuples(&[(0, 0), (16, 3), (1, 0), (2, 0)]);

        assert_eq!(
            round.validate_start(&positions),
            Err(ConfigError::RobotOutOfBounds(
                Robot::Blue,
                Position::new(16, 3)
            ))
        );
    }

    #[test]
    fn validate_rejects_overlap() {
        let board = Board::new_empty(16).with_center_block();
        let round = Round::new(board, Target::new(Robot::Red, Position::new(3, 4)));
        let positions = RobotPositions::from_tuples(&[(0, 0), (5, 5), (5, 5), (2, 0)]);

        assert_eq!(
            round.validate_start(&positions),
            Err(ConfigError::OverlappingRobots(
                Robot::Blue,
                Robot::Green,
                Position::new(5, 5)
            ))
        );
    }

    #[test]
    fn validate_rejects_missing_target_robot() {
        let board = Board::new_empty(16).with_center_block();
        let round = Round::new(board, Target::new(Robot::Yellow, Position::new(3, 4)));
        let positions = RobotPositions::from_poses(&[(Robot::Red, Position::new(0, 0))]).unwrap();

        assert_eq!(
            round.validate_start(&positions),
            Err(ConfigError::NoRobotForTarget(Robot::Yellow))
        );
    }

    #[test]
    fn validate_rejects_blocked_target() {
        let board = Board::new_empty(16).with_center_block();
        let round = Round::new(board, Target::new(Robot::Red, Position::new(8, 8)));
        let positions = RobotPositions::from_tuples(&[(0, 0), (1, 0), (2, 0), (3, 0)]);

        assert_eq!(
            round.validate_start(&positions),
            Err(ConfigError::TargetOnBlockedField(Position::new(8, 8)))
        );
    }

    #[test]
    fn validate_accepts_partial_palette() {
        let board = Board::new_empty(16).with_center_block();
        let round = Round::new(board, Target::new(Robot::Red, Position::new(3, 4)));
        let positions = RobotPositions::from_poses(&[
            (Robot::Red, Position::new(0, 0)),
            (Robot::Green, Position::new(9, 9)),
        ])
        .unwrap();

        assert_eq!(round.validate_start(&positions), Ok(()));
    }
}
