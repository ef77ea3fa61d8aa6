use itertools::Itertools;
use std::{fmt, mem};

use crate::resolve;
use crate::{Board, ConfigError, Direction, Move, Robot, DIRECTIONS, ROBOTS};

/// The type a position is encoded as.
///
/// Depending on the number of bits in a value, different positions on a board
/// can be encoded. A u8 is sufficient to encode any position on the standard
/// board, a u16 allows boards with a side length of up to 256.
pub type PositionEncoding = u16;

/// A position on the board.
///
/// ```txt
/// column   row
/// 00000000|00000000
/// ```
#[derive(Copy, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    encoded_position: PositionEncoding,
}

/// The positions of all robots on the board, indexed by color.
///
/// The slots are kept in the fixed order of [`ROBOTS`](crate::ROBOTS), so two
/// values holding the same robots on the same cells compare equal and hash
/// identically no matter in which order the robots were supplied. Not every
/// color has to be present.
#[derive(Copy, Clone, Hash, PartialEq, Eq)]
pub struct RobotPositions {
    positions: [Option<Position>; 4],
}

impl Position {
    /// Number of bits used for the encoding.
    pub(crate) const BIT_COUNT: PositionEncoding =
        mem::size_of::<PositionEncoding>() as PositionEncoding * 8;

    /// Bitflag used to extract the row information of a position by removing
    /// the column bits.
    ///
    /// The first half of the bits is `0` the rest `1`. This would be
    /// `0000_1111` for `u8` or `0000_0000_1111_1111` for `u16`.
    pub(crate) const ROW_FLAG: PositionEncoding = {
        let mut flag: PositionEncoding = 1;
        // Add more ones until half the bits are ones.
        while flag.count_ones() < mem::size_of::<PositionEncoding>() as u32 * 8 / 2 {
            flag = (flag << 1) + 1;
        }
        flag
    };

    /// Bitflag used to extract the column information of a position by
    /// removing the row bits.
    pub(crate) const COLUMN_FLAG: PositionEncoding = Self::ROW_FLAG ^ PositionEncoding::MAX;

    /// Creates a new position.
    ///
    /// The caller has to make sure, that the given coordinates are within the
    /// bounds of the board.
    pub fn new(column: PositionEncoding, row: PositionEncoding) -> Self {
        Position {
            encoded_position: (column << (Self::BIT_COUNT / 2)) ^ row,
        }
    }

    /// Returns the column the position is in.
    #[inline(always)]
    pub fn column(&self) -> PositionEncoding {
        self.encoded_position >> (Self::BIT_COUNT / 2)
    }

    /// Returns the row the position is in.
    #[inline(always)]
    pub fn row(&self) -> PositionEncoding {
        self.encoded_position & Self::ROW_FLAG
    }

    /// Sets `column` as the new column value.
    fn set_column(&mut self, column: PositionEncoding) {
        self.encoded_position = (column << (Self::BIT_COUNT / 2)) ^ self.row();
    }

    /// Sets `row` as the new row value.
    fn set_row(&mut self, row: PositionEncoding) {
        self.encoded_position = (self.encoded_position & Self::COLUMN_FLAG) ^ row;
    }

    /// Moves the position one field towards `direction`.
    ///
    /// Returns `None` if the step would leave a board with the given
    /// `side_length`.
    pub fn step(mut self, direction: Direction, side_length: PositionEncoding) -> Option<Self> {
        match direction {
            Direction::Right if self.column() + 1 < side_length => {
                self.set_column(self.column() + 1)
            }
            Direction::Left if self.column() > 0 => self.set_column(self.column() - 1),
            Direction::Down if self.row() + 1 < side_length => self.set_row(self.row() + 1),
            Direction::Up if self.row() > 0 => self.set_row(self.row() - 1),
            _ => return None,
        };
        Some(self)
    }

    /// Returns the Manhattan distance between `self` and `other`.
    pub fn distance_to(&self, other: Position) -> usize {
        let column_diff = if self.column() > other.column() {
            self.column() - other.column()
        } else {
            other.column() - self.column()
        };
        let row_diff = if self.row() > other.row() {
            self.row() - other.row()
        } else {
            other.row() - self.row()
        };
        (column_diff + row_diff) as usize
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.column(), self.row())
    }
}

impl From<Position> for (PositionEncoding, PositionEncoding) {
    fn from(pos: Position) -> Self {
        (pos.column(), pos.row())
    }
}

impl From<(PositionEncoding, PositionEncoding)> for Position {
    fn from((col, row): (PositionEncoding, PositionEncoding)) -> Self {
        Self::new(col, row)
    }
}

impl RobotPositions {
    /// Creates the positions from a slice of position tuples.
    ///
    /// The values in `positions` are used in the order red, blue, green,
    /// yellow.
    pub fn from_tuples(positions: &[(PositionEncoding, PositionEncoding); 4]) -> Self {
        RobotPositions {
            positions: [
                Some(Position::from(positions[0])),
                Some(Position::from(positions[1])),
                Some(Position::from(positions[2])),
                Some(Position::from(positions[3])),
            ],
        }
    }

    /// Creates the positions from a list of `(robot, position)` pairs in any
    /// order.
    ///
    /// Between one and four robots can be given. Listing a color twice is
    /// rejected.
    pub fn from_poses(poses: &[(Robot, Position)]) -> Result<Self, ConfigError> {
        let mut positions = [None; 4];
        for &(robot, position) in poses {
            let slot = &mut positions[robot.index()];
            if slot.is_some() {
                return Err(ConfigError::DuplicateRobot(robot));
            }
            *slot = Some(position);
        }
        Ok(RobotPositions { positions })
    }

    /// Returns the position of `robot`, if it is on the board.
    #[inline(always)]
    pub fn position_of(&self, robot: Robot) -> Option<Position> {
        self.positions[robot.index()]
    }

    /// Iterates over the robots on the board in canonical color order.
    pub fn robots(&self) -> impl Iterator<Item = (Robot, Position)> + '_ {
        ROBOTS
            .iter()
            .filter_map(move |&robot| self.position_of(robot).map(|pos| (robot, pos)))
    }

    /// Returns the number of robots on the board.
    pub fn robot_count(&self) -> usize {
        self.positions.iter().flatten().count()
    }

    /// Returns a copy of the positions with `robot` moved to `new_position`.
    pub fn with_robot(mut self, robot: Robot, new_position: Position) -> Self {
        self.positions[robot.index()] = Some(new_position);
        self
    }

    /// Checks if `pos` has any robot on it.
    #[inline(always)]
    pub fn contains_any_robot(&self, pos: Position) -> bool {
        self.positions.iter().any(|&p| p == Some(pos))
    }

    /// Checks if the `robot` is on `pos`.
    #[inline(always)]
    pub fn contains_colored_robot(&self, robot: Robot, pos: Position) -> bool {
        self.positions[robot.index()] == Some(pos)
    }

    /// Creates an Iterator over all positions reachable in one move that
    /// differ from `self`.
    ///
    /// Each item carries the [`Move`](crate::Move) leading to it.
    pub fn reachable_positions<'a>(
        &self,
        board: &'a Board,
    ) -> impl Iterator<Item = (RobotPositions, Move)> + 'a {
        let initial_pos = *self;
        ROBOTS
            .iter()
            .cartesian_product(DIRECTIONS.iter())
            .filter_map(move |(&robot, &direction)| {
                let from = initial_pos.position_of(robot)?;
                let position = resolve::resolve_move(board, &initial_pos, from, direction)?;
                Some((
                    initial_pos.with_robot(robot, position),
                    Move {
                        robot,
                        direction,
                        position,
                    },
                ))
            })
    }
}

impl From<[Option<Position>; 4]> for RobotPositions {
    fn from(positions: [Option<Position>; 4]) -> Self {
        RobotPositions { positions }
    }
}

impl std::ops::Index<Robot> for RobotPositions {
    type Output = Position;

    /// # Panics
    /// Panics if no robot of the given color is on the board.
    fn index(&self, index: Robot) -> &Self::Output {
        self.positions[index.index()]
            .as_ref()
            .expect("no robot of this color is on the board")
    }
}

impl fmt::Debug for RobotPositions {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let slots = ROBOTS
            .iter()
            .map(|&robot| match self.position_of(robot) {
                Some(pos) => format!("{:?}", pos),
                None => "-".to_string(),
            })
            .join(" | ");
        write!(fmt, "[{}]", slots)
    }
}

impl fmt::Display for RobotPositions {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for &robot in ROBOTS.iter() {
            match self.position_of(robot) {
                Some(pos) => writeln!(fmt, "{}: {},{}", robot, pos.column() + 1, pos.row() + 1)?,
                None => writeln!(fmt, "{}: -", robot)?,
            }
        }
        Ok(())
    }
}
