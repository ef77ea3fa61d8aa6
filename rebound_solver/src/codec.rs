//! Canonical encoding of a game state.
//!
//! Search state is deduplicated through [`StateKey`](StateKey)s, compact
//! integer encodings of the robot positions and the active target. Robots
//! are packed in the fixed [`ROBOTS`](rebound_board::ROBOTS) order, so two
//! configurations listing the same robots in different order always encode
//! to the same key. The frontiers of the solvers hold keys only and
//! [`decode`](decode) them back into positions on expansion.

use rebound_board::{Position, PositionEncoding, RobotPositions, Target, ROBOTS};

/// Number of bits of a packed position, one byte per axis.
const POSITION_BITS: u32 = 16;

/// An order-independent, hashable key of a robot configuration and the
/// active target.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct StateKey {
    /// Four 16-bit position slots in canonical robot order, absent slots
    /// zeroed.
    robots: u64,
    /// Presence of the four robots, one bit per color in canonical order.
    mask: u8,
    /// The target's color index and packed position.
    target: u32,
}

/// Encodes robot positions and the active target into a [`StateKey`](StateKey).
pub fn encode(positions: &RobotPositions, target: Target) -> StateKey {
    let mut robots = 0u64;
    let mut mask = 0u8;

    for (slot, &color) in ROBOTS.iter().enumerate() {
        if let Some(pos) = positions.position_of(color) {
            mask |= 1 << slot;
            robots |= u64::from(pack_position(pos)) << (POSITION_BITS * slot as u32);
        }
    }

    StateKey {
        robots,
        mask,
        target: (target.color as u32) << POSITION_BITS | u32::from(pack_position(target.position)),
    }
}

/// Decodes a [`StateKey`](StateKey) back into robot positions and the target.
///
/// Exact inverse of [`encode`](encode).
pub fn decode(key: &StateKey) -> (RobotPositions, Target) {
    let mut positions = [None; 4];

    for slot in 0..ROBOTS.len() {
        if key.mask & (1 << slot) != 0 {
            let packed = (key.robots >> (POSITION_BITS * slot as u32)) as u16;
            positions[slot] = Some(unpack_position(packed));
        }
    }

    let target = Target::new(
        ROBOTS[(key.target >> POSITION_BITS) as usize],
        unpack_position(key.target as u16),
    );

    (RobotPositions::from(positions), target)
}

fn pack_position(pos: Position) -> u16 {
    (pos.column() << (POSITION_BITS / 2)) | pos.row()
}

fn unpack_position(packed: u16) -> Position {
    Position::new(
        packed >> (POSITION_BITS / 2),
        packed & ((1 << (POSITION_BITS / 2)) - 1) as PositionEncoding,
    )
}

#[cfg(test)]
mod tests {
    use super::{decode, encode};
    use rebound_board::{Position, Robot, RobotPositions, Target};

    fn poses() -> Vec<(Robot, Position)> {
        vec![
            (Robot::Red, Position::new(0, 1)),
            (Robot::Blue, Position::new(5, 4)),
            (Robot::Green, Position::new(7, 1)),
            (Robot::Yellow, Position::new(7, 15)),
        ]
    }

    #[test]
    fn key_ignores_pose_order() {
        let target = Target::new(Robot::Green, Position::new(12, 3));

        let mut shuffled = poses();
        shuffled.rotate_left(2);
        shuffled.swap(0, 1);

        let first = encode(&RobotPositions::from_poses(&poses()).unwrap(), target);
        let second = encode(&RobotPositions::from_poses(&shuffled).unwrap(), target);
        assert_eq!(first, second);
    }

    #[test]
    fn round_trip_through_decode() {
        let target = Target::new(Robot::Yellow, Position::new(9, 12));
        let positions = RobotPositions::from_poses(&poses()).unwrap();

        let key = encode(&positions, target);
        let (decoded_positions, decoded_target) = decode(&key);

        assert_eq!(decoded_positions, positions);
        assert_eq!(decoded_target, target);
        assert_eq!(encode(&decoded_positions, decoded_target), key);
    }

    #[test]
    fn round_trip_with_partial_palette() {
        let target = Target::new(Robot::Blue, Position::new(2, 2));
        let positions = RobotPositions::from_poses(&[
            (Robot::Blue, Position::new(15, 0)),
            (Robot::Yellow, Position::new(0, 15)),
        ])
        .unwrap();

        let key = encode(&positions, target);
        let (decoded_positions, decoded_target) = decode(&key);

        assert_eq!(decoded_positions, positions);
        assert_eq!(decoded_target, target);
    }

    #[test]
    fn target_is_part_of_the_key() {
        let positions = RobotPositions::from_poses(&poses()).unwrap();

        let first = encode(&positions, Target::new(Robot::Red, Position::new(3, 3)));
        let second = encode(&positions, Target::new(Robot::Blue, Position::new(3, 3)));
        let third = encode(&positions, Target::new(Robot::Red, Position::new(4, 3)));

        assert_ne!(first, second);
        assert_ne!(first, third);
    }
}
