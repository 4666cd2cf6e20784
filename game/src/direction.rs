use crate::position::PositionDelta;

/// A movement intent as decoded by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir4 {
    North,
    South,
    East,
    West,
}

impl Dir4 {
    pub fn delta(self) -> PositionDelta {
        match self {
            Dir4::North => PositionDelta::new(0, -1),
            Dir4::South => PositionDelta::new(0, 1),
            Dir4::East => PositionDelta::new(1, 0),
            Dir4::West => PositionDelta::new(-1, 0),
        }
    }

    /// Arm order used by blast patterns: north, south, east, west.
    pub fn all() -> [Self; 4] {
        [Self::North, Self::South, Self::East, Self::West]
    }

    pub fn opposite(self) -> Dir4 {
        match self {
            Dir4::North => Dir4::South,
            Dir4::South => Dir4::North,
            Dir4::East => Dir4::West,
            Dir4::West => Dir4::East,
        }
    }
}
