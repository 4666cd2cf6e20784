use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::direction::Dir4;

/// A cell coordinate on the map grid. May lie outside the map; callers check
/// `in_bounds` before indexing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub(crate) fn from_index(x: usize, y: usize) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
        }
    }

    pub fn in_bounds(self, bounds: (usize, usize)) -> bool {
        let (width, height) = bounds;
        let x_in_bounds = self.x >= 0 && (self.x as usize) < width;
        let y_in_bounds = self.y >= 0 && (self.y as usize) < height;
        x_in_bounds && y_in_bounds
    }

    pub fn manhattan(self, to: GridPos) -> u32 {
        let delta = to - self;
        delta.dx.unsigned_abs() + delta.dy.unsigned_abs()
    }

    /// The cell `distance` steps away in `dir`.
    pub fn step(self, dir: Dir4, distance: i32) -> GridPos {
        let delta = dir.delta();
        self + PositionDelta::new(delta.dx * distance, delta.dy * distance)
    }

    /// World coordinate of this cell's center.
    pub fn center(self, tile_size: f32) -> WorldPos {
        WorldPos::new(
            self.x as f32 * tile_size + tile_size / 2.0,
            self.y as f32 * tile_size + tile_size / 2.0,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionDelta {
    pub dx: i32,
    pub dy: i32,
}

impl PositionDelta {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl Add<PositionDelta> for GridPos {
    type Output = GridPos;

    fn add(self, delta: PositionDelta) -> GridPos {
        GridPos {
            x: self.x + delta.dx,
            y: self.y + delta.dy,
        }
    }
}

impl Sub for GridPos {
    type Output = PositionDelta;

    fn sub(self, other: GridPos) -> PositionDelta {
        PositionDelta {
            dx: self.x - other.x,
            dy: self.y - other.y,
        }
    }
}

/// A continuous position in world units (pixels at the default tile size).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, to: WorldPos) -> f32 {
        let dx = to.x - self.x;
        let dy = to.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// The cell containing this point. Negative coordinates floor to negative
    /// cells, which are out of bounds for every map.
    pub fn to_grid(self, tile_size: f32) -> GridPos {
        GridPos::new(
            (self.x / tile_size).floor() as i32,
            (self.y / tile_size).floor() as i32,
        )
    }

    pub fn offset(self, dx: f32, dy: f32) -> WorldPos {
        WorldPos::new(self.x + dx, self.y + dy)
    }

    /// Snap to the center of the containing cell.
    pub fn snapped(self, tile_size: f32) -> WorldPos {
        self.to_grid(tile_size).center(tile_size)
    }
}
