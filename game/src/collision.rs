use crate::grid::GameMap;
use crate::position::{GridPos, WorldPos};

/// Grid-level movement permission against a map. Bombs do not block.
pub struct CollisionDetector<'a> {
    map: &'a GameMap,
    tile_size: f32,
}

impl<'a> CollisionDetector<'a> {
    pub fn new(map: &'a GameMap, tile_size: f32) -> Self {
        Self { map, tile_size }
    }

    /// Whether an entity at `from` may head for the cell `to`.
    pub fn can_move_to(&self, from: WorldPos, to: GridPos) -> bool {
        let allowed = self.map.is_walkable(to);
        if !allowed {
            log::trace!(
                "Move from {:?} into {:?} blocked",
                from.to_grid(self.tile_size),
                to
            );
        }
        allowed
    }

    pub fn is_walkable(&self, pos: WorldPos) -> bool {
        self.map.is_walkable(pos.to_grid(self.tile_size))
    }
}
