use crate::collision::CollisionDetector;
use crate::direction::Dir4;
use crate::items::{Item, ItemManager};
use crate::player::Player;
use crate::position::WorldPos;

/// Cell-to-cell interpolated movement for one player.
///
/// Only one move is in flight at a time; direction input while moving is
/// dropped rather than queued.
#[derive(Clone, Debug, Default)]
pub struct MovementComponent {
    target: Option<WorldPos>,
}

impl MovementComponent {
    pub fn is_moving(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<WorldPos> {
        self.target
    }

    /// Head for the neighbouring cell in `dir`. Returns false if already
    /// moving or the cell is blocked; the position is untouched either way.
    pub fn start_move(
        &mut self,
        from: WorldPos,
        dir: Dir4,
        detector: &CollisionDetector,
        tile_size: f32,
    ) -> bool {
        if self.is_moving() {
            return false;
        }
        let to = from.to_grid(tile_size).step(dir, 1);
        if !detector.can_move_to(from, to) {
            return false;
        }
        self.target = Some(to.center(tile_size));
        true
    }

    pub fn stop(&mut self) {
        self.target = None;
    }

    /// Advance `step` world units toward the target, then pick up whatever
    /// lies within `pickup_radius` of the new position.
    pub fn update(
        &mut self,
        player: &mut Player,
        step: f32,
        items: &mut ItemManager,
        pickup_radius: f32,
    ) -> Vec<Item> {
        if let Some(target) = self.target {
            let pos = player.position();
            let remaining = pos.distance(target);
            if remaining <= step {
                player.set_position(target);
                self.target = None;
            } else {
                let t = step / remaining;
                player.set_position(pos.offset((target.x - pos.x) * t, (target.y - pos.y) * t));
            }
        }
        items.collect_near(player.position(), pickup_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::grid::GameMap;
    use crate::player::PlayerId;
    use crate::position::GridPos;

    #[test]
    fn moves_one_cell_and_snaps() {
        let config = GameConfig::default().with_seed(1);
        let map = GameMap::from_csv(".,.,.\n.,.,#").unwrap();
        let detector = CollisionDetector::new(&map, config.tile_size);
        let mut items = ItemManager::new(&config);
        let mut player = Player::new(PlayerId::new("p"), GridPos::new(0, 0).center(40.0), &config);
        let mut movement = MovementComponent::default();

        assert!(movement.start_move(player.position(), Dir4::East, &detector, 40.0));
        assert!(!movement.start_move(player.position(), Dir4::South, &detector, 40.0));

        let mut ticks = 0;
        while movement.is_moving() {
            movement.update(&mut player, config.move_step_px(), &mut items, 24.0);
            ticks += 1;
            assert!(ticks <= 6);
            assert!(player.position().x > 20.0 && player.position().x <= 60.0);
        }
        assert_eq!(player.position(), WorldPos::new(60.0, 20.0));

        // Blocked moves leave the position alone.
        assert!(movement.start_move(player.position(), Dir4::South, &detector, 40.0));
        movement.stop();
        let at = GridPos::new(2, 0).center(40.0);
        player.set_position(at);
        assert!(!movement.start_move(at, Dir4::South, &detector, 40.0));
        assert!(!movement.start_move(at, Dir4::East, &detector, 40.0));
        assert_eq!(player.position(), at);
    }
}
