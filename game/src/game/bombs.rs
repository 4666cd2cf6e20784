use crate::bomb::{Bomb, BombEdge, blast_cells};
use crate::config::{BlastShape, BombCapacity, GameConfig};
use crate::grid::GameMap;
use crate::player::Player;
use crate::position::GridPos;

/// One player's bombs plus the placement policy.
#[derive(Clone, Debug)]
pub struct BombComponent {
    capacity: BombCapacity,
    bombs: Vec<Bomb>,
    /// Bombs that went off since the last `take_detonated`.
    detonated: Vec<Bomb>,
}

impl BombComponent {
    pub fn new(capacity: BombCapacity) -> Self {
        Self {
            capacity,
            bombs: Vec::new(),
            detonated: Vec::new(),
        }
    }

    pub fn active_bombs(&self) -> &[Bomb] {
        &self.bombs
    }

    pub fn has_active_bomb(&self) -> bool {
        !self.bombs.is_empty()
    }

    fn limit(&self, player: &Player) -> usize {
        match self.capacity {
            BombCapacity::Single => 1,
            BombCapacity::PlayerStat => player.bomb_count() as usize,
        }
    }

    /// Drop a bomb where `player` stands. Rejected when the player is at their
    /// limit or already has a bomb in that cell.
    pub fn place(&mut self, player: &Player, config: &GameConfig) -> bool {
        if self.bombs.len() >= self.limit(player) {
            return false;
        }
        let cell = player.position().to_grid(config.tile_size);
        if self.bombs.iter().any(|b| b.cell() == cell) {
            return false;
        }
        let bomb = Bomb::new(
            player.id().clone(),
            player.position(),
            player.bomb_power(),
            config,
        );
        log::debug!("{} placed a bomb at {:?}", player.id(), bomb.cell());
        self.bombs.push(bomb);
        true
    }

    pub fn tick(&mut self, now: u64, delta: f32) {
        let mut finished = Vec::new();
        for (i, bomb) in self.bombs.iter_mut().enumerate() {
            match bomb.tick(now, delta) {
                Some(BombEdge::Detonated) => {
                    log::debug!("Bomb at {:?} went off", bomb.cell());
                    self.detonated.push(bomb.clone());
                }
                Some(BombEdge::Finished) => finished.push(i),
                None => {}
            }
        }
        for &i in finished.iter().rev() {
            self.bombs.remove(i);
        }
    }

    /// Take over another component's bombs, including detonations it has not
    /// reported yet.
    pub fn adopt(&mut self, other: &mut BombComponent) {
        self.bombs.append(&mut other.bombs);
        self.detonated.append(&mut other.detonated);
    }

    /// Detonate every bomb still on its fuse. Returns how many went off.
    pub fn force_explode_all(&mut self, now: u64) -> usize {
        let mut count = 0;
        for bomb in &mut self.bombs {
            if bomb.force_detonate(now) {
                self.detonated.push(bomb.clone());
                count += 1;
            }
        }
        count
    }

    pub fn take_detonated(&mut self) -> Vec<Bomb> {
        std::mem::take(&mut self.detonated)
    }

    pub fn clear_all(&mut self) {
        self.bombs.clear();
        self.detonated.clear();
    }

    pub fn is_in_explosion_range(
        &self,
        cell: GridPos,
        bomb: &Bomb,
        shape: BlastShape,
        map: &GameMap,
    ) -> bool {
        blast_cells(bomb.cell(), shape, bomb.radius(), map).contains(&cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bomb::BombState;
    use crate::player::PlayerId;
    use crate::position::WorldPos;
    use crate::power_up::{Effect, PowerUp};

    fn setup(capacity: BombCapacity) -> (GameConfig, Player, BombComponent) {
        let config = GameConfig {
            bomb_capacity: capacity,
            ..GameConfig::default()
        };
        let player = Player::new(PlayerId::new("p"), WorldPos::new(60.0, 60.0), &config);
        (config, player, BombComponent::new(capacity))
    }

    #[test]
    fn one_bomb_at_a_time() {
        let (config, player, mut bombs) = setup(BombCapacity::Single);
        assert!(bombs.place(&player, &config));
        bombs.tick(16, config.tick_delta);
        let before = bombs.active_bombs()[0].fuse();

        assert!(!bombs.place(&player, &config));
        assert_eq!(bombs.active_bombs().len(), 1);
        assert_eq!(bombs.active_bombs()[0].fuse(), before);
        assert_eq!(bombs.active_bombs()[0].state(), BombState::Ticking);
    }

    #[test]
    fn player_stat_raises_the_cap() {
        let (config, mut player, mut bombs) = setup(BombCapacity::PlayerStat);
        player.apply_effect(PowerUp::BombCount, Effect::AddBombCount(1), 0);
        assert!(bombs.place(&player, &config));
        // Same cell twice is still refused.
        assert!(!bombs.place(&player, &config));
        player.set_position(WorldPos::new(100.0, 60.0));
        assert!(bombs.place(&player, &config));
        player.set_position(WorldPos::new(140.0, 60.0));
        assert!(!bombs.place(&player, &config));
    }

    #[test]
    fn detonations_are_reported_once() {
        let (config, player, mut bombs) = setup(BombCapacity::Single);
        bombs.place(&player, &config);
        assert_eq!(bombs.force_explode_all(100), 1);
        assert_eq!(bombs.force_explode_all(101), 0);
        assert_eq!(bombs.take_detonated().len(), 1);
        assert!(bombs.take_detonated().is_empty());

        bombs.tick(100 + config.explosion_ms(), config.tick_delta);
        assert!(!bombs.has_active_bomb());
        assert!(bombs.place(&player, &config));
        bombs.clear_all();
        assert!(!bombs.has_active_bomb());
    }

    #[test]
    fn explosion_range_check() {
        let (config, player, mut bombs) = setup(BombCapacity::Single);
        let map = GameMap::create_empty(5, 5);
        bombs.place(&player, &config);
        let bomb = &bombs.active_bombs()[0];
        let shape = BlastShape::FixedCross;
        assert!(bombs.is_in_explosion_range(GridPos::new(1, 0), bomb, shape, &map));
        assert!(bombs.is_in_explosion_range(GridPos::new(2, 1), bomb, shape, &map));
        assert!(!bombs.is_in_explosion_range(GridPos::new(2, 2), bomb, shape, &map));
    }
}
