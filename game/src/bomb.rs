use crate::config::{BlastShape, GameConfig};
use crate::direction::Dir4;
use crate::grid::GameMap;
use crate::player::PlayerId;
use crate::position::{GridPos, WorldPos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombState {
    Placed,
    Ticking,
    Exploding,
    /// Terminal; the bomb leaves the active set.
    Exploded,
}

/// A state change worth telling the owner about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombEdge {
    /// Ticking to Exploding. Happens at most once per bomb.
    Detonated,
    /// Exploding to Exploded.
    Finished,
}

#[derive(Clone, Debug)]
pub struct Bomb {
    owner: PlayerId,
    cell: GridPos,
    world: WorldPos,
    fuse: f32,
    fuse_total: f32,
    radius: u32,
    state: BombState,
    explosion_started: Option<u64>,
    explosion_ms: u64,
}

impl Bomb {
    /// A bomb in the cell containing `requested`, aligned to that cell's center.
    pub fn new(owner: PlayerId, requested: WorldPos, radius: u32, config: &GameConfig) -> Self {
        let cell = requested.to_grid(config.tile_size);
        Self {
            owner,
            cell,
            world: cell.center(config.tile_size),
            fuse: config.fuse_secs,
            fuse_total: config.fuse_secs,
            radius,
            state: BombState::Placed,
            explosion_started: None,
            explosion_ms: config.explosion_ms(),
        }
    }

    pub fn owner(&self) -> &PlayerId {
        &self.owner
    }

    pub fn cell(&self) -> GridPos {
        self.cell
    }

    pub fn world(&self) -> WorldPos {
        self.world
    }

    pub fn fuse(&self) -> f32 {
        self.fuse
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn state(&self) -> BombState {
        self.state
    }

    pub fn explosion_started(&self) -> Option<u64> {
        self.explosion_started
    }

    /// Placed, ticking or exploding.
    pub fn is_active(&self) -> bool {
        self.state != BombState::Exploded
    }

    /// 0.0 when placed, 1.0 once the fuse has burnt down.
    pub fn fuse_progress(&self) -> f32 {
        if self.fuse_total <= 0.0 {
            return 1.0;
        }
        (1.0 - self.fuse / self.fuse_total).clamp(0.0, 1.0)
    }

    /// Advance by one simulation step of `delta` seconds.
    pub fn tick(&mut self, now: u64, delta: f32) -> Option<BombEdge> {
        match self.state {
            BombState::Placed | BombState::Ticking => {
                self.state = BombState::Ticking;
                self.fuse -= delta;
                (self.fuse <= 0.0).then(|| self.detonate(now))
            }
            BombState::Exploding => {
                let started = self.explosion_started.unwrap_or(now);
                if now.saturating_sub(started) >= self.explosion_ms {
                    self.state = BombState::Exploded;
                    Some(BombEdge::Finished)
                } else {
                    None
                }
            }
            BombState::Exploded => None,
        }
    }

    /// Skip the rest of the fuse. Only a bomb that has not gone off yet
    /// detonates; returns whether this one did.
    pub fn force_detonate(&mut self, now: u64) -> bool {
        match self.state {
            BombState::Placed | BombState::Ticking => {
                self.detonate(now);
                true
            }
            BombState::Exploding | BombState::Exploded => false,
        }
    }

    fn detonate(&mut self, now: u64) -> BombEdge {
        self.fuse = 0.0;
        self.state = BombState::Exploding;
        self.explosion_started = Some(now);
        BombEdge::Detonated
    }
}

/// Cells reached by arms of length `arm` around `center`, center first and
/// then north, south, east and west. Cells outside `bounds` are left out.
pub fn explosion_range(center: GridPos, arm: u32, bounds: (usize, usize)) -> Vec<GridPos> {
    let mut cells = Vec::new();
    if !center.in_bounds(bounds) {
        return cells;
    }
    cells.push(center);
    for dir in Dir4::all() {
        for distance in 1..=arm as i32 {
            let cell = center.step(dir, distance);
            if !cell.in_bounds(bounds) {
                break;
            }
            cells.push(cell);
        }
    }
    cells
}

/// The cells a bomb at `center` reaches on `map`.
///
/// A power-scaled arm runs `power` cells and stops at the first solid block;
/// that block is included if an explosion can destroy it.
pub fn blast_cells(center: GridPos, shape: BlastShape, power: u32, map: &GameMap) -> Vec<GridPos> {
    match shape {
        BlastShape::FixedCross => explosion_range(center, 1, map.bounds()),
        BlastShape::PowerScaled => {
            let mut cells = Vec::new();
            if !center.in_bounds(map.bounds()) {
                return cells;
            }
            cells.push(center);
            for dir in Dir4::all() {
                for distance in 1..=power as i32 {
                    let cell = center.step(dir, distance);
                    let Some(block) = map.block(cell) else {
                        break;
                    };
                    if block.is_solid() {
                        if block.is_destructible() {
                            cells.push(cell);
                        }
                        break;
                    }
                    cells.push(cell);
                }
            }
            cells
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig {
            tick_delta: 0.25,
            ..GameConfig::default()
        }
    }

    #[test]
    fn placement_snaps_to_cell_center() {
        let bomb = Bomb::new(PlayerId::new("a"), WorldPos::new(47.0, 119.0), 1, &config());
        assert_eq!(bomb.cell(), GridPos::new(1, 2));
        assert_eq!(bomb.world(), WorldPos::new(60.0, 100.0));
        assert_eq!(bomb.state(), BombState::Placed);
    }

    #[test]
    fn detonates_exactly_once_then_finishes() {
        let config = config();
        let mut bomb = Bomb::new(PlayerId::new("a"), WorldPos::new(20.0, 20.0), 1, &config);
        let mut now = 0;
        let mut edges = Vec::new();
        for _ in 0..8 {
            now += 250;
            edges.extend(bomb.tick(now, config.tick_delta));
        }
        assert_eq!(edges, vec![BombEdge::Detonated]);
        assert_eq!(bomb.state(), BombState::Exploding);
        assert_eq!(bomb.explosion_started(), Some(2000));
        assert_eq!(bomb.fuse_progress(), 1.0);

        assert_eq!(bomb.tick(2499, config.tick_delta), None);
        assert_eq!(bomb.tick(2500, config.tick_delta), Some(BombEdge::Finished));
        assert!(!bomb.is_active());
        assert_eq!(bomb.tick(9999, config.tick_delta), None);
    }

    #[test]
    fn fuse_progress_moves_forward() {
        let config = config();
        let mut bomb = Bomb::new(PlayerId::new("a"), WorldPos::new(20.0, 20.0), 1, &config);
        assert_eq!(bomb.fuse_progress(), 0.0);
        bomb.tick(250, 0.5);
        assert_eq!(bomb.fuse_progress(), 0.25);
    }

    #[test]
    fn forcing_only_works_before_detonation() {
        let config = config();
        let mut bomb = Bomb::new(PlayerId::new("a"), WorldPos::new(20.0, 20.0), 1, &config);
        bomb.tick(16, config.tick_delta);
        assert!(bomb.force_detonate(100));
        assert_eq!(bomb.state(), BombState::Exploding);
        assert!(!bomb.force_detonate(200));
        assert_eq!(bomb.explosion_started(), Some(100));
    }

    #[test]
    fn corner_range_has_three_cells() {
        let range = explosion_range(GridPos::new(0, 0), 1, (5, 5));
        assert_eq!(
            range,
            vec![GridPos::new(0, 0), GridPos::new(0, 1), GridPos::new(1, 0)]
        );
    }

    #[test]
    fn interior_range_is_a_full_cross() {
        let range = explosion_range(GridPos::new(2, 2), 1, (5, 5));
        assert_eq!(
            range,
            vec![
                GridPos::new(2, 2),
                GridPos::new(2, 1),
                GridPos::new(2, 3),
                GridPos::new(3, 2),
                GridPos::new(1, 2),
            ]
        );
    }

    #[test]
    fn range_stays_inside_every_map_cell() {
        for (w, h) in [(1, 1), (2, 3), (7, 4)] {
            for y in 0..h {
                for x in 0..w {
                    let center = GridPos::new(x, y);
                    let range = explosion_range(center, 1, (w as usize, h as usize));
                    assert_eq!(range[0], center);
                    assert!(range.iter().all(|c| c.in_bounds((w as usize, h as usize))));
                    assert!(range.len() <= 5);
                }
            }
        }
        assert!(explosion_range(GridPos::new(-1, 0), 1, (3, 3)).is_empty());
    }

    #[test]
    fn fixed_cross_ignores_walls() {
        let map = GameMap::from_csv("#,#,#\n#,.,#\n#,#,#").unwrap();
        let cells = blast_cells(GridPos::new(1, 1), BlastShape::FixedCross, 3, &map);
        assert_eq!(cells.len(), 5);
    }

    #[test]
    fn power_scaled_arms_stop_at_solids() {
        let map = GameMap::from_csv(
            ".,.,.,.,.\n\
             .,.,#,.,.\n\
             .,p,.,.,.\n\
             .,.,.,.,.\n\
             .,.,.,.,.",
        )
        .unwrap();
        let cells = blast_cells(GridPos::new(2, 2), BlastShape::PowerScaled, 2, &map);
        // North hits the stump, west includes the pumpkin and stops.
        assert_eq!(
            cells,
            vec![
                GridPos::new(2, 2),
                GridPos::new(2, 3),
                GridPos::new(2, 4),
                GridPos::new(3, 2),
                GridPos::new(4, 2),
                GridPos::new(1, 2),
            ]
        );
    }
}
