use serde::{Deserialize, Serialize};

use crate::power_up::PowerUp;

/// How many bombs a player may have alive at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BombCapacity {
    /// One non-terminal bomb per owner, whatever the bomb-count stat says.
    #[default]
    Single,
    /// Honour the player's bomb-count stat.
    PlayerStat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlastShape {
    /// Center plus the four neighbours, ignoring walls and bomb power.
    #[default]
    FixedCross,
    /// Arms of length `bomb_power`, each stopping at the first solid block.
    PowerScaled,
}

/// One weighted entry of the item drop table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropWeight {
    pub kind: PowerUp,
    pub weight: u32,
}

/// Every tuning constant of a match.
///
/// Times are milliseconds except `tick_delta`, `fuse_secs` and
/// `explosion_secs`, which are seconds of simulated fuse. Distances given as a
/// fraction of a tile are scaled by `tile_size` at use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tile_size: f32,
    pub tick_delta: f32,
    pub fuse_secs: f32,
    pub explosion_secs: f32,
    pub explosion_ttl_ms: u64,
    pub max_health: u32,
    pub invincibility_ms: u64,
    pub base_speed: f32,
    pub speed_boost: f32,
    pub boots_multiplier: f32,
    pub boots_duration_ms: u64,
    pub heal_amount: u32,
    /// Fraction of a tile covered per tick while moving.
    pub move_step: f32,
    /// Pickup radius as a fraction of a tile.
    pub pickup_radius: f32,
    /// Players closer than this fraction of a tile count as overlapping.
    pub overlap_radius: f32,
    pub drop_probability: f64,
    pub drop_table: Vec<DropWeight>,
    pub initial_bomb_count: u32,
    pub initial_bomb_power: u32,
    pub bomb_capacity: BombCapacity,
    pub blast_shape: BlastShape,
    /// Scale the move step by `speed / base_speed`.
    pub speed_scales_movement: bool,
    /// Seed for item rolls and spawn selection. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_size: 40.0,
            tick_delta: 0.016,
            fuse_secs: 2.0,
            explosion_secs: 0.5,
            explosion_ttl_ms: 2000,
            max_health: 3,
            invincibility_ms: 1500,
            base_speed: 2.0,
            speed_boost: 0.5,
            boots_multiplier: 1.5,
            boots_duration_ms: 10_000,
            heal_amount: 1,
            move_step: 0.2,
            pickup_radius: 0.6,
            overlap_radius: 0.75,
            drop_probability: 0.5,
            drop_table: vec![
                DropWeight {
                    kind: PowerUp::Boots,
                    weight: 4,
                },
                DropWeight {
                    kind: PowerUp::LifeElixir,
                    weight: 1,
                },
            ],
            initial_bomb_count: 1,
            initial_bomb_power: 1,
            bomb_capacity: BombCapacity::default(),
            blast_shape: BlastShape::default(),
            speed_scales_movement: false,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn move_step_px(&self) -> f32 {
        self.move_step * self.tile_size
    }

    pub fn pickup_radius_px(&self) -> f32 {
        self.pickup_radius * self.tile_size
    }

    pub fn overlap_radius_px(&self) -> f32 {
        self.overlap_radius * self.tile_size
    }

    /// Wall-clock length of the explosion phase.
    pub fn explosion_ms(&self) -> u64 {
        (self.explosion_secs * 1000.0) as u64
    }
}
