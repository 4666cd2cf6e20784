use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bomb::{Bomb, blast_cells};
use crate::config::{BombCapacity, GameConfig};
use crate::direction::Dir4;
use crate::grid::{BlockKind, GameMap};
use crate::items::{Item, ItemManager};
use crate::player::{Player, PlayerId};
use crate::position::{GridPos, WorldPos};
use crate::power_up::EffectTable;

mod bombs;
mod component;
mod end;
mod movement;

pub use bombs::BombComponent;
pub use component::PlayerComponent;
pub use end::GameEndDetector;
pub use movement::MovementComponent;

use component::TickContext;

/// One detonation, kept around for presentation until its TTL runs out.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplosionEvent {
    pub owner: PlayerId,
    pub center: GridPos,
    /// Affected cells, center first.
    pub cells: Vec<GridPos>,
    /// Centers of `cells` in world space, same order.
    pub positions: Vec<WorldPos>,
    pub created_at: u64,
}

/// Everything observable that happened during one `update`.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    BombExploded(ExplosionEvent),
    BlockDestroyed { cell: GridPos, kind: BlockKind },
    ItemSpawned(Item),
    ItemCollected { player: PlayerId, item: Item },
    PlayerDamaged { player: PlayerId, health: u32 },
    PlayerDied { player: PlayerId },
    GameOver { winner: Option<PlayerId> },
}

/// Owns the match: map, roster, pickups and live explosions.
pub struct GameManager {
    config: GameConfig,
    map: GameMap,
    players: Vec<PlayerComponent>,
    /// Bombs whose owner left the game; they still go off.
    orphans: BombComponent,
    items: ItemManager,
    effects: EffectTable,
    explosions: Vec<ExplosionEvent>,
    end: GameEndDetector,
    spawn_rng: StdRng,
}

impl GameManager {
    pub fn new(map: GameMap, config: GameConfig) -> Self {
        let spawn_rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_os_rng(),
        };
        Self {
            items: ItemManager::new(&config),
            effects: EffectTable::from_config(&config),
            map,
            players: Vec::new(),
            orphans: BombComponent::new(BombCapacity::Single),
            explosions: Vec::new(),
            end: GameEndDetector::default(),
            spawn_rng,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    pub fn items(&self) -> &ItemManager {
        &self.items
    }

    /// Power-up effects applied on pickup. Rows can be replaced mid-game.
    pub fn effects_mut(&mut self) -> &mut EffectTable {
        &mut self.effects
    }

    pub fn explosions(&self) -> &[ExplosionEvent] {
        &self.explosions
    }

    pub fn end_detector(&self) -> &GameEndDetector {
        &self.end
    }

    fn component(&self, id: &PlayerId) -> Option<&PlayerComponent> {
        self.players.iter().find(|c| c.player().id() == id)
    }

    /// Add a player standing in the center of `spawn`. Fails on a duplicate
    /// id or a cell that is outside the map or solid.
    pub fn add_player(&mut self, id: PlayerId, spawn: GridPos) -> bool {
        if self.component(&id).is_some() || !self.map.is_walkable(spawn) {
            return false;
        }
        let position = spawn.center(self.config.tile_size);
        log::debug!("{id} joins at {spawn:?}");
        self.end.register(id.clone());
        self.players.push(PlayerComponent::new(id, position, &self.config));
        true
    }

    /// Add a player on the next free spawn cell of the map.
    pub fn spawn_player(&mut self, id: PlayerId) -> Option<GridPos> {
        let occupied: Vec<GridPos> = self
            .players
            .iter()
            .map(|c| c.player().position().to_grid(self.config.tile_size))
            .collect();
        let spawn = self.map.find_spawn(&mut self.spawn_rng, &occupied)?;
        self.add_player(id, spawn).then_some(spawn)
    }

    /// Take a player out of the game. Their bombs stay on the map and keep
    /// ticking.
    pub fn remove_player(&mut self, id: &PlayerId) -> Option<Player> {
        let index = self.players.iter().position(|c| c.player().id() == id)?;
        self.end.unregister(id);
        let mut component = self.players.remove(index);
        self.orphans.adopt(component.bombs_mut());
        Some(component.player().clone())
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.component(id).map(PlayerComponent::player)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().map(PlayerComponent::player)
    }

    pub fn alive_players(&self) -> impl Iterator<Item = &Player> {
        self.players().filter(|p| p.is_alive())
    }

    pub fn dead_players(&self) -> impl Iterator<Item = &Player> {
        self.players().filter(|p| !p.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive_players().count()
    }

    pub fn is_game_over(&self) -> bool {
        self.end.is_ended()
    }

    /// Every bomb on the map, whoever owns it.
    pub fn bombs(&self) -> impl Iterator<Item = &Bomb> {
        self.players
            .iter()
            .flat_map(|c| c.bombs().active_bombs().iter())
            .chain(self.orphans.active_bombs())
    }

    pub fn move_player(&mut self, id: &PlayerId, dir: Dir4) -> bool {
        let Some(component) = self.players.iter_mut().find(|c| c.player().id() == id) else {
            return false;
        };
        component.try_move(dir, &self.map, &self.config)
    }

    pub fn place_bomb(&mut self, id: &PlayerId, now: u64) -> bool {
        let Some(component) = self.players.iter_mut().find(|c| c.player().id() == id) else {
            return false;
        };
        let placed = component.place_bomb(&self.config);
        if !placed {
            log::trace!("{id} could not place a bomb at {now}");
        }
        placed
    }

    /// Whether two players are close enough to be drawn on top of each other.
    /// Overlap never blocks movement.
    pub fn players_overlap(&self, a: &PlayerId, b: &PlayerId) -> bool {
        match (self.player(a), self.player(b)) {
            (Some(a), Some(b)) => {
                a.position().distance(b.position()) < self.config.overlap_radius_px()
            }
            _ => false,
        }
    }

    /// Whether the player shares a cell with any live bomb. Bombs do not block.
    pub fn standing_on_bomb(&self, id: &PlayerId) -> bool {
        let Some(player) = self.player(id) else {
            return false;
        };
        let cell = player.position().to_grid(self.config.tile_size);
        self.bombs().any(|b| b.cell() == cell)
    }

    pub fn on_game_end(&mut self, callback: impl FnMut(Option<&PlayerId>) + 'static) {
        self.end.on_game_end(callback);
    }

    /// Set off every bomb still on its fuse and re-arm the end detector. The
    /// detonations are resolved by the next `update`.
    pub fn reset(&mut self, now: u64) {
        let forced: usize = self
            .players
            .iter_mut()
            .map(|c| c.bombs_mut().force_explode_all(now))
            .sum::<usize>()
            + self.orphans.force_explode_all(now);
        if forced > 0 {
            log::debug!("Reset forced {forced} bombs");
        }
        self.end.reset();
    }

    /// Run one simulation step.
    pub fn update(&mut self, now: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();

        let mut ctx = TickContext {
            items: &mut self.items,
            effects: &self.effects,
            config: &self.config,
        };
        for component in &mut self.players {
            events.extend(component.update(now, &mut ctx));
        }

        self.orphans.tick(now, self.config.tick_delta);

        let detonated: Vec<Bomb> = self
            .players
            .iter_mut()
            .flat_map(|c| c.bombs_mut().take_detonated())
            .chain(self.orphans.take_detonated())
            .collect();
        for bomb in detonated {
            self.resolve_explosion(&bomb, now, &mut events);
        }

        let ttl = self.config.explosion_ttl_ms;
        self.explosions.retain(|e| now.saturating_sub(e.created_at) <= ttl);

        let players = &self.players;
        let ended = self.end.check(|id| {
            players
                .iter()
                .any(|c| c.player().id() == id && c.player().is_alive())
        });
        if let Some(winner) = ended {
            events.push(GameEvent::GameOver { winner });
        }

        events
    }

    fn resolve_explosion(&mut self, bomb: &Bomb, now: u64, events: &mut Vec<GameEvent>) {
        let tile = self.config.tile_size;
        let cells = blast_cells(bomb.cell(), self.config.blast_shape, bomb.radius(), &self.map);
        let explosion = ExplosionEvent {
            owner: bomb.owner().clone(),
            center: bomb.cell(),
            positions: cells.iter().map(|c| c.center(tile)).collect(),
            cells,
            created_at: now,
        };
        events.push(GameEvent::BombExploded(explosion.clone()));

        for component in &mut self.players {
            let cell = component.player().position().to_grid(tile);
            if !explosion.cells.contains(&cell) || !component.take_damage(1, now) {
                continue;
            }
            let player = component.player();
            events.push(GameEvent::PlayerDamaged {
                player: player.id().clone(),
                health: player.health(),
            });
            if !player.is_alive() {
                events.push(GameEvent::PlayerDied {
                    player: player.id().clone(),
                });
            }
        }

        for &cell in &explosion.cells {
            let Some(kind) = self.map.destroy_block(cell) else {
                continue;
            };
            log::debug!("Destroyed {} at {cell:?}", kind.name());
            events.push(GameEvent::BlockDestroyed { cell, kind });
            let reward = kind.attributes().grants_reward;
            if let Some(item) = self.items.try_spawn(cell.center(tile), reward, now) {
                events.push(GameEvent::ItemSpawned(item));
            }
        }

        self.explosions.push(explosion);
    }
}
