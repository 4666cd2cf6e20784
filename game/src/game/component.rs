use crate::collision::CollisionDetector;
use crate::config::GameConfig;
use crate::direction::Dir4;
use crate::grid::GameMap;
use crate::items::ItemManager;
use crate::player::{Player, PlayerId};
use crate::position::WorldPos;
use crate::power_up::{EffectTable, PowerUp};

use super::GameEvent;
use super::bombs::BombComponent;
use super::movement::MovementComponent;

/// Shared state a player needs during its part of the tick.
pub(crate) struct TickContext<'a> {
    pub(crate) items: &'a mut ItemManager,
    pub(crate) effects: &'a EffectTable,
    pub(crate) config: &'a GameConfig,
}

/// A player together with its movement and bombs.
#[derive(Clone, Debug)]
pub struct PlayerComponent {
    player: Player,
    movement: MovementComponent,
    bombs: BombComponent,
    /// Picked up but not yet applied.
    pending: Vec<PowerUp>,
}

impl PlayerComponent {
    pub fn new(id: PlayerId, position: WorldPos, config: &GameConfig) -> Self {
        Self {
            player: Player::new(id, position, config),
            movement: MovementComponent::default(),
            bombs: BombComponent::new(config.bomb_capacity),
            pending: Vec::new(),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn movement(&self) -> &MovementComponent {
        &self.movement
    }

    pub fn bombs(&self) -> &BombComponent {
        &self.bombs
    }

    pub(crate) fn bombs_mut(&mut self) -> &mut BombComponent {
        &mut self.bombs
    }

    pub fn try_move(&mut self, dir: Dir4, map: &GameMap, config: &GameConfig) -> bool {
        if !self.player.is_alive() {
            return false;
        }
        let detector = CollisionDetector::new(map, config.tile_size);
        self.movement
            .start_move(self.player.position(), dir, &detector, config.tile_size)
    }

    pub fn place_bomb(&mut self, config: &GameConfig) -> bool {
        self.player.is_alive() && self.bombs.place(&self.player, config)
    }

    pub fn take_damage(&mut self, amount: u32, now: u64) -> bool {
        let hit = self.player.take_damage(amount, now);
        if hit && !self.player.is_alive() {
            self.movement.stop();
            self.pending.clear();
        }
        hit
    }

    fn move_step(&self, config: &GameConfig) -> f32 {
        let step = config.move_step_px();
        if config.speed_scales_movement && config.base_speed > 0.0 {
            step * self.player.speed() / config.base_speed
        } else {
            step
        }
    }

    /// Status timers, fuses, movement and pickups, in that order.
    pub(crate) fn update(&mut self, now: u64, ctx: &mut TickContext) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.player.tick(now);
        self.bombs.tick(now, ctx.config.tick_delta);
        if !self.player.is_alive() {
            return events;
        }

        let step = self.move_step(ctx.config);
        let picked = self.movement.update(
            &mut self.player,
            step,
            ctx.items,
            ctx.config.pickup_radius_px(),
        );
        for item in picked {
            log::debug!("{} picked up {}", self.player.id(), item.kind());
            self.pending.push(item.kind());
            events.push(GameEvent::ItemCollected {
                player: self.player.id().clone(),
                item,
            });
        }
        self.apply_pending(now, ctx.effects);
        events
    }

    fn apply_pending(&mut self, now: u64, effects: &EffectTable) {
        for power_up in std::mem::take(&mut self.pending) {
            match effects.get(power_up) {
                Some(effect) => {
                    self.player.apply_effect(power_up, effect, now);
                }
                None => log::warn!("No effect registered for {power_up}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::GridPos;
    use crate::power_up::Effect;

    fn ticks_for_one_cell(config: &GameConfig, boost: Option<(PowerUp, Effect)>) -> usize {
        let map = GameMap::create_empty(3, 1);
        let mut items = ItemManager::new(config);
        let effects = EffectTable::from_config(config);
        let start = GridPos::new(0, 0).center(config.tile_size);
        let mut component = PlayerComponent::new(PlayerId::new("p"), start, config);
        if let Some((power_up, effect)) = boost {
            assert!(component.player.apply_effect(power_up, effect, 0));
        }

        assert!(component.try_move(Dir4::East, &map, config));
        let mut ctx = TickContext {
            items: &mut items,
            effects: &effects,
            config,
        };
        let mut ticks = 0;
        while component.movement().is_moving() {
            ticks += 1;
            component.update(ticks as u64 * 16, &mut ctx);
            assert!(ticks < 20);
        }
        assert_eq!(
            component.player().position(),
            GridPos::new(1, 0).center(config.tile_size)
        );
        ticks
    }

    const BOOTS: (PowerUp, Effect) = (
        PowerUp::Boots,
        Effect::SpeedMultiplier {
            factor: 1.5,
            duration_ms: 10_000,
        },
    );

    #[test]
    fn speed_only_matters_when_scaling_is_on() {
        let off = GameConfig::default().with_seed(3);
        let plain = ticks_for_one_cell(&off, None);
        assert_eq!(ticks_for_one_cell(&off, Some(BOOTS)), plain);
        assert_eq!(
            ticks_for_one_cell(&off, Some((PowerUp::SpeedBoost, Effect::AddSpeed(1.0)))),
            plain
        );

        let on = GameConfig {
            speed_scales_movement: true,
            ..off
        };
        assert_eq!(ticks_for_one_cell(&on, None), plain);
        // 12 px per tick instead of 8 across a 40 px cell.
        assert_eq!(ticks_for_one_cell(&on, Some(BOOTS)), 4);
        assert!(ticks_for_one_cell(&on, Some(BOOTS)) < plain);
        assert_eq!(
            ticks_for_one_cell(&on, Some((PowerUp::SpeedBoost, Effect::AddSpeed(1.0)))),
            4
        );
    }

    #[test]
    fn dead_players_drop_their_move_and_pending_pickups() {
        let config = GameConfig {
            max_health: 1,
            ..GameConfig::default().with_seed(3)
        };
        let map = GameMap::create_empty(3, 1);
        let start = GridPos::new(0, 0).center(config.tile_size);
        let mut component = PlayerComponent::new(PlayerId::new("p"), start, &config);
        assert!(component.try_move(Dir4::East, &map, &config));
        component.pending.push(PowerUp::Shield);

        assert!(component.take_damage(1, 0));
        assert!(!component.player().is_alive());
        assert!(!component.movement().is_moving());
        assert!(component.pending.is_empty());
        assert!(!component.try_move(Dir4::East, &map, &config));
        assert!(!component.place_bomb(&config));
    }
}
