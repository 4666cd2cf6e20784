use std::collections::HashMap;
use std::fmt;

use crate::config::GameConfig;
use crate::position::WorldPos;
use crate::power_up::{Effect, PowerUp};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerStatus {
    Normal,
    Invincible,
    /// Terminal.
    Dead,
}

/// Health, status and stats of one combatant.
#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    health: u32,
    max_health: u32,
    position: WorldPos,
    speed: f32,
    /// Speed without any timed multiplier applied.
    base_speed: f32,
    status: PlayerStatus,
    invincible_until: u64,
    invincibility_ms: u64,
    bomb_count: u32,
    bomb_power: u32,
    boots_until: Option<u64>,
    boots_factor: f32,
    power_ups: HashMap<PowerUp, u32>,
}

impl Player {
    pub fn new(id: PlayerId, position: WorldPos, config: &GameConfig) -> Self {
        Self {
            id,
            health: config.max_health,
            max_health: config.max_health,
            position,
            speed: config.base_speed,
            base_speed: config.base_speed,
            status: PlayerStatus::Normal,
            invincible_until: 0,
            invincibility_ms: config.invincibility_ms,
            bomb_count: config.initial_bomb_count,
            bomb_power: config.initial_bomb_power,
            boots_until: None,
            boots_factor: 1.0,
            power_ups: HashMap::new(),
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn position(&self) -> WorldPos {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: WorldPos) {
        self.position = position;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status != PlayerStatus::Dead
    }

    pub fn is_invincible(&self) -> bool {
        self.status == PlayerStatus::Invincible
    }

    pub fn invincible_until(&self) -> u64 {
        self.invincible_until
    }

    pub fn bomb_count(&self) -> u32 {
        self.bomb_count
    }

    pub fn bomb_power(&self) -> u32 {
        self.bomb_power
    }

    pub fn boots_until(&self) -> Option<u64> {
        self.boots_until
    }

    /// How many times each power-up has been applied.
    pub fn power_up_count(&self, power_up: PowerUp) -> u32 {
        self.power_ups.get(&power_up).copied().unwrap_or(0)
    }

    /// Expire invincibility and boots whose time has come.
    pub fn tick(&mut self, now: u64) {
        if self.status == PlayerStatus::Invincible && now >= self.invincible_until {
            self.status = PlayerStatus::Normal;
        }
        if let Some(until) = self.boots_until
            && now >= until
        {
            self.speed = self.base_speed;
            self.boots_until = None;
            self.boots_factor = 1.0;
            log::debug!("{}: boots wore off", self.id);
        }
    }

    /// Returns false if the hit was ignored (dead or invincible).
    pub fn take_damage(&mut self, amount: u32, now: u64) -> bool {
        if self.status != PlayerStatus::Normal {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.status = PlayerStatus::Dead;
            log::info!("{} died", self.id);
        } else {
            self.status = PlayerStatus::Invincible;
            self.invincible_until = now + self.invincibility_ms;
        }
        true
    }

    /// Apply `effect` as the result of picking up `power_up`. Returns false
    /// when nothing changed: the player is dead, or a heal found full health.
    pub fn apply_effect(&mut self, power_up: PowerUp, effect: Effect, now: u64) -> bool {
        if !self.is_alive() {
            return false;
        }
        match effect {
            Effect::AddSpeed(amount) => {
                self.base_speed += amount;
                self.speed = self.base_speed * self.boots_factor;
            }
            Effect::Invincibility { duration_ms } => {
                self.status = PlayerStatus::Invincible;
                self.invincible_until = self.invincible_until.max(now + duration_ms);
            }
            Effect::AddBombCount(n) => self.bomb_count += n,
            Effect::AddBombPower(n) => self.bomb_power += n,
            Effect::SpeedMultiplier {
                factor,
                duration_ms,
            } => {
                self.boots_factor = factor;
                self.speed = self.base_speed * factor;
                self.boots_until = Some(now + duration_ms);
            }
            Effect::Heal(amount) => {
                if self.health >= self.max_health {
                    return false;
                }
                self.health = (self.health + amount).min(self.max_health);
            }
        }
        *self.power_ups.entry(power_up).or_default() += 1;
        log::debug!("{}: applied {power_up}", self.id);
        true
    }
}
