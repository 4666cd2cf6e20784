use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUp {
    SpeedBoost,
    Shield,
    BombCount,
    BombPower,
    Boots,
    LifeElixir,
}

impl PowerUp {
    pub fn all() -> [PowerUp; 6] {
        [
            PowerUp::SpeedBoost,
            PowerUp::Shield,
            PowerUp::BombCount,
            PowerUp::BombPower,
            PowerUp::Boots,
            PowerUp::LifeElixir,
        ]
    }
}

impl fmt::Display for PowerUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PowerUp::SpeedBoost => "speed boost",
            PowerUp::Shield => "shield",
            PowerUp::BombCount => "bomb count",
            PowerUp::BombPower => "bomb power",
            PowerUp::Boots => "boots",
            PowerUp::LifeElixir => "life elixir",
        };
        f.write_str(name)
    }
}

/// What applying a power-up does to a player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    /// Permanently raise speed and its baseline.
    AddSpeed(f32),
    Invincibility { duration_ms: u64 },
    AddBombCount(u32),
    AddBombPower(u32),
    /// Derive speed from the baseline for a limited time. Never compounds.
    SpeedMultiplier { factor: f32, duration_ms: u64 },
    /// Restore health, capped at the player's maximum.
    Heal(u32),
}

/// Power-up to effect lookup. New kinds are a new row, not a new match arm.
#[derive(Clone, Debug, Default)]
pub struct EffectTable(HashMap<PowerUp, Effect>);

impl EffectTable {
    pub fn from_config(config: &GameConfig) -> Self {
        let mut table = Self::default();
        table.insert(PowerUp::SpeedBoost, Effect::AddSpeed(config.speed_boost));
        table.insert(
            PowerUp::Shield,
            Effect::Invincibility {
                duration_ms: config.invincibility_ms,
            },
        );
        table.insert(PowerUp::BombCount, Effect::AddBombCount(1));
        table.insert(PowerUp::BombPower, Effect::AddBombPower(1));
        table.insert(
            PowerUp::Boots,
            Effect::SpeedMultiplier {
                factor: config.boots_multiplier,
                duration_ms: config.boots_duration_ms,
            },
        );
        table.insert(PowerUp::LifeElixir, Effect::Heal(config.heal_amount));
        table
    }

    pub fn insert(&mut self, power_up: PowerUp, effect: Effect) -> Option<Effect> {
        self.0.insert(power_up, effect)
    }

    pub fn get(&self, power_up: PowerUp) -> Option<Effect> {
        self.0.get(&power_up).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_an_effect() {
        let table = EffectTable::from_config(&GameConfig::default());
        for kind in PowerUp::all() {
            assert!(table.get(kind).is_some(), "{kind} has no effect");
        }
        assert_eq!(
            table.get(PowerUp::Boots),
            Some(Effect::SpeedMultiplier {
                factor: 1.5,
                duration_ms: 10_000
            })
        );
    }

    #[test]
    fn rows_can_be_replaced() {
        let mut table = EffectTable::from_config(&GameConfig::default());
        let old = table.insert(PowerUp::LifeElixir, Effect::Heal(2));
        assert_eq!(old, Some(Effect::Heal(1)));
        assert_eq!(table.get(PowerUp::LifeElixir), Some(Effect::Heal(2)));
    }
}
