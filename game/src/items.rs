use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::position::WorldPos;
use crate::power_up::PowerUp;

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    kind: PowerUp,
    position: WorldPos,
    collected: bool,
    spawned_at: u64,
}

impl Item {
    pub fn new(kind: PowerUp, position: WorldPos, spawned_at: u64) -> Self {
        Self {
            kind,
            position,
            collected: false,
            spawned_at,
        }
    }

    pub fn kind(&self) -> PowerUp {
        self.kind
    }

    pub fn position(&self) -> WorldPos {
        self.position
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn spawned_at(&self) -> u64 {
        self.spawned_at
    }
}

/// The pool of pickups lying on the map.
pub struct ItemManager {
    items: Vec<Item>,
    rng: StdRng,
    drop_probability: f64,
    kinds: Vec<PowerUp>,
    weights: Option<WeightedIndex<u32>>,
}

impl ItemManager {
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: &GameConfig, rng: StdRng) -> Self {
        let kinds = config.drop_table.iter().map(|d| d.kind).collect();
        let weights = match WeightedIndex::new(config.drop_table.iter().map(|d| d.weight)) {
            Ok(weights) => Some(weights),
            Err(e) => {
                log::warn!("Item drop table unusable ({e}), blocks will drop nothing");
                None
            }
        };
        Self {
            items: Vec::new(),
            rng,
            drop_probability: config.drop_probability.clamp(0.0, 1.0),
            kinds,
            weights,
        }
    }

    /// Roll for a drop from a destroyed block. Blocks without a reward never drop.
    pub fn try_spawn(&mut self, position: WorldPos, grants_reward: bool, now: u64) -> Option<Item> {
        if !grants_reward || !self.rng.random_bool(self.drop_probability) {
            return None;
        }
        let index = self.weights.as_ref()?.sample(&mut self.rng);
        let item = Item::new(self.kinds[index], position, now);
        log::debug!("Spawned {} at ({}, {})", item.kind, position.x, position.y);
        self.items.push(item.clone());
        Some(item)
    }

    /// Take every uncollected item within `radius` of `position` out of the pool.
    pub fn collect_near(&mut self, position: WorldPos, radius: f32) -> Vec<Item> {
        let hits: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.collected && item.position.distance(position) <= radius)
            .map(|(i, _)| i)
            .collect();

        let mut collected = Vec::with_capacity(hits.len());
        for &i in hits.iter().rev() {
            let mut item = self.items.remove(i);
            item.collected = true;
            collected.push(item);
        }
        collected.reverse();
        collected
    }

    pub fn active_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| !item.collected)
    }

    /// Drop the first item lying exactly at `position`.
    pub fn remove_item_at(&mut self, position: WorldPos) -> Option<Item> {
        let index = self.items.iter().position(|item| item.position == position)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DropWeight;

    fn seeded(seed: u64) -> ItemManager {
        ItemManager::new(&GameConfig::default().with_seed(seed))
    }

    #[test]
    fn drop_rate_is_about_half() {
        let mut items = seeded(42);
        let spawned = (0..1000)
            .filter(|&i| items.try_spawn(WorldPos::new(i as f32, 0.0), true, 0).is_some())
            .count();
        assert!((430..=570).contains(&spawned), "spawned {spawned}");
        assert_eq!(items.len(), spawned);
    }

    #[test]
    fn boots_outnumber_elixirs() {
        let mut items = seeded(5);
        for i in 0..2000 {
            items.try_spawn(WorldPos::new(i as f32, 0.0), true, 0);
        }
        let boots = items.active_items().filter(|i| i.kind() == PowerUp::Boots).count();
        let elixirs = items.active_items().filter(|i| i.kind() == PowerUp::LifeElixir).count();
        assert_eq!(boots + elixirs, items.len());
        assert!(boots > 2 * elixirs, "{boots} boots vs {elixirs} elixirs");
    }

    #[test]
    fn rewardless_blocks_never_drop() {
        let mut items = seeded(1);
        for _ in 0..100 {
            assert!(items.try_spawn(WorldPos::default(), false, 0).is_none());
        }
        assert!(items.is_empty());
    }

    #[test]
    fn pickups_leave_the_pool_once() {
        let config = GameConfig {
            drop_probability: 1.0,
            ..GameConfig::default().with_seed(3)
        };
        let mut items = ItemManager::new(&config);
        items.try_spawn(WorldPos::new(60.0, 60.0), true, 10);
        items.try_spawn(WorldPos::new(100.0, 60.0), true, 20);
        items.try_spawn(WorldPos::new(300.0, 300.0), true, 30);

        let got = items.collect_near(WorldPos::new(80.0, 60.0), 24.0);
        assert_eq!(got.len(), 2);
        assert!(got.iter().all(Item::is_collected));
        assert_eq!(got[0].spawned_at(), 10);
        assert_eq!(items.len(), 1);
        assert!(items.collect_near(WorldPos::new(80.0, 60.0), 24.0).is_empty());
    }

    #[test]
    fn remove_and_clear() {
        let config = GameConfig {
            drop_probability: 1.0,
            drop_table: vec![DropWeight {
                kind: PowerUp::Shield,
                weight: 1,
            }],
            ..GameConfig::default().with_seed(9)
        };
        let mut items = ItemManager::new(&config);
        items.try_spawn(WorldPos::new(20.0, 20.0), true, 0);
        items.try_spawn(WorldPos::new(60.0, 20.0), true, 0);
        assert_eq!(
            items.remove_item_at(WorldPos::new(20.0, 20.0)).map(|i| i.kind()),
            Some(PowerUp::Shield)
        );
        assert!(items.remove_item_at(WorldPos::new(20.0, 20.0)).is_none());
        items.clear();
        assert_eq!(items.len(), 0);
    }

    #[test]
    fn empty_drop_table_drops_nothing() {
        let config = GameConfig {
            drop_probability: 1.0,
            drop_table: Vec::new(),
            ..GameConfig::default().with_seed(9)
        };
        let mut items = ItemManager::new(&config);
        assert!(items.try_spawn(WorldPos::default(), true, 0).is_none());
    }
}
