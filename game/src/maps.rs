use std::sync::LazyLock;

use crate::error::MapError;
use crate::grid::{GameMap, MapMetadata};

include!(concat!(env!("OUT_DIR"), "/maps.rs"));

/// A map shipped inside the binary.
pub struct EmbeddedMap {
    pub name: &'static str,
    pub display_name: String,
    pub map: GameMap,
}

impl EmbeddedMap {
    fn parse(name: &'static str, csv: &str, json: &str) -> Result<Self, MapError> {
        let metadata = MapMetadata::parse(json)?;
        Ok(Self {
            name,
            display_name: metadata.name.clone(),
            map: GameMap::from_csv_and_metadata(csv, &metadata)?,
        })
    }
}

static MAPS: LazyLock<Vec<EmbeddedMap>> = LazyLock::new(|| {
    MAP_DATA
        .iter()
        .filter_map(|&(name, csv, json)| match EmbeddedMap::parse(name, csv, json) {
            Ok(map) => Some(map),
            Err(e) => {
                log::warn!("Skipping embedded map {name}: {e}");
                None
            }
        })
        .collect()
});

pub fn names() -> impl Iterator<Item = &'static str> {
    MAPS.iter().map(|m| m.name)
}

pub fn get(name: &str) -> Option<&'static EmbeddedMap> {
    MAPS.iter().find(|m| m.name == name)
}

/// A fresh copy of an embedded map, ready to be played on.
pub fn get_map(name: &str) -> Result<GameMap, MapError> {
    get(name)
        .map(|m| m.map.clone())
        .ok_or_else(|| MapError::UnknownMap(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::BlockKind;
    use crate::position::GridPos;

    #[test]
    fn shipped_maps_load() {
        let mut names: Vec<_> = names().collect();
        names.sort();
        assert_eq!(names, vec!["cave", "farm", "home"]);
        for name in names {
            let map = get_map(name).unwrap();
            assert_eq!(map.bounds(), (15, 13));
            assert_eq!(map.spawn_points().len(), 4);
            for &spawn in map.spawn_points() {
                assert!(map.is_walkable(spawn), "{name}: spawn {spawn:?} is blocked");
            }
        }
    }

    #[test]
    fn farm_metadata() {
        let farm = get("farm").unwrap();
        assert_eq!(farm.display_name, "Pelican Farm");
        assert_eq!(farm.map.name(), "Pelican Farm");
        assert_eq!(
            farm.map.block(GridPos::new(0, 0)).unwrap().kind(),
            BlockKind::Stump
        );
    }

    #[test]
    fn unknown_names_are_errors() {
        assert!(matches!(get_map("moon"), Err(MapError::UnknownMap(_))));
    }
}
