use serde::Deserialize;

use crate::error::MapError;
use crate::position::GridPos;

use super::{BlockKind, GameMap};

/// Tile-id mappings for the three tile sets the arenas were drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TilePalette {
    Farm,
    Cave,
    Home,
}

impl TilePalette {
    /// Floor used for the base layer and for unknown ids.
    pub fn floor(self) -> BlockKind {
        match self {
            TilePalette::Cave => BlockKind::DirtFloor,
            TilePalette::Farm | TilePalette::Home => BlockKind::Floor,
        }
    }

    /// `None` means "no tile here": the cell keeps whatever a lower layer put there.
    fn lookup(self, id: u32) -> Option<Option<BlockKind>> {
        let kind = match (self, id) {
            (TilePalette::Farm | TilePalette::Home, 0) => return Some(None),

            (TilePalette::Farm, 1 | 6 | 7 | 8) => BlockKind::Bushes,
            (TilePalette::Farm, 2) => BlockKind::Floor,
            (TilePalette::Farm, 3) => BlockKind::Melon,
            (TilePalette::Farm, 4) => BlockKind::Pumpkin,
            (TilePalette::Farm, 5) => BlockKind::Stump,

            (TilePalette::Cave, 0 | 4) => BlockKind::DirtFloor,
            (TilePalette::Cave, 1) => BlockKind::Ghost,
            (TilePalette::Cave, 2) => BlockKind::Skeleton,
            (TilePalette::Cave, 3) => BlockKind::Mummy,
            (TilePalette::Cave, 5) => BlockKind::Bixite,
            (TilePalette::Cave, 6) => BlockKind::Quartz,
            (TilePalette::Cave, 7) => BlockKind::Mushroom1,
            (TilePalette::Cave, 8) => BlockKind::Mushroom2,

            (TilePalette::Home, 1 | 6) => BlockKind::Chair,
            (TilePalette::Home, 2) => BlockKind::Table,
            (TilePalette::Home, 3) => BlockKind::Cabinet1,
            (TilePalette::Home, 4) => BlockKind::Cabinet2,
            (TilePalette::Home, 5) => BlockKind::Rug,
            (TilePalette::Home, 7) => BlockKind::Fireplace1,
            (TilePalette::Home, 8) => BlockKind::Stool,
            (TilePalette::Home, 9) => BlockKind::Fireplace2,

            _ => return None,
        };
        Some(Some(kind))
    }
}

#[derive(Deserialize)]
struct TiledMap {
    width: usize,
    height: usize,
    #[serde(default)]
    layers: Vec<TiledLayer>,
}

#[derive(Deserialize)]
struct TiledLayer {
    #[serde(default)]
    name: String,
    #[serde(default)]
    data: Vec<u32>,
}

impl GameMap {
    /// Import a map exported from Tiled. Layers are applied bottom to top.
    pub fn from_tiled_json(json_str: &str, palette: TilePalette) -> Result<Self, MapError> {
        let tiled: TiledMap = serde_json::from_str(json_str)?;
        if tiled.width == 0 || tiled.height == 0 {
            return Err(MapError::Empty);
        }

        let mut map = GameMap::new(vec![vec![palette.floor(); tiled.width]; tiled.height])?;
        let expected = tiled.width * tiled.height;

        for layer in tiled.layers.iter().filter(|l| !l.data.is_empty()) {
            if layer.data.len() != expected {
                return Err(MapError::DataLength {
                    expected,
                    actual: layer.data.len(),
                });
            }
            for (i, &id) in layer.data.iter().enumerate() {
                let pos = GridPos::from_index(i % tiled.width, i / tiled.width);
                let kind = match palette.lookup(id) {
                    Some(Some(kind)) => kind,
                    Some(None) => continue,
                    None => {
                        log::warn!(
                            "Layer {:?}: no mapping for tile id {id}, using floor",
                            layer.name
                        );
                        palette.floor()
                    }
                };
                map.set_block(pos, kind);
            }
        }

        Ok(map)
    }
}
