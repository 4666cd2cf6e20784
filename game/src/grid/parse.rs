use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::position::GridPos;

use super::{BlockKind, GameMap};

/// JSON sidecar stored next to each CSV map.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct MapMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    spawns: Vec<SpawnPoint>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
struct SpawnPoint {
    x: i32,
    y: i32,
}

impl MapMetadata {
    pub fn parse(json_str: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(json_str)?)
    }

    pub fn spawns(&self) -> Vec<GridPos> {
        self.spawns.iter().map(|s| GridPos::new(s.x, s.y)).collect()
    }
}

impl GameMap {
    pub fn from_csv(csv_str: &str) -> Result<Self, MapError> {
        Self::parse_csv(csv_str)
    }

    pub fn from_csv_and_metadata(csv_str: &str, metadata: &MapMetadata) -> Result<Self, MapError> {
        let mut map = Self::parse_csv(csv_str)?;
        map.set_name(metadata.name.clone());
        map.set_spawn_points(metadata.spawns());
        Ok(map)
    }

    fn parse_csv(csv_str: &str) -> Result<Self, MapError> {
        let mut rows: Vec<Vec<BlockKind>> = Vec::new();

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_reader(csv_str.as_bytes());

        for (y, result) in reader.records().enumerate() {
            let record = result?;
            let row = record
                .iter()
                .enumerate()
                .map(|(x, field)| {
                    let symbol = field.trim();
                    BlockKind::from_symbol(symbol).unwrap_or_else(|| {
                        log::warn!("Unknown block symbol {symbol:?} at ({x}, {y}), using floor");
                        BlockKind::Floor
                    })
                })
                .collect();
            rows.push(row);
        }

        Self::new(rows)
    }

    pub fn to_csv(&self) -> String {
        let mut lines = Vec::new();
        for y in 0..self.height() {
            let row: Vec<&str> = (0..self.width())
                .map(|x| {
                    let pos = GridPos::from_index(x, y);
                    match self.block(pos) {
                        Some(block) if block.is_destroyed() => BlockKind::Floor.symbol(),
                        Some(block) => block.kind().symbol(),
                        None => BlockKind::Floor.symbol(),
                    }
                })
                .collect();
            lines.push(row.join(",") + "\n");
        }
        lines.join("")
    }
}
