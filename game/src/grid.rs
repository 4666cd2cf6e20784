use rand::Rng;
use rand::seq::IteratorRandom;

use crate::error::MapError;
use crate::position::GridPos;

mod block;
mod parse;
mod tiled;

pub use block::{Block, BlockAttributes, BlockKind};
pub use parse::MapMetadata;
pub use tiled::TilePalette;

/// The arena: a rectangle of blocks plus the spawn points the map declares.
///
/// Every lookup is bounds-checked; out-of-range coordinates read as "no block".
#[derive(Clone, Debug)]
pub struct GameMap {
    name: String,
    blocks: Vec<Vec<Block>>,
    width: usize,
    height: usize,
    spawns: Vec<GridPos>,
}

impl GameMap {
    pub fn new(kinds: Vec<Vec<BlockKind>>) -> Result<Self, MapError> {
        let height = kinds.len();
        let width = kinds.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(MapError::Empty);
        }
        for (row, cells) in kinds.iter().enumerate() {
            if cells.len() != width {
                return Err(MapError::Ragged {
                    row,
                    expected: width,
                    actual: cells.len(),
                });
            }
        }
        let blocks = kinds
            .into_iter()
            .map(|row| row.into_iter().map(Block::new).collect())
            .collect();
        Ok(Self {
            name: String::new(),
            blocks,
            width,
            height,
            spawns: Vec::new(),
        })
    }

    pub fn create_empty(width: usize, height: usize) -> Self {
        Self {
            name: String::new(),
            blocks: vec![vec![Block::new(BlockKind::Floor); width]; height],
            width,
            height,
            spawns: Vec::new(),
        }
    }

    /// Stump border with a deterministic scatter of bushes, pumpkins and melons.
    pub fn default_arena(width: usize, height: usize) -> Self {
        let mut map = Self::create_empty(width, height);
        map.name = "default".to_string();
        for y in 0..height {
            for x in 0..width {
                let kind = if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                    BlockKind::Stump
                } else if (x + y) % 3 == 0 {
                    BlockKind::Bushes
                } else if (x + y) % 5 == 0 {
                    BlockKind::Pumpkin
                } else if (x + y) % 7 == 0 {
                    BlockKind::Melon
                } else {
                    continue;
                };
                map.blocks[y][x] = Block::new(kind);
            }
        }
        map
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn block(&self, pos: GridPos) -> Option<&Block> {
        if pos.in_bounds(self.bounds()) {
            Some(&self.blocks[pos.y as usize][pos.x as usize])
        } else {
            None
        }
    }

    fn block_mut(&mut self, pos: GridPos) -> Option<&mut Block> {
        if pos.in_bounds(self.bounds()) {
            Some(&mut self.blocks[pos.y as usize][pos.x as usize])
        } else {
            None
        }
    }

    /// Out of bounds is never walkable.
    pub fn is_walkable(&self, pos: GridPos) -> bool {
        self.block(pos).is_some_and(|b| !b.is_solid())
    }

    /// Replace the block at `pos`. Returns false outside the map.
    pub fn set_block(&mut self, pos: GridPos, kind: BlockKind) -> bool {
        match self.block_mut(pos) {
            Some(block) => {
                *block = Block::new(kind);
                true
            }
            None => false,
        }
    }

    /// Destroy an explosable, intact block. Returns its kind on success.
    pub fn destroy_block(&mut self, pos: GridPos) -> Option<BlockKind> {
        let block = self.block_mut(pos)?;
        block.destroy().then_some(block.kind())
    }

    pub fn entries(&self) -> impl Iterator<Item = (GridPos, &Block)> {
        self.blocks.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, block)| (GridPos::from_index(x, y), block))
        })
    }

    pub fn destroyed_cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.entries()
            .filter(|(_, block)| block.is_destroyed())
            .map(|(pos, _)| pos)
    }

    pub fn spawn_points(&self) -> &[GridPos] {
        &self.spawns
    }

    pub(crate) fn set_spawn_points(&mut self, spawns: Vec<GridPos>) {
        self.spawns = spawns
            .into_iter()
            .filter(|&pos| pos.in_bounds(self.bounds()))
            .collect();
    }

    /// A cell a new player could start on: walkable and more than one step
    /// (Manhattan) away from everything in `occupied`.
    pub fn is_valid_spawn(&self, pos: GridPos, occupied: &[GridPos]) -> bool {
        self.is_walkable(pos) && occupied.iter().all(|&o| o.manhattan(pos) > 1)
    }

    /// Declared spawn points first, in order; otherwise a random valid cell.
    pub fn find_spawn<R: Rng + ?Sized>(&self, rng: &mut R, occupied: &[GridPos]) -> Option<GridPos> {
        if let Some(&declared) = self
            .spawns
            .iter()
            .find(|&&pos| self.is_valid_spawn(pos, occupied))
        {
            return Some(declared);
        }
        let found = self
            .entries()
            .map(|(pos, _)| pos)
            .filter(|&pos| self.is_valid_spawn(pos, occupied))
            .choose(rng);
        if found.is_none() {
            log::warn!("No free spawn cell left on map {:?}", self.name);
        }
        found
    }
}
