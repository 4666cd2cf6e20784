/// Every tile the arenas are built from.
///
/// Attributes live in `BLOCK_TABLE`, indexed by discriminant, so adding a kind
/// means adding one row there rather than touching every match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Floor,
    Pumpkin,
    Melon,
    Bushes,
    Stump,
    Cabinet1,
    Cabinet2,
    Table,
    Stool,
    Chair,
    Fireplace1,
    Fireplace2,
    Rug,
    Ghost,
    Skeleton,
    Mummy,
    DirtFloor,
    Bixite,
    Quartz,
    Mushroom1,
    Mushroom2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockAttributes {
    /// Blocks movement while intact.
    pub solid: bool,
    /// Can be destroyed by an explosion.
    pub explosable: bool,
    /// Rolls for an item drop when destroyed.
    pub grants_reward: bool,
}

struct BlockRow {
    kind: BlockKind,
    name: &'static str,
    symbol: &'static str,
    attributes: BlockAttributes,
}

const fn row(
    kind: BlockKind,
    name: &'static str,
    symbol: &'static str,
    solid: bool,
    explosable: bool,
    grants_reward: bool,
) -> BlockRow {
    BlockRow {
        kind,
        name,
        symbol,
        attributes: BlockAttributes {
            solid,
            explosable,
            grants_reward,
        },
    }
}

#[rustfmt::skip]
const BLOCK_TABLE: [BlockRow; 21] = [
    row(BlockKind::Floor,      "floor",      ".", false, false, false),
    row(BlockKind::Pumpkin,    "pumpkin",    "p", true,  true,  true),
    row(BlockKind::Melon,      "melon",      "m", true,  true,  true),
    row(BlockKind::Bushes,     "bushes",     "b", true,  true,  false),
    row(BlockKind::Stump,      "stump",      "#", true,  false, false),
    row(BlockKind::Cabinet1,   "cabinet1",   "c", true,  true,  true),
    row(BlockKind::Cabinet2,   "cabinet2",   "C", true,  true,  true),
    row(BlockKind::Table,      "table",      "t", true,  true,  false),
    row(BlockKind::Stool,      "stool",      "s", true,  true,  false),
    row(BlockKind::Chair,      "chair",      "h", true,  true,  false),
    row(BlockKind::Fireplace1, "fireplace1", "f", true,  false, false),
    row(BlockKind::Fireplace2, "fireplace2", "F", true,  false, false),
    row(BlockKind::Rug,        "rug",        "r", false, false, false),
    row(BlockKind::Ghost,      "ghost",      "g", true,  true,  true),
    row(BlockKind::Skeleton,   "skeleton",   "k", true,  true,  true),
    row(BlockKind::Mummy,      "mummy",      "u", true,  true,  true),
    row(BlockKind::DirtFloor,  "dirtfloor",  "_", false, false, false),
    row(BlockKind::Bixite,     "bixite",     "X", true,  false, false),
    row(BlockKind::Quartz,     "quartz",     "Q", true,  false, false),
    row(BlockKind::Mushroom1,  "mushroom1",  "1", true,  true,  true),
    row(BlockKind::Mushroom2,  "mushroom2",  "2", true,  true,  true),
];

impl BlockKind {
    fn row(self) -> &'static BlockRow {
        &BLOCK_TABLE[self as usize]
    }

    pub fn all() -> impl Iterator<Item = BlockKind> {
        BLOCK_TABLE.iter().map(|s| s.kind)
    }

    pub fn name(self) -> &'static str {
        self.row().name
    }

    /// Single-character token used in CSV map files.
    pub fn symbol(self) -> &'static str {
        self.row().symbol
    }

    pub fn attributes(self) -> BlockAttributes {
        self.row().attributes
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        BLOCK_TABLE.iter().find(|s| s.symbol == symbol).map(|s| s.kind)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        BLOCK_TABLE.iter().find(|s| s.name == name).map(|s| s.kind)
    }
}

/// One map cell: its kind plus whether an explosion has cleared it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    kind: BlockKind,
    destroyed: bool,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            destroyed: false,
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// A destroyed block is walkable and no longer stops a blast.
    pub fn is_solid(&self) -> bool {
        !self.destroyed && self.kind.attributes().solid
    }

    pub fn is_destructible(&self) -> bool {
        !self.destroyed && self.kind.attributes().explosable
    }

    /// Returns false if the block was already destroyed or cannot be.
    pub(crate) fn destroy(&mut self) -> bool {
        if !self.is_destructible() {
            return false;
        }
        self.destroyed = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_match_discriminants() {
        for (i, kind) in BlockKind::all().enumerate() {
            assert_eq!(kind as usize, i, "{} is out of order", kind.name());
        }
    }

    #[test]
    fn symbols_and_names_are_unique() {
        for kind in BlockKind::all() {
            assert_eq!(BlockKind::from_symbol(kind.symbol()), Some(kind));
            assert_eq!(BlockKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn destroyed_block_stops_blocking() {
        let mut block = Block::new(BlockKind::Pumpkin);
        assert!(block.is_solid());
        assert!(block.destroy());
        assert!(!block.is_solid());
        assert!(!block.destroy());
    }

    #[test]
    fn stump_survives_explosions() {
        let mut block = Block::new(BlockKind::Stump);
        assert!(!block.destroy());
        assert!(block.is_solid());
    }
}
