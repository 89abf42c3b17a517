//! Tile definitions
//!
//! The closed set of terrain types and the registry describing them.

use super::error::WorldError;

/// RGB triple
pub type Rgb = (u8, u8, u8);

/// Static attributes of a tile type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDef {
    pub id: u8,
    pub name: &'static str,
    pub color: Rgb,
    pub walkable: bool,
}

/// Types of tiles in the world.
///
/// Discriminants are the stable tile ids and index the registry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TileType {
    // Water
    DeepWater = 0,
    ShallowWater = 1,

    // Open terrain
    Grass = 2,
    Forest = 3,
    FarmField = 4,

    // Roads and settlements
    Road = 5,
    TownStone = 6,

    // Highlands
    Mountain = 7,
    VolcanoRock = 8,
    Lava = 9,

    BeachSand = 10,
    TownWall = 11,
    Gate = 12,

    River = 13,
    Bridge = 14,
    VillageHouse = 15,
    VillagePath = 16,
    FlowerMeadow = 17,
}

/// Registry table, indexed by tile id
static TILE_DEFS: [TileDef; 18] = [
    TileDef { id: 0, name: "deep_water", color: (10, 30, 80), walkable: false },
    TileDef { id: 1, name: "shallow_water", color: (25, 90, 140), walkable: false },
    TileDef { id: 2, name: "grass", color: (38, 120, 60), walkable: true },
    TileDef { id: 3, name: "forest", color: (24, 85, 40), walkable: true },
    TileDef { id: 4, name: "farm_field", color: (140, 110, 60), walkable: true },
    TileDef { id: 5, name: "road", color: (90, 80, 70), walkable: true },
    TileDef { id: 6, name: "town_stone", color: (150, 150, 170), walkable: true },
    TileDef { id: 7, name: "mountain", color: (100, 100, 100), walkable: false },
    TileDef { id: 8, name: "volcano_rock", color: (90, 60, 50), walkable: false },
    TileDef { id: 9, name: "lava", color: (200, 60, 30), walkable: false },
    TileDef { id: 10, name: "beach_sand", color: (210, 190, 120), walkable: true },
    TileDef { id: 11, name: "town_wall", color: (70, 70, 90), walkable: false },
    TileDef { id: 12, name: "gate", color: (130, 100, 60), walkable: false },
    TileDef { id: 13, name: "river", color: (40, 110, 170), walkable: false },
    TileDef { id: 14, name: "bridge", color: (120, 90, 60), walkable: true },
    TileDef { id: 15, name: "village_house", color: (160, 80, 60), walkable: false },
    TileDef { id: 16, name: "village_path", color: (170, 150, 110), walkable: true },
    TileDef { id: 17, name: "flower_meadow", color: (90, 160, 80), walkable: true },
];

impl TileType {
    pub const ALL: [TileType; 18] = [
        TileType::DeepWater,
        TileType::ShallowWater,
        TileType::Grass,
        TileType::Forest,
        TileType::FarmField,
        TileType::Road,
        TileType::TownStone,
        TileType::Mountain,
        TileType::VolcanoRock,
        TileType::Lava,
        TileType::BeachSand,
        TileType::TownWall,
        TileType::Gate,
        TileType::River,
        TileType::Bridge,
        TileType::VillageHouse,
        TileType::VillagePath,
        TileType::FlowerMeadow,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Decode a tile id
    pub fn from_id(id: u8) -> Result<Self, WorldError> {
        Self::ALL
            .get(id as usize)
            .copied()
            .ok_or(WorldError::UnknownTileType(id))
    }

    /// Registry entry for this tile
    pub fn definition(self) -> &'static TileDef {
        &TILE_DEFS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    pub fn color(self) -> Rgb {
        self.definition().color
    }

    pub fn is_walkable(self) -> bool {
        self.definition().walkable
    }

    /// Open or shallow water (not rivers)
    pub fn is_water(self) -> bool {
        matches!(self, TileType::DeepWater | TileType::ShallowWater)
    }

    /// Glyph used by the terminal preview legend
    pub fn glyph(self) -> char {
        match self {
            TileType::DeepWater => '~',
            TileType::ShallowWater => '-',
            TileType::Grass => '.',
            TileType::Forest => 'T',
            TileType::FarmField => '"',
            TileType::Road => '=',
            TileType::TownStone => '#',
            TileType::Mountain => '^',
            TileType::VolcanoRock => '%',
            TileType::Lava => '*',
            TileType::BeachSand => ',',
            TileType::TownWall => 'W',
            TileType::Gate => 'G',
            TileType::River => '≈',
            TileType::Bridge => 'H',
            TileType::VillageHouse => 'n',
            TileType::VillagePath => ':',
            TileType::FlowerMeadow => '\'',
        }
    }
}

/// Look up a tile definition by raw id
pub fn tile_definition(id: u8) -> Result<&'static TileDef, WorldError> {
    TILE_DEFS.get(id as usize).ok_or(WorldError::UnknownTileType(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_matches_discriminants() {
        for tile in TileType::ALL {
            assert_eq!(tile.definition().id, tile.id(), "{:?}", tile);
            assert_eq!(TileType::from_id(tile.id()), Ok(tile));
        }
    }

    #[test]
    fn test_ids_are_dense() {
        // Tiles leave the crate as numeric ids only
        for (i, tile) in TileType::ALL.iter().enumerate() {
            assert_eq!(tile.id() as usize, i, "{:?}", tile);
        }
    }

    #[test]
    fn test_unknown_tile_id() {
        assert_eq!(TileType::from_id(18), Err(WorldError::UnknownTileType(18)));
        assert!(tile_definition(200).is_err());
    }

    #[test]
    fn test_walkability() {
        assert!(TileType::Road.is_walkable());
        assert!(TileType::Bridge.is_walkable());
        assert!(TileType::TownStone.is_walkable());
        assert!(!TileType::Gate.is_walkable());
        assert!(!TileType::River.is_walkable());
        assert!(!TileType::DeepWater.is_walkable());
        assert!(!TileType::TownWall.is_walkable());
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = TileType::ALL.iter().map(|t| t.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TileType::ALL.len());
    }
}
