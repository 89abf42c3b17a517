//! Banded world
//!
//! Each cell is classified from its normalised coordinates alone: latitude
//! bands first, then a walled gatehouse and a lava field on top.

use crate::config::WorldVariant;
use crate::world::map::{TileGrid, WorldMap};
use crate::world::tile::TileType;

/// Base band for a normalised position
fn band(nx: f64, ny: f64) -> TileType {
    if ny < 0.08 {
        TileType::Mountain
    } else if ny < 0.16 {
        TileType::Forest
    } else if ny > 0.92 {
        TileType::DeepWater
    } else if ny > 0.84 {
        TileType::ShallowWater
    } else if ny > 0.72 {
        TileType::BeachSand
    } else if 0.45 < ny && ny < 0.55 {
        TileType::Road
    } else if nx < 0.18 {
        TileType::FarmField
    } else if nx > 0.82 {
        TileType::VolcanoRock
    } else if 0.35 < nx && nx < 0.65 && 0.25 < ny && ny < 0.45 {
        TileType::TownStone
    } else {
        TileType::Grass
    }
}

/// Band plus overlays; later overlays win
pub(crate) fn classify(nx: f64, ny: f64) -> TileType {
    let mut tile = band(nx, ny);
    let gatehouse = 0.40 < nx && nx < 0.60;
    if gatehouse && 0.20 < ny && ny < 0.22 {
        tile = TileType::Gate;
    }
    if gatehouse && ny <= 0.20 {
        tile = TileType::TownWall;
    }
    if nx > 0.88 && ny < 0.3 {
        tile = TileType::Lava;
    }
    tile
}

pub(crate) fn generate(width: i32, height: i32) -> WorldMap {
    let mut tiles = TileGrid::new(width, height, TileType::Grass);
    for y in 0..height {
        for x in 0..width {
            let nx = x as f64 / width as f64;
            let ny = y as f64 / height as f64;
            tiles.set(x, y, classify(nx, ny));
        }
    }
    WorldMap::from_parts(WorldVariant::Banded, tiles, None, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_top_to_bottom() {
        assert_eq!(classify(0.3, 0.0), TileType::Mountain);
        assert_eq!(classify(0.3, 0.1), TileType::Forest);
        assert_eq!(classify(0.5, 0.5), TileType::Road);
        assert_eq!(classify(0.3, 0.8), TileType::BeachSand);
        assert_eq!(classify(0.3, 0.9), TileType::ShallowWater);
        assert_eq!(classify(0.3, 0.95), TileType::DeepWater);
    }

    #[test]
    fn test_columns_and_town() {
        assert_eq!(classify(0.1, 0.3), TileType::FarmField);
        assert_eq!(classify(0.85, 0.6), TileType::VolcanoRock);
        assert_eq!(classify(0.5, 0.3), TileType::TownStone);
        assert_eq!(classify(0.25, 0.6), TileType::Grass);
    }

    #[test]
    fn test_overlays_win() {
        assert_eq!(classify(0.5, 0.21), TileType::Gate);
        assert_eq!(classify(0.5, 0.05), TileType::TownWall);
        assert_eq!(classify(0.5, 0.20), TileType::TownWall);
        assert_eq!(classify(0.95, 0.1), TileType::Lava);
        assert_eq!(classify(0.95, 0.5), TileType::Road);
    }

    #[test]
    fn test_generate_has_no_regions() {
        let map = generate(50, 50);
        assert_eq!(map.variant(), WorldVariant::Banded);
        assert!(map.regions().is_none());
        assert!(map.layout().is_none());
        assert_eq!(map.tile_type_at(25, 25), Ok(TileType::Road));
    }
}
