//! Procedural world generation
//!
//! The valley and island variants run the same ordered list of passes over
//! a [`GridBuilder`]; each pass overwrites some cells and later passes win.
//! The banded variant is a single classification sweep.

mod banded;
mod builder;
mod hydrology;
mod roads;
mod settlements;
mod terrain;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

use self::builder::GridBuilder;
use super::error::WorldError;
use super::grid::TilePos;
use super::layout::RegionRect;
use super::map::WorldMap;
use super::tile::TileType;
use crate::config::{WorldSettings, WorldVariant};

/// One ordered generation pass
type Pass = fn(&mut GridBuilder, &Plan);

/// Generation passes in precedence order
fn passes() -> [(&'static str, Pass); 9] {
    [
        ("base", terrain::base_fill),
        ("mountains", terrain::mountains),
        ("forest", terrain::forest_belts),
        ("farmland", terrain::farmland),
        ("hydrology", hydrology::carve),
        ("roads", roads::road_network),
        ("settlements", settlements::settle),
        ("decoration", terrain::decorate),
        ("gates", settlements::gates_and_connectors),
    ]
}

/// Geometry shared by the passes, derived once from the settings
pub(crate) struct Plan {
    pub width: i32,
    pub height: i32,
    pub island: Option<IslandPlan>,
}

/// Island-only geometry
pub(crate) struct IslandPlan {
    pub town: RegionRect,
    pub forest: RegionRect,
    pub farm: RegionRect,
    pub mountain: RegionRect,
    pub volcano: RegionRect,
    /// Centre row of the east-west arterial
    pub arterial_row: i32,
    /// Centre column of the north-south arterial
    pub arterial_col: i32,
    pub volcano_center: TilePos,
    pub crater_radius: i32,
    pub lake_center: TilePos,
    pub lake_radius: i32,
    /// Coastline noise phases
    pub phase_a: f64,
    pub phase_b: f64,
}

impl Plan {
    pub fn new(settings: &WorldSettings) -> Self {
        let (width, height) = (settings.width, settings.height);
        let island = settings
            .variant
            .has_regions()
            .then(|| IslandPlan::new(width, height, settings.seed));
        Self {
            width,
            height,
            island,
        }
    }

    pub fn w(&self) -> f64 {
        self.width as f64
    }

    pub fn h(&self) -> f64 {
        self.height as f64
    }
}

impl IslandPlan {
    fn new(width: i32, height: i32, seed: u64) -> Self {
        let rect = |fx0, fy0, fx1, fy1| RegionRect::from_fractions(width, height, fx0, fy0, fx1, fy1);
        let town = rect(0.40, 0.70, 0.60, 0.86);
        let forest = rect(0.12, 0.44, 0.36, 0.66);
        let farm = rect(0.64, 0.44, 0.88, 0.66);
        let mountain = rect(0.40, 0.16, 0.62, 0.36);
        // The volcano shares the mountain's east wall
        let mut volcano = rect(0.62, 0.16, 0.80, 0.36);
        volcano.x0 = (mountain.x1 - 1).max(0);

        let crater_radius = (volcano.width().min(volcano.height()) as f64 * 0.22) as i32;

        let mut rng = StdRng::seed_from_u64(seed);
        let phase_a = rng.gen_range(0.0..TAU);
        let phase_b = rng.gen_range(0.0..TAU);

        Self {
            town,
            forest,
            farm,
            mountain,
            volcano,
            arterial_row: (height as f64 * 0.40) as i32,
            arterial_col: (width as f64 * 0.38) as i32,
            volcano_center: volcano.center(),
            crater_radius,
            lake_center: TilePos::new((width as f64 * 0.78) as i32, (height as f64 * 0.84) as i32),
            lake_radius: (height as f64 * 0.06) as i32,
            phase_a,
            phase_b,
        }
    }
}

/// Generate a world map from settings
pub fn generate(settings: &WorldSettings) -> Result<WorldMap, WorldError> {
    let (width, height) = (settings.width, settings.height);
    if width <= 0 || height <= 0 {
        return Err(WorldError::InvalidDimensions { width, height });
    }

    let map = match settings.variant {
        WorldVariant::Banded => banded::generate(width, height),
        variant => {
            let plan = Plan::new(settings);
            let builder = run_passes(&plan, usize::MAX);
            let (tiles, regions, layout) = builder.into_parts();
            WorldMap::from_parts(variant, tiles, regions, layout)
        }
    };

    log::info!(
        "Generated {} world {}x{} (seed {:#x}, {} road tiles, {} bridges)",
        settings.variant,
        width,
        height,
        settings.seed,
        map.count_tiles(TileType::Road),
        map.count_tiles(TileType::Bridge),
    );
    Ok(map)
}

/// Run the first `count` passes
pub(crate) fn run_passes(plan: &Plan, count: usize) -> GridBuilder {
    let (fill, island) = match plan.island {
        Some(_) => (TileType::DeepWater, true),
        None => (TileType::Grass, false),
    };
    let mut builder = GridBuilder::new(plan.width, plan.height, fill, island);
    for (name, pass) in passes().into_iter().take(count) {
        log::debug!("Running generation pass: {}", name);
        pass(&mut builder, plan);
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::layout::Gate;
    use crate::world::region::RegionLabel;

    const ROADS_PASS: usize = 5;

    fn island() -> WorldSettings {
        WorldSettings::default()
    }

    fn valley() -> WorldSettings {
        WorldSettings::new(128, 128, 1, WorldVariant::Valley)
    }

    fn all_variants(width: i32, height: i32) -> Vec<WorldSettings> {
        [WorldVariant::Banded, WorldVariant::Valley, WorldVariant::Island]
            .into_iter()
            .map(|variant| WorldSettings::new(width, height, 99, variant))
            .collect()
    }

    #[test]
    fn test_invalid_dimensions() {
        for (w, h) in [(0, 10), (10, 0), (-4, 8)] {
            let settings = WorldSettings::new(w, h, 0, WorldVariant::Island);
            assert_eq!(
                generate(&settings).unwrap_err(),
                WorldError::InvalidDimensions { width: w, height: h }
            );
        }
    }

    #[test]
    fn test_dimensions_are_exact() {
        for (w, h) in [(1, 1), (3, 7), (17, 5), (64, 48), (128, 128), (200, 160)] {
            for settings in all_variants(w, h) {
                let map = generate(&settings).unwrap();
                assert_eq!(map.width(), w);
                assert_eq!(map.height(), h);
                assert_eq!(map.tiles().rows().count(), h as usize);
                assert!(map.tiles().rows().all(|row| row.len() == w as usize));
                assert_eq!(map.tiles().cells().len(), (w * h) as usize);
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        for settings in all_variants(128, 96) {
            let a = generate(&settings).unwrap();
            let b = generate(&settings).unwrap();
            assert_eq!(a.tiles(), b.tiles(), "{:?}", settings.variant);
            assert_eq!(a.regions(), b.regions());
            assert_eq!(a.layout(), b.layout());
        }
    }

    #[test]
    fn test_seed_changes_coastline() {
        let a = generate(&WorldSettings::new(128, 128, 1, WorldVariant::Island)).unwrap();
        let b = generate(&WorldSettings::new(128, 128, 2, WorldVariant::Island)).unwrap();
        assert_ne!(a.tiles(), b.tiles());
    }

    #[test]
    fn test_default_world_corner_and_start() {
        for settings in all_variants(128, 128) {
            let map = generate(&settings).unwrap();
            assert!(
                !map.tile_definition_at(0, 0).unwrap().walkable,
                "{:?} corner is walkable",
                settings.variant
            );
            let (sx, sy) = map.start_pixel_position();
            let start = map.world_to_tile(sx, sy);
            assert!(
                map.tile_definition_at(start.x, start.y).unwrap().walkable,
                "{:?} start tile {:?} is not walkable",
                settings.variant,
                start
            );
        }
    }

    #[test]
    fn test_island_corner_is_ocean() {
        let map = generate(&island()).unwrap();
        assert_eq!(map.tile_type_at(0, 0), Ok(TileType::DeepWater));
    }

    #[test]
    fn test_road_cells_keep_precedence() {
        for settings in [valley(), island()] {
            let plan = Plan::new(&settings);
            let builder = run_passes(&plan, usize::MAX);
            let protected = builder.protected_mask();
            for (idx, is_road) in protected.cells().iter().enumerate() {
                if !is_road {
                    continue;
                }
                let (x, y) = protected.idx_to_xy(idx);
                let tile = builder.get(x, y).unwrap();
                assert!(
                    matches!(tile, TileType::Road | TileType::Bridge | TileType::Gate),
                    "road cell ({}, {}) ended as {:?}",
                    x,
                    y,
                    tile
                );
            }
        }
    }

    #[test]
    fn test_bridges_replace_river_under_roads() {
        for settings in [valley(), island()] {
            let plan = Plan::new(&settings);
            let before = run_passes(&plan, ROADS_PASS).tiles;
            let after = run_passes(&plan, ROADS_PASS + 1);
            let mut bridges = 0;
            for (idx, was) in before.cells().iter().enumerate() {
                let (x, y) = before.idx_to_xy(idx);
                if !after.is_protected(x, y) {
                    continue;
                }
                let now = after.get(x, y).unwrap();
                if *was == TileType::River {
                    assert_eq!(now, TileType::Bridge, "({}, {})", x, y);
                    bridges += 1;
                } else {
                    assert_eq!(now, TileType::Road, "({}, {})", x, y);
                }
            }
            assert!(bridges > 0, "{:?} has no bridges", settings.variant);
        }
    }

    #[test]
    fn test_land_mask_consistency() {
        let plan = Plan::new(&island());
        // Everything up to and including the road network
        let builder = run_passes(&plan, ROADS_PASS + 1);
        let land = builder.land_mask().unwrap();
        let mut water = 0;
        for (idx, is_land) in land.cells().iter().enumerate() {
            if *is_land {
                continue;
            }
            let (x, y) = land.idx_to_xy(idx);
            assert!(builder.get(x, y).unwrap().is_water(), "({}, {})", x, y);
            water += 1;
        }
        assert!(water > 0);

        let finished = run_passes(&plan, usize::MAX);
        let land = finished.land_mask().unwrap();
        let regions = finished.regions.as_ref().unwrap();
        for (idx, is_land) in land.cells().iter().enumerate() {
            if !is_land {
                let (x, y) = land.idx_to_xy(idx);
                assert_eq!(regions.get(x, y), Some(RegionLabel::None));
            }
        }
    }

    #[test]
    fn test_forest_noise_only_on_grass() {
        let plan = Plan::new(&valley());
        let before = run_passes(&plan, 2).tiles;
        let after = run_passes(&plan, 3).tiles;
        for (idx, (was, now)) in before.cells().iter().zip(after.cells()).enumerate() {
            if was != now {
                let (x, y) = before.idx_to_xy(idx);
                assert_eq!(*was, TileType::Grass);
                assert_eq!(*now, TileType::Forest);
                assert!((x * 37 + y * 19) % 17 < 7);
            }
        }
    }

    #[test]
    fn test_island_layout_is_consistent() {
        let map = generate(&island()).unwrap();
        let layout = map.layout().expect("island maps carry a layout");

        for gate in Gate::ALL {
            let tiles = layout.gate_tiles(gate);
            assert_eq!(tiles.len(), 3, "{:?}", gate);
            for pos in tiles {
                assert_eq!(map.tile_type_at(pos.x, pos.y), Ok(TileType::Gate));
            }
        }

        let region_of = |pos: TilePos| map.region_at(pos.x, pos.y).unwrap();
        assert_eq!(region_of(layout.town_center), RegionLabel::Town);
        assert_eq!(region_of(layout.town_unlock), RegionLabel::Town);
        assert_eq!(region_of(layout.forest_unlock), RegionLabel::Forest);
        assert_eq!(region_of(layout.volcano_center), RegionLabel::Volcano);
        for (region, spawn) in &layout.spawns {
            assert_eq!(region_of(*spawn), *region);
            assert!(map.tile_definition_at(spawn.x, spawn.y).unwrap().walkable);
        }
        for pos in [layout.town_center, layout.town_unlock, layout.forest_unlock] {
            assert!(map.tile_definition_at(pos.x, pos.y).unwrap().walkable, "{:?}", pos);
        }
        assert_eq!(
            map.tile_type_at(layout.volcano_center.x, layout.volcano_center.y),
            Ok(TileType::Lava)
        );
    }

    #[test]
    fn test_regions_are_walled() {
        let map = generate(&island()).unwrap();
        let layout = map.layout().unwrap();
        for region in [RegionLabel::Forest, RegionLabel::Farm, RegionLabel::Mountain] {
            let rect = layout.region_rect(region).unwrap();
            for pos in rect.cells().filter(|p| rect.is_border(*p)) {
                let tile = map.tile_type_at(pos.x, pos.y).unwrap();
                assert!(
                    !tile.is_walkable(),
                    "{:?} wall at {:?} is walkable ({:?})",
                    region,
                    pos,
                    tile
                );
            }
        }
    }

    #[test]
    fn test_valley_has_no_regions() {
        let map = generate(&valley()).unwrap();
        assert!(map.regions().is_none());
        assert!(map.layout().is_none());
        assert_eq!(map.region_at(10, 10), Ok(RegionLabel::None));
        assert!(map.count_tiles(TileType::VillageHouse) > 0);
        assert!(map.count_tiles(TileType::FlowerMeadow) > 0);
        assert_eq!(map.count_tiles(TileType::Gate), 0);
    }
}
