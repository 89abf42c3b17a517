//! Terrain passes
//!
//! Base fill and coastline, mountain ranges, forest belts, farmland and the
//! cosmetic decoration sweep.

use super::builder::GridBuilder;
use super::hydrology::wave_center;
use super::Plan;
use crate::world::grid::TilePos;
use crate::world::layout::RegionRect;
use crate::world::tile::TileType;

/// Land mask threshold for the island ellipse
const LAND_THRESHOLD: f64 = 1.0;
/// Land cells above this mask value become beach
const BEACH_THRESHOLD: f64 = 0.86;
/// Water cells below this mask value become shallow water
const SHALLOW_THRESHOLD: f64 = 1.25;

/// Pass 1: island land mask and coast. The valley keeps its grass fill.
pub(crate) fn base_fill(b: &mut GridBuilder, plan: &Plan) {
    let Some(island) = &plan.island else {
        return;
    };

    let (cx, cy) = (plan.w() / 2.0, plan.h() / 2.0);
    let (rx, ry) = (plan.w() * 0.48, plan.h() * 0.48);

    for y in 0..plan.height {
        for x in 0..plan.width {
            let dx = (x as f64 - cx) / rx;
            let dy = (y as f64 - cy) / ry;
            let noise = 0.06
                * (x as f64 * 0.23 + island.phase_a).sin()
                * (y as f64 * 0.19 + island.phase_b).cos();
            let value = dx * dx + dy * dy - noise;

            if value < LAND_THRESHOLD {
                b.mark_land(x, y);
                let tile = if value > BEACH_THRESHOLD {
                    TileType::BeachSand
                } else {
                    TileType::Grass
                };
                b.set(x, y, tile);
            } else if value < SHALLOW_THRESHOLD {
                b.tiles.set(x, y, TileType::ShallowWater);
            }
        }
    }
}

/// Pass 2: sloped range along the north edge plus isolated peaks
pub(crate) fn mountains(b: &mut GridBuilder, plan: &Plan) {
    let band = (plan.h() * 0.18) as i32;
    for y in 0..band {
        let slope = y as f64 / band.max(1) as f64;
        let left_limit = 0.18 + slope * 0.35;
        let right_limit = 0.82 - slope * 0.35;
        for x in 0..plan.width {
            let nx = x as f64 / plan.w();
            if nx < left_limit || nx > right_limit {
                b.set(x, y, TileType::Mountain);
            }
        }
    }

    let radius = (plan.h() * 0.05) as i32;
    let peaks = [
        ((plan.w() * 0.2) as i32, (plan.h() * 0.26) as i32),
        ((plan.w() * 0.8) as i32, (plan.h() * 0.28) as i32),
        ((plan.w() * 0.5) as i32, (plan.h() * 0.22) as i32),
    ];
    for (px, py) in peaks {
        b.paint_circle(TilePos::new(px, py), radius, |b, x, y, distance| {
            if distance <= radius as f64 * 0.7 {
                b.set(x, y, TileType::Mountain);
            }
        });
    }
}

/// Pass 3: hashed forest belt, only on cells that are still grass
pub(crate) fn forest_belts(b: &mut GridBuilder, plan: &Plan) {
    let top = (plan.h() * 0.22) as i32;
    let bottom = (plan.h() * 0.72) as i32;
    for y in top..bottom {
        for x in 0..plan.width {
            if (x * 37 + y * 19) % 17 < 7 {
                b.set_if(x, y, TileType::Grass, TileType::Forest);
            }
        }
    }
}

/// Fixed farm rectangles for the current variant
pub(crate) fn farm_fields(plan: &Plan) -> Vec<RegionRect> {
    let rect = |fx: f64, fy: f64, fw: f64, fh: f64| {
        let x0 = (plan.w() * fx) as i32;
        let y0 = (plan.h() * fy) as i32;
        RegionRect {
            x0,
            y0,
            x1: x0 + (plan.w() * fw) as i32,
            y1: y0 + (plan.h() * fh) as i32,
        }
    };
    match &plan.island {
        Some(island) => vec![island.farm, rect(0.14, 0.70, 0.18, 0.12)],
        None => vec![rect(0.08, 0.72, 0.22, 0.18), rect(0.68, 0.78, 0.2, 0.16)],
    }
}

/// Pass 4: farmland, force-filled
pub(crate) fn farmland(b: &mut GridBuilder, plan: &Plan) {
    for field in farm_fields(plan) {
        b.fill_rect(field, TileType::FarmField);
    }
}

/// Pass 8: flower meadows and riverside clearings on untouched grass
pub(crate) fn decorate(b: &mut GridBuilder, plan: &Plan) {
    for y in 0..plan.height {
        for x in 0..plan.width {
            if (x * 13 + y * 7) % 19 == 0 {
                b.set_if(x, y, TileType::Grass, TileType::FlowerMeadow);
            }
        }
    }

    // Picnic clearings follow the slow river wave only
    for x in (0..plan.width).step_by(5) {
        let river_y = wave_center(plan, x, false);
        for dy in -4..-1 {
            b.set_if(x, river_y + dy, TileType::Grass, TileType::FlowerMeadow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{run_passes, Plan};
    use super::*;
    use crate::config::{WorldSettings, WorldVariant};

    fn plan(variant: WorldVariant) -> Plan {
        Plan::new(&WorldSettings::new(128, 128, 5, variant))
    }

    #[test]
    fn test_island_shoreline_layers() {
        let b = run_passes(&plan(WorldVariant::Island), 1);
        // Centre is inland, corners are open sea
        assert_eq!(b.get(64, 64), Some(TileType::Grass));
        assert_eq!(b.get(0, 0), Some(TileType::DeepWater));
        assert_eq!(b.get(127, 127), Some(TileType::DeepWater));
        assert!(b.tiles.cells().contains(&TileType::BeachSand));
        assert!(b.tiles.cells().contains(&TileType::ShallowWater));
    }

    #[test]
    fn test_valley_mountain_band() {
        let b = run_passes(&plan(WorldVariant::Valley), 2);
        assert_eq!(b.get(0, 0), Some(TileType::Mountain));
        assert_eq!(b.get(127, 0), Some(TileType::Mountain));
        assert_eq!(b.get(64, 0), Some(TileType::Grass));
        // Peak centre at (64, 28)
        assert_eq!(b.get(64, 28), Some(TileType::Mountain));
        assert_eq!(b.get(64, 120), Some(TileType::Grass));
    }

    #[test]
    fn test_farmland_overrides_forest() {
        let p = plan(WorldVariant::Valley);
        let b = run_passes(&p, 4);
        for field in farm_fields(&p) {
            for pos in field.cells() {
                if let Some(tile) = b.get(pos.x, pos.y) {
                    assert_eq!(tile, TileType::FarmField);
                }
            }
        }
    }

    #[test]
    fn test_decoration_only_touches_grass() {
        let p = plan(WorldVariant::Valley);
        let before = run_passes(&p, 7).tiles;
        let after = run_passes(&p, 8).tiles;
        for (was, now) in before.cells().iter().zip(after.cells()) {
            if was != now {
                assert_eq!(*was, TileType::Grass);
                assert_eq!(*now, TileType::FlowerMeadow);
            }
        }
    }
}
