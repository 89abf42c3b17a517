//! Settlement passes
//!
//! The valley gets an open village. The island gets five walled regions with
//! interior crossroads and landmarks, then gate tiles, connector roads and
//! the layout record.

use std::collections::BTreeMap;

use super::builder::GridBuilder;
use super::{IslandPlan, Plan};
use crate::world::grid::TilePos;
use crate::world::layout::{Gate, LayoutInfo, RegionRect};
use crate::world::region::RegionLabel;
use crate::world::tile::TileType;

/// Stamping order; the volcano goes after the mountain so their shared
/// wall is labelled volcano
const STAMP_ORDER: [RegionLabel; 5] = [
    RegionLabel::Forest,
    RegionLabel::Farm,
    RegionLabel::Town,
    RegionLabel::Mountain,
    RegionLabel::Volcano,
];

/// Smallest rect edge that still has an interior
const MIN_REGION_EDGE: i32 = 3;

/// Half-extent of the square plazas and glades
const PLAZA_HALF: i32 = 2;

impl IslandPlan {
    fn rect(&self, region: RegionLabel) -> Option<RegionRect> {
        match region {
            RegionLabel::Forest => Some(self.forest),
            RegionLabel::Farm => Some(self.farm),
            RegionLabel::Town => Some(self.town),
            RegionLabel::Mountain => Some(self.mountain),
            RegionLabel::Volcano => Some(self.volcano),
            RegionLabel::None => None,
        }
    }
}

fn has_interior(rect: &RegionRect) -> bool {
    rect.width() >= MIN_REGION_EDGE && rect.height() >= MIN_REGION_EDGE
}

/// House grid shared by the valley village and the island town. Houses
/// take precedence over the crossroad; road-network cells stay protected.
fn town_cell(b: &mut GridBuilder, x: i32, y: i32, dx: i32, dy: i32) {
    if dx.abs() % 7 == 0 && dy.abs() % 5 == 0 {
        b.set(x, y, TileType::VillageHouse);
    } else if dx.abs() <= 1 || dy.abs() <= 1 {
        b.lay_road(x, y);
    } else if !matches!(b.get(x, y), Some(TileType::River | TileType::Bridge)) {
        b.set(x, y, TileType::VillagePath);
    }
}

/// Pass 7: village or walled regions
pub(crate) fn settle(b: &mut GridBuilder, plan: &Plan) {
    match &plan.island {
        Some(island) => walled_regions(b, island),
        None => village(b, plan),
    }
}

fn village(b: &mut GridBuilder, plan: &Plan) {
    let cx = plan.width / 2;
    let cy = (plan.h() * 0.58) as i32;
    let half_w = (plan.w() * 0.08) as i32;
    let half_h = (plan.h() * 0.08) as i32;

    for y in cy - half_h..cy + half_h {
        for x in cx - half_w..cx + half_w {
            town_cell(b, x, y, x - cx, y - cy);
        }
    }

    // Market plaza
    for y in cy - PLAZA_HALF..=cy + PLAZA_HALF {
        for x in cx - PLAZA_HALF..=cx + PLAZA_HALF {
            b.set(x, y, TileType::TownStone);
        }
    }
}

fn walled_regions(b: &mut GridBuilder, island: &IslandPlan) {
    for region in STAMP_ORDER {
        let Some(rect) = island.rect(region) else {
            continue;
        };
        if !has_interior(&rect) {
            log::debug!("Skipping {:?}: rect too small ({:?})", region, rect);
            continue;
        }

        let center = rect.center();
        for pos in rect.cells() {
            b.label(pos.x, pos.y, region);
            if rect.is_border(pos) {
                b.set(pos.x, pos.y, TileType::TownWall);
                continue;
            }
            let (dx, dy) = (pos.x - center.x, pos.y - center.y);
            if region == RegionLabel::Town {
                town_cell(b, pos.x, pos.y, dx, dy);
            } else if dx.abs() <= 1 || dy.abs() <= 1 {
                b.lay_road(pos.x, pos.y);
            }
        }

        landmark(b, island, region, &rect);
    }
}

fn landmark(b: &mut GridBuilder, island: &IslandPlan, region: RegionLabel, rect: &RegionRect) {
    let inside = |pos: TilePos| rect.contains(pos) && !rect.is_border(pos);

    if region == RegionLabel::Volcano {
        let radius = island.crater_radius;
        b.paint_circle(island.volcano_center, radius, |b, x, y, distance| {
            if !inside(TilePos::new(x, y)) {
                return;
            }
            let tile = if distance <= radius as f64 * 0.5 {
                TileType::Lava
            } else {
                TileType::VolcanoRock
            };
            b.set(x, y, tile);
        });
        return;
    }

    let tile = match region {
        RegionLabel::Forest => TileType::FlowerMeadow,
        _ => TileType::TownStone,
    };
    let center = rect.center();
    for y in center.y - PLAZA_HALF..=center.y + PLAZA_HALF {
        for x in center.x - PLAZA_HALF..=center.x + PLAZA_HALF {
            if inside(TilePos::new(x, y)) {
                b.set(x, y, tile);
            }
        }
    }
}

/// Wall cells a gate occupies: three cells centred on the crossroad
fn gate_cells(gate: Gate, island: &IslandPlan) -> (RegionRect, Vec<TilePos>) {
    let across = |rect: &RegionRect, x: i32| {
        let cy = rect.center().y;
        (cy - 1..=cy + 1).map(|y| TilePos::new(x, y)).collect::<Vec<_>>()
    };
    match gate {
        Gate::Forest => (island.forest, across(&island.forest, island.forest.x1 - 1)),
        Gate::Farm => (island.farm, across(&island.farm, island.farm.x0)),
        Gate::Volcano => (island.volcano, across(&island.volcano, island.volcano.x0)),
        Gate::Mountain => {
            let rect = island.mountain;
            let cx = rect.center().x;
            let y = rect.y1 - 1;
            (rect, (cx - 1..=cx + 1).map(|x| TilePos::new(x, y)).collect())
        }
    }
}

/// Pass 9: connector roads, closed gates and the layout record
pub(crate) fn gates_and_connectors(b: &mut GridBuilder, plan: &Plan) {
    let Some(island) = &plan.island else {
        return;
    };
    let (w, h) = (plan.width, plan.height);
    let clamp = |pos: TilePos| pos.clamped(w, h);

    let town_c = island.town.center();
    let forest_c = island.forest.center();
    let farm_c = island.farm.center();
    let mountain_c = island.mountain.center();
    let col = island.arterial_col;
    let row = island.arterial_row;

    b.carve_road(TilePos::new(island.town.x0 + 1, town_c.y), TilePos::new(col, town_c.y));
    b.carve_road(TilePos::new(island.forest.x1 + 1, forest_c.y), TilePos::new(col, forest_c.y));
    b.carve_road(TilePos::new(island.farm.x0 - 2, farm_c.y), TilePos::new(col, farm_c.y));
    b.carve_road(
        TilePos::new(mountain_c.x, island.mountain.y1 + 1),
        TilePos::new(mountain_c.x, row),
    );

    let mut gates = BTreeMap::new();
    for gate in Gate::ALL {
        let (rect, cells) = gate_cells(gate, island);
        let placed: Vec<TilePos> = if has_interior(&rect) {
            cells
                .into_iter()
                .filter(|pos| rect.is_border(*pos))
                .filter(|pos| b.force_set(pos.x, pos.y, TileType::Gate))
                .collect()
        } else {
            Vec::new()
        };
        log::debug!("Placed {} gate with {} tiles", gate.name(), placed.len());
        gates.insert(gate, placed);
    }

    let mut regions = BTreeMap::new();
    for region in STAMP_ORDER {
        if let Some(rect) = island.rect(region) {
            regions.insert(region, rect);
        }
    }

    let volcano_c = island.volcano_center;
    let spawns = BTreeMap::from([
        (RegionLabel::Town, clamp(town_c)),
        (RegionLabel::Forest, clamp(TilePos::new(island.forest.x1 - 2, forest_c.y))),
        (RegionLabel::Farm, clamp(TilePos::new(island.farm.x0 + 1, farm_c.y))),
        (RegionLabel::Mountain, clamp(TilePos::new(mountain_c.x, island.mountain.y1 - 2))),
        (RegionLabel::Volcano, clamp(TilePos::new(island.volcano.x0 + 1, volcano_c.y))),
    ]);

    b.layout = Some(LayoutInfo {
        regions,
        spawns,
        gates,
        town_center: clamp(town_c),
        town_unlock: clamp(TilePos::new(island.town.x0 + 1, town_c.y)),
        forest_unlock: clamp(forest_c),
        volcano_center: clamp(volcano_c),
    });
}
