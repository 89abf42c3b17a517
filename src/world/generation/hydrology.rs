//! Hydrology pass
//!
//! A sine-wave river crossing the map west to east, a coastal lake in the
//! south-east and a winding estuary joining the two. On the island the
//! river bends south around the volcano crater.

use super::builder::GridBuilder;
use super::Plan;
use crate::world::grid::TilePos;
use crate::world::tile::TileType;

/// Half-width of the main river
const RIVER_HALF_WIDTH: i32 = 2;

/// River centre row at column `x`; `ripple` adds the short secondary wave
pub(crate) fn wave_center(plan: &Plan, x: i32, ripple: bool) -> i32 {
    let x = x as f64;
    let mut wave = (x / 14.0).sin();
    if ripple {
        wave += (x / 5.0).sin() * 0.3;
    }
    (plan.h() * 0.35 + wave * plan.h() * 0.05) as i32
}

/// Columns the river leaves the wave for, and the row it runs along
/// below the crater
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Detour {
    pub start: i32,
    pub end: i32,
    pub row: i32,
}

impl Detour {
    pub fn for_plan(plan: &Plan) -> Option<Self> {
        let island = plan.island.as_ref()?;
        let center = island.volcano_center;
        let r = island.crater_radius;
        Some(Self {
            start: center.x - r - 6,
            end: center.x + r + 5,
            row: center.y + r + 5,
        })
    }

    pub fn covers(&self, x: i32) -> bool {
        x >= self.start && x <= self.end
    }

    /// Corner points of the detour polyline
    fn waypoints(&self, plan: &Plan) -> [TilePos; 4] {
        [
            TilePos::new(self.start, wave_center(plan, self.start, true)),
            TilePos::new(self.start, self.row),
            TilePos::new(self.end, self.row),
            TilePos::new(self.end, wave_center(plan, self.end, true)),
        ]
    }
}

/// Row the river occupies at column `x`
pub(crate) fn river_row(plan: &Plan, x: i32) -> i32 {
    match Detour::for_plan(plan) {
        Some(detour) if detour.covers(x) => detour.row,
        _ => wave_center(plan, x, true),
    }
}

/// Lake centre and radius for the current variant
fn lake(plan: &Plan) -> (TilePos, i32) {
    match &plan.island {
        Some(island) => (island.lake_center, island.lake_radius),
        None => (
            TilePos::new((plan.w() * 0.82) as i32, (plan.h() * 0.9) as i32),
            (plan.h() * 0.06) as i32,
        ),
    }
}

/// Pass 5: river, lake and estuary
pub(crate) fn carve(b: &mut GridBuilder, plan: &Plan) {
    let detour = Detour::for_plan(plan);

    for x in 0..plan.width {
        if detour.is_some_and(|d| d.covers(x)) {
            continue;
        }
        let center_y = wave_center(plan, x, true);
        for offset in -RIVER_HALF_WIDTH..=RIVER_HALF_WIDTH {
            b.set(x, center_y + offset, TileType::River);
        }
    }

    if let Some(detour) = detour {
        let points = detour.waypoints(plan);
        for leg in points.windows(2) {
            b.carve_line(leg[0], leg[1], RIVER_HALF_WIDTH, |b, x, y| {
                b.set(x, y, TileType::River);
            });
        }
    }

    let (lake_center, lake_radius) = lake(plan);
    let deep_radius = lake_radius as f64 * 0.6;
    b.paint_circle(lake_center, lake_radius, |b, x, y, distance| {
        let tile = if distance < deep_radius {
            TileType::DeepWater
        } else {
            TileType::ShallowWater
        };
        b.set(x, y, tile);
    });

    // The estuary climbs one row every two steps until it meets the river
    let (estuary_x, steps) = match &plan.island {
        Some(_) => {
            let x = (plan.w() * 0.72) as i32;
            let target = river_row(plan, x);
            (plan.w() * 0.72, (2 * (lake_center.y - target)).max(0))
        }
        None => (plan.w() * 0.76, lake_center.y.max(0)),
    };
    for t in 0..steps {
        let x = (estuary_x + (t as f64 / 6.0).sin() * 4.0) as i32;
        let y = lake_center.y - t / 2;
        b.set(x, y, TileType::River);
    }
}
