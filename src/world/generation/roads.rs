//! Road network pass
//!
//! Arterials and spurs. Every cell laid here is protected from the
//! settlement and decoration passes that follow.

use super::builder::GridBuilder;
use super::Plan;
use crate::world::grid::TilePos;

/// Pass 6: arterials plus spur roads
pub(crate) fn road_network(b: &mut GridBuilder, plan: &Plan) {
    match &plan.island {
        Some(island) => {
            let (w, h) = (plan.width, plan.height);
            let row = island.arterial_row;
            let col = island.arterial_col;
            b.carve_road(TilePos::new(0, row), TilePos::new(w - 1, row));
            b.carve_road(TilePos::new(col, 0), TilePos::new(col, h - 1));

            // Coast spur out of the town's south side
            let town = island.town;
            let town_center = town.center();
            b.carve_road(
                TilePos::new(town_center.x, town.y1 - 2),
                TilePos::new(town_center.x, h - 1),
            );

            // Lakeside spur from the town's east side
            let lake = island.lake_center;
            b.carve_road(
                TilePos::new(town.x1 - 2, town_center.y),
                TilePos::new(lake.x - island.lake_radius - 1, town_center.y),
            );
        }
        None => valley_roads(b, plan),
    }
}

fn valley_roads(b: &mut GridBuilder, plan: &Plan) {
    let (w, h) = (plan.width, plan.height);
    let main_row = h / 2;
    let main_col = w / 2;

    for x in 0..w {
        for offset in -1..=1 {
            b.lay_network_road(x, main_row + offset);
        }
    }
    for y in 0..h {
        for offset in -1..=1 {
            b.lay_network_road(main_col + offset, y);
        }
    }

    // Single-width spurs towards the farms and the coast
    let at = |f: f64, size: f64| (size * f) as i32;
    let (fw, fh) = (plan.w(), plan.h());
    for x in at(0.1, fw)..at(0.3, fw) {
        b.lay_network_road(x, at(0.68, fh));
    }
    for y in at(0.6, fh)..h {
        b.lay_network_road(at(0.7, fw), y);
    }
    for y in at(0.72, fh)..h {
        b.lay_network_road(at(0.18, fw), y);
    }
    for x in at(0.68, fw)..at(0.88, fw) {
        b.lay_network_road(x, at(0.82, fh));
    }
}

#[cfg(test)]
mod tests {
    use super::super::{run_passes, Plan};
    use crate::config::{WorldSettings, WorldVariant};
    use crate::world::tile::TileType;

    const THROUGH_ROADS: usize = 6;

    #[test]
    fn test_valley_arterials_cross_at_center() {
        let plan = Plan::new(&WorldSettings::new(128, 128, 0, WorldVariant::Valley));
        let b = run_passes(&plan, THROUGH_ROADS);
        for x in [0, 30, 127] {
            for y in 63..=65 {
                assert!(b.is_protected(x, y));
                assert!(matches!(b.get(x, y), Some(TileType::Road | TileType::Bridge)));
            }
        }
        assert!(b.is_protected(64, 0));
        assert!(b.is_protected(64, 127));
        // Farm spur
        assert_eq!(b.get(20, 87), Some(TileType::Road));
    }

    #[test]
    fn test_island_arterials_stop_at_the_coast() {
        let plan = Plan::new(&WorldSettings::default());
        let island = plan.island.as_ref().unwrap();
        let b = run_passes(&plan, THROUGH_ROADS);
        let row = island.arterial_row;
        assert!(!b.is_protected(0, row));
        assert!(b.get(0, row).is_some_and(TileType::is_water));
        assert!(b.is_protected(64, row));
        assert!(b.is_protected(island.arterial_col, 64));
    }

    #[test]
    fn test_island_spurs_leave_town() {
        let plan = Plan::new(&WorldSettings::default());
        let island = plan.island.as_ref().unwrap();
        let b = run_passes(&plan, THROUGH_ROADS);
        let town = island.town;
        let center = town.center();
        // South wall row and east wall column are crossed by spurs
        assert!(b.is_protected(center.x, town.y1 - 1));
        assert!(b.is_protected(town.x1 - 1, center.y));
    }
}
