//! Grid builder
//!
//! Exclusively owned scratch state threaded through the generation passes,
//! plus the painting primitives the passes share.

use crate::world::grid::{Grid, TilePos};
use crate::world::layout::{LayoutInfo, RegionRect};
use crate::world::map::TileGrid;
use crate::world::region::{RegionGrid, RegionLabel};
use crate::world::tile::TileType;

pub(crate) struct GridBuilder {
    pub tiles: TileGrid,
    pub regions: Option<RegionGrid>,
    /// Island land mask; `None` means every cell is land
    land: Option<Grid<bool>>,
    /// Cells laid by the road network; later terrain passes leave them alone
    protected: Grid<bool>,
    pub layout: Option<LayoutInfo>,
}

impl GridBuilder {
    pub fn new(width: i32, height: i32, fill: TileType, island: bool) -> Self {
        Self {
            tiles: TileGrid::new(width, height, fill),
            regions: island.then(|| RegionGrid::new(width, height, RegionLabel::None)),
            land: island.then(|| Grid::new(width, height, false)),
            protected: Grid::new(width, height, false),
            layout: None,
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<TileType> {
        self.tiles.get(x, y)
    }

    pub fn is_land(&self, x: i32, y: i32) -> bool {
        match &self.land {
            Some(mask) => mask.get(x, y).unwrap_or(false),
            None => self.tiles.in_bounds(x, y),
        }
    }

    pub fn mark_land(&mut self, x: i32, y: i32) {
        if let Some(mask) = &mut self.land {
            mask.set(x, y, true);
        }
    }

    pub fn is_protected(&self, x: i32, y: i32) -> bool {
        self.protected.get(x, y).unwrap_or(false)
    }

    /// Write a tile; skipped off land and on road-network cells
    pub fn set(&mut self, x: i32, y: i32, tile: TileType) -> bool {
        if !self.is_land(x, y) || self.is_protected(x, y) {
            return false;
        }
        self.tiles.set(x, y, tile)
    }

    /// Write only when the cell still holds `expected`
    pub fn set_if(&mut self, x: i32, y: i32, expected: TileType, tile: TileType) -> bool {
        if self.get(x, y) != Some(expected) {
            return false;
        }
        self.set(x, y, tile)
    }

    /// Write a tile ignoring road protection (still land only)
    pub fn force_set(&mut self, x: i32, y: i32, tile: TileType) -> bool {
        if !self.is_land(x, y) {
            return false;
        }
        self.tiles.set(x, y, tile)
    }

    /// River cells become bridges, anything else becomes road
    pub fn lay_road(&mut self, x: i32, y: i32) -> bool {
        match self.get(x, y) {
            Some(TileType::River | TileType::Bridge) => self.set(x, y, TileType::Bridge),
            Some(_) => self.set(x, y, TileType::Road),
            None => false,
        }
    }

    /// Lay a road that belongs to the road network and protect it
    pub fn lay_network_road(&mut self, x: i32, y: i32) {
        if self.is_protected(x, y) {
            return;
        }
        if self.lay_road(x, y) {
            self.protected.set(x, y, true);
        }
    }

    pub fn label(&mut self, x: i32, y: i32, region: RegionLabel) {
        if !self.is_land(x, y) {
            return;
        }
        if let Some(regions) = &mut self.regions {
            regions.set(x, y, region);
        }
    }

    /// Force-fill a rectangle
    pub fn fill_rect(&mut self, rect: RegionRect, tile: TileType) {
        for pos in rect.cells() {
            self.set(pos.x, pos.y, tile);
        }
    }

    /// Visit every in-bounds cell within `radius` of the centre with its
    /// distance
    pub fn paint_circle(
        &mut self,
        center: TilePos,
        radius: i32,
        mut paint: impl FnMut(&mut Self, i32, i32, f64),
    ) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let (x, y) = (center.x + dx, center.y + dy);
                let d2 = dx * dx + dy * dy;
                if d2 > r2 || !self.tiles.in_bounds(x, y) {
                    continue;
                }
                paint(self, x, y, (d2 as f64).sqrt());
            }
        }
    }

    /// Square brush of half-width `half` dragged along a straight line
    pub fn carve_line(
        &mut self,
        from: TilePos,
        to: TilePos,
        half: i32,
        mut paint: impl FnMut(&mut Self, i32, i32),
    ) {
        for point in line_points(from, to) {
            for oy in -half..=half {
                for ox in -half..=half {
                    paint(self, point.x + ox, point.y + oy);
                }
            }
        }
    }

    /// 3-wide road-network segment
    pub fn carve_road(&mut self, from: TilePos, to: TilePos) {
        self.carve_line(from, to, 1, |b, x, y| b.lay_network_road(x, y));
    }

    pub fn into_parts(self) -> (TileGrid, Option<RegionGrid>, Option<LayoutInfo>) {
        (self.tiles, self.regions, self.layout)
    }

    #[cfg(test)]
    pub fn land_mask(&self) -> Option<&Grid<bool>> {
        self.land.as_ref()
    }

    #[cfg(test)]
    pub fn protected_mask(&self) -> &Grid<bool> {
        &self.protected
    }
}

/// Linear interpolation between two tiles with rounded centreline, both
/// endpoints included
pub(crate) fn line_points(from: TilePos, to: TilePos) -> Vec<TilePos> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let steps = dx.abs().max(dy.abs());
    if steps == 0 {
        return vec![from];
    }
    (0..=steps)
        .map(|step| {
            let t = step as f64 / steps as f64;
            TilePos::new(
                (from.x as f64 + dx as f64 * t).round() as i32,
                (from.y as f64 + dy as f64 * t).round() as i32,
            )
        })
        .collect()
}
