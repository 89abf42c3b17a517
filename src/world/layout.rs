//! Layout metadata
//!
//! Named tile coordinates recorded by the island generator: region
//! rectangles, spawn points, gate tiles and unlock triggers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::grid::TilePos;
use super::region::RegionLabel;

/// Gated entrances between regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gate {
    Forest,
    Farm,
    Mountain,
    Volcano,
}

impl Gate {
    pub const ALL: [Gate; 4] = [Gate::Forest, Gate::Farm, Gate::Mountain, Gate::Volcano];

    /// Region the gate leads into
    pub fn region(&self) -> RegionLabel {
        match self {
            Gate::Forest => RegionLabel::Forest,
            Gate::Farm => RegionLabel::Farm,
            Gate::Mountain => RegionLabel::Mountain,
            Gate::Volcano => RegionLabel::Volcano,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gate::Forest => "forest",
            Gate::Farm => "farm",
            Gate::Mountain => "mountain",
            Gate::Volcano => "volcano",
        }
    }
}

/// Axis-aligned tile rectangle, `x1`/`y1` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl RegionRect {
    /// Build from normalised corners, truncating to tile units and clamping
    /// to the grid
    pub fn from_fractions(width: i32, height: i32, fx0: f64, fy0: f64, fx1: f64, fy1: f64) -> Self {
        let x = |f: f64| ((width as f64 * f) as i32).clamp(0, width);
        let y = |f: f64| ((height as f64 * f) as i32).clamp(0, height);
        Self {
            x0: x(fx0),
            y0: y(fy0),
            x1: x(fx1),
            y1: y(fy1),
        }
    }

    pub fn width(&self) -> i32 {
        (self.x1 - self.x0).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.y1 - self.y0).max(0)
    }

    pub fn center(&self) -> TilePos {
        TilePos::new((self.x0 + self.x1) / 2, (self.y0 + self.y1) / 2)
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        pos.x >= self.x0 && pos.x < self.x1 && pos.y >= self.y0 && pos.y < self.y1
    }

    /// Cells on the outer ring
    pub fn is_border(&self, pos: TilePos) -> bool {
        self.contains(pos)
            && (pos.x == self.x0 || pos.x == self.x1 - 1 || pos.y == self.y0 || pos.y == self.y1 - 1)
    }

    /// Iterate every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = TilePos> {
        let (x0, x1) = (self.x0, self.x1);
        (self.y0..self.y1).flat_map(move |y| (x0..x1).map(move |x| TilePos::new(x, y)))
    }
}

/// Named coordinates produced once at generation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub regions: BTreeMap<RegionLabel, RegionRect>,
    /// Entry tile per region; the town entry is the town centre
    pub spawns: BTreeMap<RegionLabel, TilePos>,
    pub gates: BTreeMap<Gate, Vec<TilePos>>,
    /// Player start, centre of the town plaza
    pub town_center: TilePos,
    /// Reaching this tile opens the forest gate
    pub town_unlock: TilePos,
    /// Reaching this tile opens the farm and mountain gates
    pub forest_unlock: TilePos,
    pub volcano_center: TilePos,
}

impl LayoutInfo {
    pub fn gate_tiles(&self, gate: Gate) -> &[TilePos] {
        self.gates.get(&gate).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn spawn(&self, region: RegionLabel) -> Option<TilePos> {
        self.spawns.get(&region).copied()
    }

    pub fn region_rect(&self, region: RegionLabel) -> Option<RegionRect> {
        self.regions.get(&region).copied()
    }
}
