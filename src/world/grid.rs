//! Grid storage
//!
//! Row-major 2D storage shared by the tile grid, the region grid and the
//! generator's scratch masks.

use serde::{Deserialize, Serialize};

use crate::config::TILE_PIXEL_SIZE;

/// A tile coordinate (x to the right, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Pixel-space centre of this tile
    pub fn pixel_center(&self) -> (f32, f32) {
        let half = TILE_PIXEL_SIZE as f32 / 2.0;
        (
            (self.x * TILE_PIXEL_SIZE) as f32 + half,
            (self.y * TILE_PIXEL_SIZE) as f32 + half,
        )
    }

    /// Clamp into `[0, width) x [0, height)`
    pub fn clamped(&self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.clamp(0, (width - 1).max(0)),
            y: self.y.clamp(0, (height - 1).max(0)),
        }
    }
}

/// Fixed-size 2D array, origin at the top-left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Create a grid with every cell set to `fill`.
    ///
    /// Negative dimensions are treated as zero; callers validate sizes
    /// before building grids.
    pub fn new(width: i32, height: i32, fill: T) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![fill; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Convert 2D coordinates to a cell index
    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Convert a cell index back to 2D coordinates
    #[inline]
    pub fn idx_to_xy(&self, idx: usize) -> (i32, i32) {
        let idx = idx as i32;
        (idx % self.width, idx / self.width)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<T> {
        if self.in_bounds(x, y) {
            Some(self.cells[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    /// Write a cell; returns false when the coordinate is outside the grid
    pub fn set(&mut self, x: i32, y: i32, value: T) -> bool {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            self.cells[idx] = value;
            true
        } else {
            false
        }
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width.max(1) as usize)
    }
}
