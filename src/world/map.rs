//! Map data structure
//!
//! The generated world: tile grid, optional region grid and layout.

use super::error::WorldError;
use super::grid::{Grid, TilePos};
use super::layout::LayoutInfo;
use super::region::{RegionGrid, RegionLabel};
use super::tile::{TileDef, TileType};
use crate::config::{WorldSettings, WorldVariant, TILE_PIXEL_SIZE};

/// Tile type per cell
pub type TileGrid = Grid<TileType>;

/// A generated world
#[derive(Debug, Clone)]
pub struct WorldMap {
    variant: WorldVariant,
    tiles: TileGrid,
    regions: Option<RegionGrid>,
    layout: Option<LayoutInfo>,
}

impl WorldMap {
    /// Run the generator for `settings`
    pub fn generate(settings: &WorldSettings) -> Result<Self, WorldError> {
        super::generation::generate(settings)
    }

    pub(crate) fn from_parts(
        variant: WorldVariant,
        tiles: TileGrid,
        regions: Option<RegionGrid>,
        layout: Option<LayoutInfo>,
    ) -> Self {
        Self {
            variant,
            tiles,
            regions,
            layout,
        }
    }

    pub fn variant(&self) -> WorldVariant {
        self.variant
    }

    /// Width in tiles
    pub fn width(&self) -> i32 {
        self.tiles.width()
    }

    /// Height in tiles
    pub fn height(&self) -> i32 {
        self.tiles.height()
    }

    pub fn pixel_width(&self) -> i32 {
        self.width() * TILE_PIXEL_SIZE
    }

    pub fn pixel_height(&self) -> i32 {
        self.height() * TILE_PIXEL_SIZE
    }

    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    pub fn regions(&self) -> Option<&RegionGrid> {
        self.regions.as_ref()
    }

    pub fn layout(&self) -> Option<&LayoutInfo> {
        self.layout.as_ref()
    }

    /// Tile rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[TileType]> {
        self.tiles.rows()
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.tiles.in_bounds(x, y)
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> WorldError {
        WorldError::OutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        }
    }

    /// Tile type at a tile coordinate
    pub fn tile_type_at(&self, x: i32, y: i32) -> Result<TileType, WorldError> {
        self.tiles.get(x, y).ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Registry entry for the tile at a tile coordinate
    pub fn tile_definition_at(&self, x: i32, y: i32) -> Result<&'static TileDef, WorldError> {
        self.tile_type_at(x, y).map(TileType::definition)
    }

    /// Region label at a tile coordinate; `None` everywhere on maps
    /// generated without regions
    pub fn region_at(&self, x: i32, y: i32) -> Result<RegionLabel, WorldError> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(self
            .regions
            .as_ref()
            .and_then(|regions| regions.get(x, y))
            .unwrap_or_default())
    }

    /// Pixel position where the player is placed at scene start
    pub fn start_pixel_position(&self) -> (f32, f32) {
        match &self.layout {
            Some(layout) => layout.town_center.pixel_center(),
            None => (self.pixel_width() as f32 / 2.0, self.pixel_height() as f32 / 2.0),
        }
    }

    /// Whether a pixel position lies on the map
    pub fn contains_world(&self, world_x: f32, world_y: f32) -> bool {
        world_x >= 0.0
            && world_y >= 0.0
            && world_x < self.pixel_width() as f32
            && world_y < self.pixel_height() as f32
    }

    /// Tile under a pixel position, clamped to the grid
    pub fn world_to_tile(&self, world_x: f32, world_y: f32) -> TilePos {
        let size = TILE_PIXEL_SIZE as f32;
        let x = (world_x / size).floor() as i32;
        let y = (world_y / size).floor() as i32;
        TilePos::new(x, y).clamped(self.width(), self.height())
    }

    /// Walkability under a pixel position, clamped to the grid
    pub fn is_walkable_at(&self, world_x: f32, world_y: f32) -> bool {
        let tile = self.world_to_tile(world_x, world_y);
        self.tiles
            .get(tile.x, tile.y)
            .is_some_and(TileType::is_walkable)
    }

    /// Number of cells holding `tile`
    pub fn count_tiles(&self, tile: TileType) -> usize {
        self.tiles.cells().iter().filter(|t| **t == tile).count()
    }

    /// Rewrite a single cell; only progression may mutate a generated map
    pub(crate) fn set_tile(&mut self, pos: TilePos, tile: TileType) -> Result<(), WorldError> {
        if self.tiles.set(pos.x, pos.y, tile) {
            Ok(())
        } else {
            Err(self.out_of_bounds(pos.x, pos.y))
        }
    }
}
