//! World module
//!
//! Tile registry, grids, region labels and procedural generation.

pub mod error;
pub mod generation;
pub mod grid;
pub mod layout;
pub mod map;
pub mod region;
pub mod tile;

pub use error::WorldError;
pub use generation::generate;
pub use grid::{Grid, TilePos};
pub use layout::{Gate, LayoutInfo, RegionRect};
pub use map::{TileGrid, WorldMap};
pub use region::{RegionGrid, RegionLabel};
pub use tile::{tile_definition, Rgb, TileDef, TileType};
