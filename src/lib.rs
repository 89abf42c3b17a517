//! Glade Runner - world generation and progression core
//!
//! Deterministic tile worlds (banded, valley and the walled island) plus the
//! region tracker that opens gates as the player explores.

pub mod config;
pub mod progression;
pub mod world;

// Re-export commonly used types
pub use config::{WorldSettings, WorldVariant, TILE_PIXEL_SIZE};
pub use progression::{ProgressionEvent, ProgressionTracker};
pub use world::{Gate, RegionLabel, TileType, WorldError, WorldMap};
