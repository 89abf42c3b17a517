//! World errors

use thiserror::Error;

/// Errors raised by generation and direct grid access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("invalid world dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("tile ({x}, {y}) is outside the {width}x{height} map")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("unknown tile id {0}")]
    UnknownTileType(u8),

    #[error("map was generated without a progression layout")]
    MissingLayout,
}
