//! Region labels
//!
//! Named geographic zones overlaid on the tile grid. Labels are purely
//! descriptive and never affect walkability.

use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Region a tile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum RegionLabel {
    #[default]
    None,
    Forest,
    Farm,
    Town,
    Mountain,
    Volcano,
}

/// Parallel grid of region labels
pub type RegionGrid = Grid<RegionLabel>;

impl RegionLabel {
    pub const ALL: [RegionLabel; 6] = [
        RegionLabel::None,
        RegionLabel::Forest,
        RegionLabel::Farm,
        RegionLabel::Town,
        RegionLabel::Mountain,
        RegionLabel::Volcano,
    ];

    /// Get the region name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            RegionLabel::None => "The Wilds",
            RegionLabel::Forest => "Whispering Forest",
            RegionLabel::Farm => "Sunny Farmlands",
            RegionLabel::Town => "Glade Town",
            RegionLabel::Mountain => "Misty Mountains",
            RegionLabel::Volcano => "Ember Volcano",
        }
    }

    /// Key of the ambient loop the presentation layer plays in this region
    pub fn ambient_key(&self) -> &'static str {
        match self {
            RegionLabel::None => "ambient_wilds",
            RegionLabel::Forest => "ambient_forest",
            RegionLabel::Farm => "ambient_farm",
            RegionLabel::Town => "ambient_town",
            RegionLabel::Mountain => "ambient_mountain",
            RegionLabel::Volcano => "ambient_volcano",
        }
    }
}
