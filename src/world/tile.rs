//! Tile definitions
//!
//! Structural cells plus the visual variant and decoration tags handed to
//! renderers.

use serde::{Deserialize, Serialize};

/// A single structural cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Wall,
    Floor,
}

impl Cell {
    pub fn is_wall(&self) -> bool {
        matches!(self, Cell::Wall)
    }

    pub fn is_floor(&self) -> bool {
        matches!(self, Cell::Floor)
    }
}

/// Visual orientation of a cell, selected by the autotile classifier
///
/// Edge and corner names follow the tile art: `EdgeS` is the wall piece whose
/// open side faces north, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileVariant {
    Floor,

    // Straight wall faces
    EdgeN,
    EdgeS,
    EdgeE,
    EdgeW,

    // Convex corners
    OuterCornerNE,
    OuterCornerNW,
    OuterCornerSE,
    OuterCornerSW,

    // Concave corners (floor only diagonally)
    InnerCornerNE,
    InnerCornerNW,
    InnerCornerSE,
    InnerCornerSW,
    InnerCornerNWSE,
    InnerCornerNESW,

    // Solid rock, no floor in sight
    Background,
}

impl TileVariant {
    /// Every variant, in declaration order
    pub const ALL: [TileVariant; 16] = [
        TileVariant::Floor,
        TileVariant::EdgeN,
        TileVariant::EdgeS,
        TileVariant::EdgeE,
        TileVariant::EdgeW,
        TileVariant::OuterCornerNE,
        TileVariant::OuterCornerNW,
        TileVariant::OuterCornerSE,
        TileVariant::OuterCornerSW,
        TileVariant::InnerCornerNE,
        TileVariant::InnerCornerNW,
        TileVariant::InnerCornerSE,
        TileVariant::InnerCornerSW,
        TileVariant::InnerCornerNWSE,
        TileVariant::InnerCornerNESW,
        TileVariant::Background,
    ];

    pub fn is_wall(&self) -> bool {
        !matches!(self, TileVariant::Floor)
    }

    pub fn is_edge(&self) -> bool {
        matches!(
            self,
            TileVariant::EdgeN | TileVariant::EdgeS | TileVariant::EdgeE | TileVariant::EdgeW
        )
    }

    pub fn is_outer_corner(&self) -> bool {
        matches!(
            self,
            TileVariant::OuterCornerNE
                | TileVariant::OuterCornerNW
                | TileVariant::OuterCornerSE
                | TileVariant::OuterCornerSW
        )
    }

    pub fn is_inner_corner(&self) -> bool {
        matches!(
            self,
            TileVariant::InnerCornerNE
                | TileVariant::InnerCornerNW
                | TileVariant::InnerCornerSE
                | TileVariant::InnerCornerSW
                | TileVariant::InnerCornerNWSE
                | TileVariant::InnerCornerNESW
        )
    }

    /// Stable name used by tile atlases and JSON output
    pub fn name(&self) -> &'static str {
        match self {
            TileVariant::Floor => "floor",
            TileVariant::EdgeN => "wall_n",
            TileVariant::EdgeS => "wall_s",
            TileVariant::EdgeE => "wall_e",
            TileVariant::EdgeW => "wall_w",
            TileVariant::OuterCornerNE => "corner_outer_ne",
            TileVariant::OuterCornerNW => "corner_outer_nw",
            TileVariant::OuterCornerSE => "corner_outer_se",
            TileVariant::OuterCornerSW => "corner_outer_sw",
            TileVariant::InnerCornerNE => "corner_inner_ne",
            TileVariant::InnerCornerNW => "corner_inner_nw",
            TileVariant::InnerCornerSE => "corner_inner_se",
            TileVariant::InnerCornerSW => "corner_inner_sw",
            TileVariant::InnerCornerNWSE => "corner_inner_nwse",
            TileVariant::InnerCornerNESW => "corner_inner_nesw",
            TileVariant::Background => "background",
        }
    }

    /// Base colour before tinting
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            TileVariant::Floor => (40, 38, 32),
            TileVariant::Background => (20, 18, 15),
            v if v.is_edge() => (130, 110, 90),
            v if v.is_outer_corner() => (110, 95, 80),
            _ => (90, 80, 70),
        }
    }
}

/// Cosmetic variety for floor cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloorDecor {
    Plain,
    /// One of the uncommon floor tiles, numbered from 1
    Uncommon(u8),
    Rare,
}

impl FloorDecor {
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            FloorDecor::Plain => (40, 38, 32),
            FloorDecor::Uncommon(n) => {
                let shade = 30 + (*n as u16 * 4).min(40) as u8;
                (shade, shade - 2, shade - 8)
            }
            FloorDecor::Rare => (100, 90, 60),
        }
    }
}
