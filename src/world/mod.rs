//! World module
//!
//! Contains the grid data structures, tiles, autotiling, and procedural
//! generation.

pub mod map;
pub mod tile;
pub mod autotile;
pub mod generation;

pub use map::{Coord, Grid};
pub use tile::{Cell, FloorDecor, TileVariant};
pub use generation::{generate, GridResult};
