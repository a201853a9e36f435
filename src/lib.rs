//! Hollowcave - seeded procedural cave generation
//!
//! Cellular-automaton caves with flood-fill region pruning, corridor
//! connectivity between rooms and wall autotiling, deterministic per seed.

pub mod config;
pub mod error;
pub mod render;
pub mod world;

// Re-export commonly used types
pub use config::{DecorationConfig, GeneratorConfig, Rgb};
pub use error::{ConfigError, GenerationError};
pub use world::generation::{Connectivity, Room, RoomId, Smoothing};
pub use world::{generate, Cell, Coord, FloorDecor, Grid, GridResult, TileVariant};
