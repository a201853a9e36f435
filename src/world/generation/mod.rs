//! Procedural cave generation
//!
//! Pipeline: fill, smooth, border, prune, cleanup, smooth, border, prune
//! again, connect, classify, decorate. One seeded RNG stream drives the
//! tint, the fill and the decorations, in that order.

pub mod caves;
pub mod decor;
pub mod regions;
pub mod rooms;

pub use caves::{AutomatonRules, Smoothing};
pub use regions::Region;
pub use rooms::{Connectivity, Room, RoomId};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::{GeneratorConfig, Rgb};
use crate::error::GenerationError;
use crate::world::autotile;
use crate::world::{Cell, Coord, FloorDecor, Grid, TileVariant};

/// Finished generation run, ready for a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridResult {
    /// Seed the run actually used
    pub seed: u64,
    pub grid: Grid,
    /// Visual variant per cell, parallel to `grid.cells`
    pub variants: Vec<TileVariant>,
    /// Floor decoration per cell, `None` for walls
    pub decorations: Vec<Option<FloorDecor>>,
    pub rooms: Vec<Room>,
    /// Recommended view centre
    pub camera_anchor: Coord,
    pub tint: Rgb,
}

impl GridResult {
    pub fn variant_at(&self, x: i32, y: i32) -> Option<TileVariant> {
        self.grid
            .in_bounds(x, y)
            .then(|| self.variants[self.grid.xy_to_idx(x, y)])
    }

    pub fn decoration_at(&self, x: i32, y: i32) -> Option<FloorDecor> {
        if !self.grid.in_bounds(x, y) {
            return None;
        }
        self.decorations[self.grid.xy_to_idx(x, y)]
    }

    /// The main (largest) room
    pub fn main_room(&self) -> Option<&Room> {
        self.rooms.iter().find(|r| r.main)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl GeneratorConfig {
    pub fn rules(&self) -> AutomatonRules {
        AutomatonRules {
            birth_limit: self.birth_limit,
            death_limit: self.death_limit,
        }
    }

    pub fn smoothing(&self) -> Smoothing {
        match self.smoothing_steps {
            Some(n) => Smoothing::Steps(n),
            None => Smoothing::UntilStable {
                limit: self.max_smoothing_iterations,
            },
        }
    }

    pub fn connectivity(&self) -> Connectivity {
        if self.quick_mode {
            Connectivity::Quick
        } else {
            Connectivity::Full
        }
    }
}

/// Run the whole pipeline for one configuration
pub fn generate(config: &GeneratorConfig) -> Result<GridResult, GenerationError> {
    config.validate()?;

    let seed = config.effective_seed();
    let mut rng = StdRng::seed_from_u64(seed);

    let tint = if config.random_color {
        Rgb::new(rng.gen(), rng.gen(), rng.gen())
    } else {
        config.color
    };

    let rules = config.rules();
    let smoothing = config.smoothing();

    let mut grid = caves::random_fill(&mut rng, config.width, config.height, config.init_fill_percent);
    let passes = caves::smooth(&mut grid, rules, smoothing)?;
    caves::enforce_border(&mut grid);
    log::debug!("Initial cave shaped in {} passes", passes);

    // First pruning feeds the cleanup pass; its rooms are discarded because
    // cleanup and smoothing invalidate them
    regions::prune_regions(&mut grid, config.wall_threshold_size, config.floor_threshold_size)?;
    let cleaned = autotile::cleanup_pass(&mut grid);
    let passes = caves::smooth(&mut grid, rules, smoothing)?;
    caves::enforce_border(&mut grid);
    log::debug!("Cleanup changed {} cells, resmoothed in {} passes", cleaned, passes);

    let mut rooms =
        regions::prune_regions(&mut grid, config.wall_threshold_size, config.floor_threshold_size)?;
    let room_count = rooms.len();

    let connectivity = config.connectivity();
    rooms::connect_rooms(&mut grid, &mut rooms, connectivity)?;
    if connectivity == Connectivity::Full {
        let opened = regions::open_small_wall_regions(&mut grid, config.wall_threshold_size);
        rooms::absorb_regions(&grid, &mut rooms, &opened);
    }

    let variants = autotile::classify_grid(&grid);
    let decorations = decor::decorate(&mut rng, &grid, &config.decoration);

    log::info!(
        "Generated {}x{} cave (seed {}): {} rooms found, {} kept, {} floor tiles",
        config.width,
        config.height,
        seed,
        room_count,
        rooms.len(),
        grid.count(Cell::Floor)
    );

    Ok(GridResult {
        seed,
        camera_anchor: grid.center(),
        grid,
        variants,
        decorations,
        rooms,
        tint,
    })
}
