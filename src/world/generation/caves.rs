//! Cave shaping using cellular automata
//!
//! Random fill, automaton smoothing and border enforcement.

use rand::rngs::StdRng;
use rand::Rng;

use crate::error::{GenerationError, Stage};
use crate::world::{Cell, Grid};

/// Neighbour thresholds for one automaton pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutomatonRules {
    /// Floor cells with more wall neighbours than this become wall
    pub birth_limit: u8,
    /// Wall cells with fewer wall neighbours than this become floor
    pub death_limit: u8,
}

/// How many smoothing passes to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Smoothing {
    /// Run exactly this many passes, stopping early at a fixed point
    Steps(u32),
    /// Run until a pass changes nothing, failing after `limit` passes
    UntilStable { limit: u32 },
}

/// Fill a new grid, one draw per cell in row-major order
pub fn random_fill(rng: &mut StdRng, width: i32, height: i32, fill_percent: u8) -> Grid {
    let mut grid = Grid::new(width, height, Cell::Floor);
    for y in 0..height {
        for x in 0..width {
            if rng.gen_range(0..100) < fill_percent as u32 {
                grid.set(x, y, Cell::Wall);
            }
        }
    }
    grid
}

/// Apply one automaton pass, reading `src` and writing `dst`.
/// Returns whether any cell changed.
fn step(src: &Grid, dst: &mut Grid, rules: AutomatonRules) -> bool {
    let mut changed = false;
    for y in 0..src.height {
        for x in 0..src.width {
            let idx = src.xy_to_idx(x, y);
            let walls = src.wall_neighbours(x, y);
            let next = match src.cells[idx] {
                Cell::Wall if walls < rules.death_limit => Cell::Floor,
                Cell::Floor if walls > rules.birth_limit => Cell::Wall,
                current => current,
            };
            changed |= next != src.cells[idx];
            dst.cells[idx] = next;
        }
    }
    changed
}

/// Smooth the grid with double buffering. Returns the number of passes run.
pub fn smooth(grid: &mut Grid, rules: AutomatonRules, mode: Smoothing) -> Result<u32, GenerationError> {
    let mut back = grid.clone();
    let (max_passes, must_settle) = match mode {
        Smoothing::Steps(n) => (n, false),
        Smoothing::UntilStable { limit } => (limit, true),
    };

    for pass in 0..max_passes {
        let changed = step(grid, &mut back, rules);
        std::mem::swap(grid, &mut back);
        if !changed {
            log::debug!("Smoothing settled after {} passes", pass + 1);
            return Ok(pass + 1);
        }
    }

    if must_settle {
        return Err(GenerationError::IterationLimitExceeded {
            stage: Stage::Smoothing,
            limit: max_passes,
        });
    }
    Ok(max_passes)
}

/// Force the outermost ring of cells to wall
pub fn enforce_border(grid: &mut Grid) {
    for x in 0..grid.width {
        grid.set(x, 0, Cell::Wall);
        grid.set(x, grid.height - 1, Cell::Wall);
    }
    for y in 0..grid.height {
        grid.set(0, y, Cell::Wall);
        grid.set(grid.width - 1, y, Cell::Wall);
    }
}
