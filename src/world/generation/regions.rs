//! Region extraction and pruning
//!
//! Flood fill splits the grid into maximal 4-connected same-type regions;
//! pruning removes the small ones and turns the floor survivors into rooms.

use std::collections::VecDeque;

use super::rooms::Room;
use crate::error::GenerationError;
use crate::world::{Cell, Coord, Grid};

/// A maximal 4-connected set of same-type cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub cell: Cell,
    /// Tiles in flood-fill order, starting from the first one found
    pub tiles: Vec<Coord>,
}

impl Region {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether any tile lies on the outer ring of the grid
    pub fn touches_border(&self, grid: &Grid) -> bool {
        self.tiles.iter().any(|t| grid.on_border(t.x, t.y))
    }
}

/// All regions of one cell type, in row-major discovery order
pub fn extract_regions(grid: &Grid, cell: Cell) -> Vec<Region> {
    let mut visited = vec![false; grid.cells.len()];
    let mut regions = Vec::new();

    for y in 0..grid.height {
        for x in 0..grid.width {
            let idx = grid.xy_to_idx(x, y);
            if visited[idx] || grid.cells[idx] != cell {
                continue;
            }
            regions.push(flood_fill(grid, Coord::new(x, y), &mut visited));
        }
    }
    regions
}

/// Breadth-first fill from `start` over 4-connected cells of the same type
fn flood_fill(grid: &Grid, start: Coord, visited: &mut [bool]) -> Region {
    let cell = grid.cells[grid.xy_to_idx(start.x, start.y)];
    let mut tiles = Vec::new();
    let mut queue = VecDeque::new();

    visited[grid.xy_to_idx(start.x, start.y)] = true;
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        tiles.push(pos);
        for next in pos.orthogonal() {
            if grid.get(next.x, next.y) != Some(cell) {
                continue;
            }
            let idx = grid.xy_to_idx(next.x, next.y);
            if !visited[idx] {
                visited[idx] = true;
                queue.push_back(next);
            }
        }
    }

    Region { cell, tiles }
}

/// Turn interior wall regions of at most `threshold` tiles into floor.
/// Regions touching the border ring are kept. Returns the opened regions.
pub fn open_small_wall_regions(grid: &mut Grid, threshold: usize) -> Vec<Region> {
    let mut opened = Vec::new();
    for region in extract_regions(grid, Cell::Wall) {
        if region.len() <= threshold && !region.touches_border(grid) {
            for t in &region.tiles {
                grid.set(t.x, t.y, Cell::Floor);
            }
            opened.push(region);
        }
    }
    opened
}

/// Prune small regions and build the room arena.
///
/// Rooms come back sorted by descending size (ties keep scan order), with
/// room 0 marked main and accessible.
pub fn prune_regions(
    grid: &mut Grid,
    wall_threshold: usize,
    floor_threshold: usize,
) -> Result<Vec<Room>, GenerationError> {
    let opened: usize = open_small_wall_regions(grid, wall_threshold)
        .iter()
        .map(Region::len)
        .sum();

    let mut closed = 0;
    let mut survivors = Vec::new();
    for region in extract_regions(grid, Cell::Floor) {
        if region.len() <= floor_threshold {
            for t in &region.tiles {
                grid.set(t.x, t.y, Cell::Wall);
            }
            closed += region.len();
        } else {
            survivors.push(region);
        }
    }

    log::debug!(
        "Pruned regions: {} wall tiles opened, {} floor tiles closed, {} rooms survive",
        opened,
        closed,
        survivors.len()
    );

    if survivors.is_empty() {
        return Err(GenerationError::NoSurvivingRooms);
    }

    // Stable: equal sizes keep discovery order
    survivors.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut rooms: Vec<Room> = survivors
        .into_iter()
        .enumerate()
        .map(|(id, region)| Room::new(id, region.tiles, grid))
        .collect();

    rooms[0].main = true;
    rooms[0].accessible = true;
    Ok(rooms)
}
