//! Room graph and corridor carving
//!
//! Rooms live in an arena indexed by [`RoomId`]; connections are id sets so
//! the graph has no ownership cycles.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::regions::Region;
use crate::error::{GenerationError, Stage};
use crate::world::{Cell, Coord, Grid};

/// Index of a room in the arena
pub type RoomId = usize;

/// Corridor half-width: every line point opens a disc of this radius
pub const CORRIDOR_RADIUS: i32 = 1;

/// A surviving floor region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// Tiles in row-major order (corridor tiles are appended after)
    pub tiles: Vec<Coord>,
    /// Tiles orthogonally adjacent to a wall, row-major
    pub edge_tiles: Vec<Coord>,
    pub connected: BTreeSet<RoomId>,
    pub accessible: bool,
    pub main: bool,
    /// Tile count when the room was created
    pub size: usize,
}

impl Room {
    pub fn new(id: RoomId, mut tiles: Vec<Coord>, grid: &Grid) -> Self {
        tiles.sort_by_key(|t| t.scan_key());
        let size = tiles.len();
        let mut room = Self {
            id,
            tiles,
            edge_tiles: Vec::new(),
            connected: BTreeSet::new(),
            accessible: false,
            main: false,
            size,
        };
        room.refresh_edges(grid);
        room
    }

    /// Recompute edge tiles against the current grid
    pub fn refresh_edges(&mut self, grid: &Grid) {
        let mut edges: Vec<Coord> = self
            .tiles
            .iter()
            .copied()
            .filter(|t| grid.is_floor(t.x, t.y) && grid.touches_wall(*t))
            .collect();
        edges.sort_by_key(|t| t.scan_key());
        edges.dedup();
        self.edge_tiles = edges;
    }

    pub fn is_connected(&self, other: RoomId) -> bool {
        self.connected.contains(&other)
    }
}

/// How rooms are made reachable from one another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connectivity {
    /// Keep only the largest room
    Quick,
    /// Carve corridors until every room is reachable
    Full,
}

/// Nearest edge-tile pair between two rooms in different components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    room_a: RoomId,
    room_b: RoomId,
    tile_a: Coord,
    tile_b: Coord,
    distance: i64,
}

/// Make the room set reachable according to `mode`.
///
/// Rooms must be sorted largest first with room 0 accessible.
pub fn connect_rooms(
    grid: &mut Grid,
    rooms: &mut Vec<Room>,
    mode: Connectivity,
) -> Result<(), GenerationError> {
    match mode {
        Connectivity::Quick => {
            keep_largest(grid, rooms);
            Ok(())
        }
        Connectivity::Full => connect_all(grid, rooms),
    }
}

/// Wall up every room but the first
fn keep_largest(grid: &mut Grid, rooms: &mut Vec<Room>) {
    if rooms.len() > 1 {
        for room in rooms.drain(1..) {
            for t in &room.tiles {
                grid.set(t.x, t.y, Cell::Wall);
            }
        }
    }
    if let Some(main) = rooms.first_mut() {
        main.main = true;
        main.accessible = true;
        main.refresh_edges(grid);
    }
    log::debug!("Quick mode: kept room of {} tiles", rooms.first().map_or(0, |r| r.size));
}

/// Connected component label for every room
fn components(rooms: &[Room]) -> Vec<usize> {
    let mut label = vec![usize::MAX; rooms.len()];
    let mut next = 0;
    for start in 0..rooms.len() {
        if label[start] != usize::MAX {
            continue;
        }
        let mut stack = vec![start];
        label[start] = next;
        while let Some(id) = stack.pop() {
            for &other in &rooms[id].connected {
                if label[other] == usize::MAX {
                    label[other] = next;
                    stack.push(other);
                }
            }
        }
        next += 1;
    }
    label
}

/// Find the globally closest edge-tile pair across different components.
/// Ties go to the first pair found in room order, then edge-tile order.
fn nearest_pair(rooms: &[Room], labels: &[usize]) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for a in 0..rooms.len() {
        for b in (a + 1)..rooms.len() {
            if labels[a] == labels[b] {
                continue;
            }
            for tile_a in &rooms[a].edge_tiles {
                for tile_b in &rooms[b].edge_tiles {
                    let distance = tile_a.distance_sq(tile_b);
                    if best.map_or(true, |c| distance < c.distance) {
                        best = Some(Candidate {
                            room_a: a,
                            room_b: b,
                            tile_a: *tile_a,
                            tile_b: *tile_b,
                            distance,
                        });
                    }
                }
            }
        }
    }
    best
}

fn connect_all(grid: &mut Grid, rooms: &mut [Room]) -> Result<(), GenerationError> {
    // Every merge joins two components, so n - 1 merges always suffice
    let limit = rooms.len().saturating_sub(1) as u32;

    for iteration in 0..=limit {
        let labels = components(rooms);
        let component_count = labels.iter().copied().max().map_or(0, |m| m + 1);
        if component_count <= 1 {
            log::debug!("Connected {} rooms with {} corridors", rooms.len(), iteration);
            return Ok(());
        }
        if iteration == limit {
            break;
        }

        let Some(best) = nearest_pair(rooms, &labels) else {
            let stranded = labels.iter().filter(|l| **l != labels[0]).count();
            return Err(GenerationError::StrandedRooms { count: stranded });
        };

        let carved = carve_passage(grid, best.tile_a, best.tile_b);
        link(rooms, best.room_a, best.room_b);

        let room_a = &mut rooms[best.room_a];
        room_a.tiles.extend(carved);
        room_a.refresh_edges(grid);
    }

    Err(GenerationError::IterationLimitExceeded {
        stage: Stage::Connectivity,
        limit,
    })
}

/// Record a symmetric connection and share accessibility across it
fn link(rooms: &mut [Room], a: RoomId, b: RoomId) {
    if rooms[a].accessible && !rooms[b].accessible {
        set_accessible(rooms, b);
    } else if rooms[b].accessible && !rooms[a].accessible {
        set_accessible(rooms, a);
    }
    rooms[a].connected.insert(b);
    rooms[b].connected.insert(a);
}

/// Mark a room and everything reachable from it accessible
fn set_accessible(rooms: &mut [Room], start: RoomId) {
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        if rooms[id].accessible {
            continue;
        }
        rooms[id].accessible = true;
        stack.extend(rooms[id].connected.iter().copied());
    }
}

/// Hand freshly opened regions to the room owning an orthogonal neighbour,
/// so every floor tile keeps exactly one owner
pub fn absorb_regions(grid: &Grid, rooms: &mut [Room], opened: &[Region]) {
    let mut owner: Vec<Option<RoomId>> = vec![None; grid.cells.len()];
    for (id, room) in rooms.iter().enumerate() {
        for t in &room.tiles {
            owner[grid.xy_to_idx(t.x, t.y)] = Some(id);
        }
    }

    for region in opened {
        let found = region
            .tiles
            .iter()
            .flat_map(|t| t.orthogonal())
            .filter(|n| grid.in_bounds(n.x, n.y))
            .find_map(|n| owner[grid.xy_to_idx(n.x, n.y)]);
        match found {
            Some(id) => {
                for t in &region.tiles {
                    owner[grid.xy_to_idx(t.x, t.y)] = Some(id);
                }
                rooms[id].tiles.extend(region.tiles.iter().copied());
                rooms[id].refresh_edges(grid);
            }
            None => log::warn!("Opened region of {} tiles has no owning room", region.len()),
        }
    }
}

/// Points of a Bresenham line from `from` towards `to`. Includes `from`,
/// stops one step short of `to`.
pub fn line(from: Coord, to: Coord) -> Vec<Coord> {
    let mut points = Vec::new();
    let (mut x, mut y) = (from.x, from.y);
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    let mut step = dx.signum();
    let mut gradient_step = dy.signum();
    let mut longest = dx.abs();
    let mut shortest = dy.abs();
    let inverted = longest < shortest;
    if inverted {
        std::mem::swap(&mut longest, &mut shortest);
        std::mem::swap(&mut step, &mut gradient_step);
    }

    let mut accumulator = longest / 2;
    for _ in 0..longest {
        points.push(Coord::new(x, y));
        if inverted {
            y += step;
        } else {
            x += step;
        }
        accumulator += shortest;
        if accumulator >= longest {
            if inverted {
                x += gradient_step;
            } else {
                y += gradient_step;
            }
            accumulator -= longest;
        }
    }
    points
}

/// Open a disc of floor around `center`, leaving the border ring intact.
/// Returns the cells that changed.
fn carve_disc(grid: &mut Grid, center: Coord, radius: i32) -> Vec<Coord> {
    let mut opened = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let (x, y) = (center.x + dx, center.y + dy);
            if !grid.in_bounds(x, y) || grid.on_border(x, y) {
                continue;
            }
            if !grid.is_floor(x, y) {
                grid.set(x, y, Cell::Floor);
                opened.push(Coord::new(x, y));
            }
        }
    }
    opened
}

/// Carve a corridor between two tiles. Returns the newly opened cells.
pub fn carve_passage(grid: &mut Grid, from: Coord, to: Coord) -> Vec<Coord> {
    let mut opened = Vec::new();
    for point in line(from, to) {
        opened.extend(carve_disc(grid, point, CORRIDOR_RADIUS));
    }
    opened
}
