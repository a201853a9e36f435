//! Autotile classification
//!
//! Two readings of a cell's 8-neighbourhood:
//! - [`cleanup_action`] repairs wall shapes that would render as broken
//!   one-cell-thick walls. Off-grid neighbours count as wall.
//! - [`classify`] picks the visual variant for a wall. Off-grid neighbours
//!   count as no tile at all.
//!
//! Both are first-match-wins tables; the order of the arms is the contract.

use super::map::Grid;
use super::tile::{Cell, TileVariant};

/// State of one neighbour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighbor {
    Floor,
    Wall,
    /// Outside the grid
    Void,
}

/// How off-grid neighbours are read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffGrid {
    AsWall,
    AsVoid,
}

/// The 8 neighbours of a cell; north is `y + 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    pub n: Neighbor,
    pub s: Neighbor,
    pub e: Neighbor,
    pub w: Neighbor,
    pub ne: Neighbor,
    pub nw: Neighbor,
    pub se: Neighbor,
    pub sw: Neighbor,
}

impl Neighborhood {
    /// Offsets in bit order used by [`Neighborhood::from_mask`]
    pub const OFFSETS: [(i32, i32); 8] = [
        (0, 1),   // n
        (0, -1),  // s
        (1, 0),   // e
        (-1, 0),  // w
        (1, 1),   // ne
        (-1, 1),  // nw
        (1, -1),  // se
        (-1, -1), // sw
    ];

    /// Read the neighbourhood of `(x, y)` from the grid
    pub fn of(grid: &Grid, x: i32, y: i32, off_grid: OffGrid) -> Self {
        let at = |(dx, dy): (i32, i32)| match grid.get(x + dx, y + dy) {
            Some(Cell::Floor) => Neighbor::Floor,
            Some(Cell::Wall) => Neighbor::Wall,
            None => match off_grid {
                OffGrid::AsWall => Neighbor::Wall,
                OffGrid::AsVoid => Neighbor::Void,
            },
        };
        let o = Self::OFFSETS;
        Self {
            n: at(o[0]),
            s: at(o[1]),
            e: at(o[2]),
            w: at(o[3]),
            ne: at(o[4]),
            nw: at(o[5]),
            se: at(o[6]),
            sw: at(o[7]),
        }
    }

    /// Build from a bitmask where a set bit means floor, bits ordered as
    /// [`Neighborhood::OFFSETS`]. Clear bits are walls.
    pub fn from_mask(mask: u8) -> Self {
        let bit = |i: u8| {
            if mask & (1 << i) != 0 {
                Neighbor::Floor
            } else {
                Neighbor::Wall
            }
        };
        Self {
            n: bit(0),
            s: bit(1),
            e: bit(2),
            w: bit(3),
            ne: bit(4),
            nw: bit(5),
            se: bit(6),
            sw: bit(7),
        }
    }
}

fn floor(n: Neighbor) -> bool {
    n == Neighbor::Floor
}

fn wall(n: Neighbor) -> bool {
    n == Neighbor::Wall
}

/// Repair applied to a wall cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupAction {
    None,
    /// Turn the cell itself into floor
    OpenSelf,
    /// Wall up the northern neighbour
    CloseNorth,
    /// Wall up the eastern neighbour
    CloseEast,
    /// Wall up the western neighbour
    CloseWest,
}

/// Decide the repair for a wall cell with the given neighbourhood
pub fn cleanup_action(nb: &Neighborhood) -> CleanupAction {
    use CleanupAction::*;

    if floor(nb.n) {
        if floor(nb.e) {
            if wall(nb.ne) || floor(nb.s) {
                return OpenSelf;
            }
            return None;
        }
        if floor(nb.w) {
            return if wall(nb.nw) { OpenSelf } else { None };
        }
        if floor(nb.s) {
            return OpenSelf;
        }
        // Floor only to the north: a thin diagonal wall line
        if (floor(nb.nw) && floor(nb.se)) || (floor(nb.ne) && floor(nb.sw)) {
            return CloseNorth;
        }
        return None;
    }

    if floor(nb.e) {
        if floor(nb.w) {
            return OpenSelf;
        }
        if floor(nb.nw) && floor(nb.se) {
            return CloseEast;
        }
        return None;
    }

    if floor(nb.w) && floor(nb.nw) && floor(nb.se) {
        return CloseWest;
    }

    None
}

/// Run the cleanup table once over every wall cell, row-major, in place.
/// Returns the number of cells changed.
///
/// Cells see the repairs already made earlier in the scan, so the order is
/// part of the result: `y` outer, `x` inner. A column-major scan of the same
/// table gives different grids.
pub fn cleanup_pass(grid: &mut Grid) -> usize {
    let mut changed = 0;
    for y in 0..grid.height {
        for x in 0..grid.width {
            if !grid.is_wall_or_void(x, y) {
                continue;
            }
            let nb = Neighborhood::of(grid, x, y, OffGrid::AsWall);
            let target = match cleanup_action(&nb) {
                CleanupAction::None => continue,
                CleanupAction::OpenSelf => (x, y, Cell::Floor),
                CleanupAction::CloseNorth => (x, y + 1, Cell::Wall),
                CleanupAction::CloseEast => (x + 1, y, Cell::Wall),
                CleanupAction::CloseWest => (x - 1, y, Cell::Wall),
            };
            let (tx, ty, cell) = target;
            if grid.get(tx, ty).is_some_and(|c| c != cell) {
                grid.set(tx, ty, cell);
                changed += 1;
            }
        }
    }
    changed
}

/// Pick the visual variant for a wall with the given neighbourhood
///
/// Orthogonal floor beats diagonal floor; north is checked before south
/// before east and west.
pub fn classify_wall(nb: &Neighborhood) -> TileVariant {
    use TileVariant::*;

    if floor(nb.n) {
        if floor(nb.e) {
            OuterCornerNE
        } else if floor(nb.w) {
            OuterCornerNW
        } else {
            EdgeS
        }
    } else if floor(nb.s) {
        if floor(nb.e) {
            OuterCornerSE
        } else if floor(nb.w) {
            OuterCornerSW
        } else {
            EdgeN
        }
    } else if floor(nb.e) {
        EdgeW
    } else if floor(nb.w) {
        EdgeE
    } else if floor(nb.ne) {
        if floor(nb.sw) {
            InnerCornerNWSE
        } else {
            InnerCornerSW
        }
    } else if floor(nb.nw) {
        if floor(nb.se) {
            InnerCornerNESW
        } else {
            InnerCornerSE
        }
    } else if floor(nb.se) {
        InnerCornerNW
    } else if floor(nb.sw) {
        InnerCornerNE
    } else {
        Background
    }
}

/// Visual variant of the cell at `(x, y)`
pub fn classify(grid: &Grid, x: i32, y: i32) -> TileVariant {
    if grid.is_floor(x, y) {
        return TileVariant::Floor;
    }
    classify_wall(&Neighborhood::of(grid, x, y, OffGrid::AsVoid))
}

/// Variant for every cell, row-major
pub fn classify_grid(grid: &Grid) -> Vec<TileVariant> {
    (0..grid.cells.len())
        .map(|idx| {
            let (x, y) = grid.idx_to_xy(idx);
            classify(grid, x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: u8 = 1 << 0;
    const S: u8 = 1 << 1;
    const E: u8 = 1 << 2;
    const W: u8 = 1 << 3;
    const NE: u8 = 1 << 4;
    const NW: u8 = 1 << 5;
    const SE: u8 = 1 << 6;
    const SW: u8 = 1 << 7;

    fn variant(mask: u8) -> TileVariant {
        classify_wall(&Neighborhood::from_mask(mask))
    }

    fn action(mask: u8) -> CleanupAction {
        cleanup_action(&Neighborhood::from_mask(mask))
    }

    #[test]
    fn test_classifier_is_total() {
        let mut seen = std::collections::HashSet::new();
        for mask in 0..=255u8 {
            let v = variant(mask);
            assert_ne!(v, TileVariant::Floor, "wall classified as floor for {:#010b}", mask);
            seen.insert(v);
            // Cleanup table must also answer every pattern
            let _ = action(mask);
        }
        // Every wall variant is reachable
        assert_eq!(seen.len(), TileVariant::ALL.len() - 1);
    }

    #[test]
    fn test_orthogonal_precedence() {
        assert_eq!(variant(N | E), TileVariant::OuterCornerNE);
        assert_eq!(variant(N | W), TileVariant::OuterCornerNW);
        // North wins over south, east over west
        assert_eq!(variant(N | S | E | W), TileVariant::OuterCornerNE);
        assert_eq!(variant(N | S), TileVariant::EdgeS);
        assert_eq!(variant(S | W), TileVariant::OuterCornerSW);
        assert_eq!(variant(S | E | SW), TileVariant::OuterCornerSE);
        assert_eq!(variant(S), TileVariant::EdgeN);
        assert_eq!(variant(E | W), TileVariant::EdgeW);
        assert_eq!(variant(W | NE), TileVariant::EdgeE);
    }

    #[test]
    fn test_diagonal_only() {
        assert_eq!(variant(NE), TileVariant::InnerCornerSW);
        assert_eq!(variant(NE | SW), TileVariant::InnerCornerNWSE);
        assert_eq!(variant(NW), TileVariant::InnerCornerSE);
        assert_eq!(variant(NW | SE), TileVariant::InnerCornerNESW);
        // NE is checked before NW
        assert_eq!(variant(NE | NW | SE), TileVariant::InnerCornerSW);
        assert_eq!(variant(SE), TileVariant::InnerCornerNW);
        assert_eq!(variant(SW), TileVariant::InnerCornerNE);
        assert_eq!(variant(SE | SW), TileVariant::InnerCornerNW);
        assert_eq!(variant(0), TileVariant::Background);
    }

    #[test]
    fn test_cleanup_table() {
        use CleanupAction::*;
        assert_eq!(action(N | E), OpenSelf); // NE is wall
        assert_eq!(action(N | E | NE), None);
        assert_eq!(action(N | E | NE | S), OpenSelf);
        assert_eq!(action(N | W), OpenSelf);
        assert_eq!(action(N | W | NW), None);
        assert_eq!(action(N | S), OpenSelf);
        assert_eq!(action(N | NW | SE), CloseNorth);
        assert_eq!(action(N | NE | SW), CloseNorth);
        assert_eq!(action(N | NE), None);
        assert_eq!(action(E | W), OpenSelf);
        assert_eq!(action(E | NW | SE), CloseEast);
        assert_eq!(action(E), None);
        assert_eq!(action(W | NW | SE), CloseWest);
        assert_eq!(action(W | NE | SW), None);
        assert_eq!(action(S), None);
        assert_eq!(action(0), None);
    }

    #[test]
    fn test_off_grid_policies_differ() {
        let grid = Grid::from_rows(&["."]);
        let as_wall = Neighborhood::of(&grid, 0, 0, OffGrid::AsWall);
        let as_void = Neighborhood::of(&grid, 0, 0, OffGrid::AsVoid);
        assert_eq!(as_wall.n, Neighbor::Wall);
        assert_eq!(as_void.n, Neighbor::Void);
    }

    #[test]
    fn test_cleanup_pass_opens_thin_wall() {
        // Single wall cell between floor to the east and west
        let mut grid = Grid::from_rows(&[
            "#####",
            "#...#",
            "#.#.#",
            "#...#",
            "#####",
        ]);
        let changed = cleanup_pass(&mut grid);
        assert!(changed >= 1);
        assert!(grid.is_floor(2, 2));
    }

    #[test]
    fn test_cleanup_pass_sees_earlier_repairs() {
        let mut grid = Grid::from_rows(&[
            "#####",
            "##.##",
            "###.#",
            "##.##",
            "#####",
        ]);
        let changed = cleanup_pass(&mut grid);

        // (3, 1) opens while (2, 2) is still wall; (2, 2) opens afterwards.
        // A column-major scan would open (2, 2) first and leave (3, 1) shut.
        assert_eq!(changed, 2);
        assert_eq!(grid.to_rows(), vec!["#####", "##.##", "##..#", "##..#", "#####"]);
    }

    #[test]
    fn test_classify_grid() {
        let grid = Grid::from_rows(&[
            "###",
            "#.#",
            "###",
        ]);
        let variants = classify_grid(&grid);
        let at = |x: i32, y: i32| variants[grid.xy_to_idx(x, y)];
        assert_eq!(at(1, 1), TileVariant::Floor);
        // Wall south of the floor has floor to its north
        assert_eq!(at(1, 0), TileVariant::EdgeS);
        assert_eq!(at(1, 2), TileVariant::EdgeN);
        assert_eq!(at(0, 1), TileVariant::EdgeW);
        assert_eq!(at(2, 1), TileVariant::EdgeE);
        assert_eq!(at(0, 0), TileVariant::InnerCornerSW);
        assert_eq!(at(2, 2), TileVariant::InnerCornerNE);
    }
}
