//! Grid data structure
//!
//! The 2D cell grid a generation run works on. `y` grows northward, so the
//! cell "above" `(x, y)` is `(x, y + 1)`.

use serde::{Deserialize, Serialize};

use super::tile::Cell;

/// Position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to another coordinate
    pub fn distance_sq(&self, other: &Coord) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Offset by a delta
    pub fn offset(&self, dx: i32, dy: i32) -> Coord {
        Coord::new(self.x + dx, self.y + dy)
    }

    /// Orthogonal neighbours (N, S, E, W)
    pub fn orthogonal(&self) -> [Coord; 4] {
        [
            self.offset(0, 1),
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(-1, 0),
        ]
    }

    /// Row-major ordering key
    pub fn scan_key(&self) -> (i32, i32) {
        (self.y, self.x)
    }
}

/// A width x height grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid filled with one cell type
    pub fn new(width: i32, height: i32, fill: Cell) -> Self {
        let len = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width,
            height,
            cells: vec![fill; len],
        }
    }

    /// Build a grid from text rows, `#` for wall and anything else for floor.
    /// The first row is the northernmost (highest `y`).
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as i32;
        let mut grid = Grid::new(width, height, Cell::Wall);
        for (row_idx, row) in rows.iter().enumerate() {
            let y = height - 1 - row_idx as i32;
            for (x, ch) in row.chars().enumerate() {
                let cell = if ch == '#' { Cell::Wall } else { Cell::Floor };
                grid.set(x as i32, y, cell);
            }
        }
        grid
    }

    /// Render as text rows, northernmost first
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .rev()
            .map(|y| {
                (0..self.width)
                    .map(|x| if self.is_floor(x, y) { '.' } else { '#' })
                    .collect()
            })
            .collect()
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Convert 1D index to 2D coordinates
    #[inline]
    pub fn idx_to_xy(&self, idx: usize) -> (i32, i32) {
        let idx = idx as i32;
        (idx % self.width, idx / self.width)
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Check if coordinates lie on the outermost ring
    #[inline]
    pub fn on_border(&self, x: i32, y: i32) -> bool {
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }

    /// Get cell at position
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if self.in_bounds(x, y) {
            Some(self.cells[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    /// Set cell at position; out-of-bounds writes are ignored
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            self.cells[idx] = cell;
        }
    }

    pub fn is_floor(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map_or(false, |c| c.is_floor())
    }

    /// Wall check that treats off-grid as wall
    pub fn is_wall_or_void(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map_or(true, |c| c.is_wall())
    }

    /// Count wall cells among the 8 neighbours, off-grid counting as wall
    pub fn wall_neighbours(&self, x: i32, y: i32) -> u8 {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.is_wall_or_void(x + dx, y + dy) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Whether the cell has a wall (or the edge of the grid) orthogonally adjacent
    pub fn touches_wall(&self, c: Coord) -> bool {
        c.orthogonal().iter().any(|n| self.is_wall_or_void(n.x, n.y))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// All coordinates holding `cell`, row-major
    pub fn positions(&self, cell: Cell) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == cell)
            .map(|(idx, _)| {
                let (x, y) = self.idx_to_xy(idx);
                Coord::new(x, y)
            })
            .collect()
    }

    /// Grid centre, used as the recommended camera anchor
    pub fn center(&self) -> Coord {
        Coord::new(self.width / 2, self.height / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        let grid = Grid::new(7, 4, Cell::Wall);
        let idx = grid.xy_to_idx(5, 2);
        assert_eq!(idx, 19);
        assert_eq!(grid.idx_to_xy(idx), (5, 2));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(3, 3, Cell::Floor);
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(3, 0), None);
        grid.set(5, 5, Cell::Wall);
        assert_eq!(grid.count(Cell::Wall), 0);
        assert!(grid.is_wall_or_void(-1, 1));
        assert!(!grid.is_floor(0, 3));
    }

    #[test]
    fn test_wall_neighbours_counts_void() {
        let grid = Grid::new(3, 3, Cell::Floor);
        assert_eq!(grid.wall_neighbours(1, 1), 0);
        assert_eq!(grid.wall_neighbours(0, 0), 5);
        assert_eq!(grid.wall_neighbours(1, 0), 3);

        let single = Grid::new(1, 1, Cell::Floor);
        assert_eq!(single.wall_neighbours(0, 0), 8);
    }

    #[test]
    fn test_rows_orientation() {
        let grid = Grid::from_rows(&[
            "#..",
            "###",
        ]);
        assert_eq!(grid.width, 3);
        assert_eq!(grid.height, 2);
        // First row is the top (north)
        assert!(grid.is_floor(1, 1));
        assert!(!grid.is_floor(0, 1));
        assert!(!grid.is_floor(1, 0));
        assert_eq!(grid.to_rows(), vec!["#..".to_string(), "###".to_string()]);
    }

    #[test]
    fn test_touches_wall() {
        let grid = Grid::from_rows(&[
            "#####",
            "#...#",
            "#...#",
            "#...#",
            "#####",
        ]);
        assert!(!grid.touches_wall(Coord::new(2, 2)));
        assert!(grid.touches_wall(Coord::new(1, 2)));
        assert!(grid.touches_wall(Coord::new(3, 3)));
    }

    #[test]
    fn test_distance_sq() {
        assert_eq!(Coord::new(4, 2).distance_sq(&Coord::new(14, 2)), 100);
        assert_eq!(Coord::new(3, 3).distance_sq(&Coord::new(16, 16)), 338);
    }
}
