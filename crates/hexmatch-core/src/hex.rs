//! Offset hex grid topology.
//!
//! The board is stored as a plain `width x height` array, but rendered as a
//! hex grid where every odd column is pushed down by half a row. That makes
//! the neighbor set of a cell depend on the parity of its column:
//!
//! - `Coord`: a (column, row) cell address, row 0 at the bottom
//! - `Direction`: the six neighbor directions in a fixed order
//! - `Dimensions`: bounds checking for a concrete board
//! - `Layout`: conversion to world positions and drag-vector resolution
//!
//! Everything here is pure; there is no state and nothing can fail.

use serde::{Deserialize, Serialize};

/// One of the six neighbor directions.
///
/// The order is significant: it is the order neighbors are reported in, and
/// ties when resolving a drag vector go to the earliest direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Straight up the column
    Up,
    /// Into the next column, upper half
    UpRight,
    /// Into the next column, lower half
    DownRight,
    /// Straight down the column
    Down,
    /// Into the previous column, lower half
    DownLeft,
    /// Into the previous column, upper half
    UpLeft,
}

impl Direction {
    /// All directions in neighbor-table order
    pub const ALL: [Direction; 6] = [
        Direction::Up,
        Direction::UpRight,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::UpLeft,
    ];

    /// The three directions scanned "forward" when looking for rhombus pairs
    pub const FORWARD: [Direction; 3] = [Direction::Up, Direction::UpRight, Direction::DownRight];

    /// Position of this direction in the neighbor tables
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The direction pointing the other way along the same axis
    pub const fn opposite(self) -> Direction {
        Direction::ALL[(self as usize + 3) % 6]
    }
}

/// The three undirected axes of the grid, each as a pair of opposite
/// directions. Walking both halves of every axis covers all six directions
/// exactly once.
pub const AXES: [(Direction, Direction); 3] = [
    (Direction::Up, Direction::Down),
    (Direction::UpRight, Direction::DownLeft),
    (Direction::DownRight, Direction::UpLeft),
];

/// Neighbor offsets `(d_col, d_row)` for cells in even columns
const EVEN_COLUMN_OFFSETS: [(i32, i32); 6] = [(0, 1), (1, 1), (1, 0), (0, -1), (-1, 0), (-1, 1)];

/// Neighbor offsets `(d_col, d_row)` for cells in odd columns
const ODD_COLUMN_OFFSETS: [(i32, i32); 6] = [(0, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0)];

/// A cell address on the offset grid.
///
/// Coordinates are signed so that neighbors of edge cells can be expressed
/// and then rejected by [`Dimensions::contains`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Coord {
    /// Column, increasing to the right
    pub col: i32,
    /// Row, increasing upward (row 0 is the bottom of the board)
    pub row: i32,
}

impl Coord {
    /// Create a new coordinate
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Whether this cell sits in an even column (the non-shifted ones)
    pub const fn is_even_column(&self) -> bool {
        self.col.rem_euclid(2) == 0
    }

    fn offsets(&self) -> &'static [(i32, i32); 6] {
        if self.is_even_column() {
            &EVEN_COLUMN_OFFSETS
        } else {
            &ODD_COLUMN_OFFSETS
        }
    }

    /// The six candidate neighbors in [`Direction::ALL`] order.
    /// Some may lie outside the board.
    pub fn neighbors(&self) -> [Coord; 6] {
        let offsets = self.offsets();
        std::array::from_fn(|i| Coord::new(self.col + offsets[i].0, self.row + offsets[i].1))
    }

    /// The neighbor in a specific direction
    pub fn neighbor(&self, direction: Direction) -> Coord {
        let (dc, dr) = self.offsets()[direction.index()];
        Coord::new(self.col + dc, self.row + dr)
    }

    /// Whether `other` is one of the six neighbors of this cell
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.neighbors().contains(other)
    }

    /// Cells adjacent to both `self` and `other`, in `self`'s neighbor order.
    ///
    /// For two adjacent cells this is always the pair of cells that complete
    /// a rhombus with them on its short diagonal.
    pub fn common_neighbors(&self, other: &Coord) -> Vec<Coord> {
        let theirs = other.neighbors();
        self.neighbors()
            .into_iter()
            .filter(|c| theirs.contains(c))
            .collect()
    }
}

/// Board bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Whether a coordinate lies on the board
    pub fn contains(&self, coord: Coord) -> bool {
        coord.col >= 0
            && coord.row >= 0
            && (coord.col as usize) < self.width
            && (coord.row as usize) < self.height
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// All cells, column by column, bottom to top
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let height = self.height as i32;
        (0..self.width as i32).flat_map(move |col| (0..height).map(move |row| Coord::new(col, row)))
    }
}

/// A position in world space (rendering units, y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct WorldPos {
    pub x: f64,
    pub y: f64,
}

impl WorldPos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    fn normalized(&self) -> Option<WorldPos> {
        let len = self.length();
        if len <= f64::EPSILON || !len.is_finite() {
            return None;
        }
        Some(WorldPos::new(self.x / len, self.y / len))
    }

    fn dot(&self, other: &WorldPos) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Mean of a set of positions, `None` when the set is empty
    pub fn centroid<I: IntoIterator<Item = WorldPos>>(positions: I) -> Option<WorldPos> {
        let mut count = 0usize;
        let mut sum = WorldPos::default();
        for p in positions {
            sum.x += p.x;
            sum.y += p.y;
            count += 1;
        }
        (count > 0).then(|| WorldPos::new(sum.x / count as f64, sum.y / count as f64))
    }
}

/// Spacing used to place cells in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Horizontal distance between column centers
    pub x_offset: f64,
    /// Vertical distance between row centers
    pub y_offset: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            x_offset: 0.9,
            y_offset: 0.78,
        }
    }
}

impl Layout {
    /// Center of a cell. Odd columns sit half a row lower.
    pub fn to_world(&self, coord: Coord) -> WorldPos {
        let x = coord.col as f64 * self.x_offset;
        let mut y = coord.row as f64 * self.y_offset;
        if !coord.is_even_column() {
            y -= self.y_offset / 2.0;
        }
        WorldPos::new(x, y)
    }

    /// Pick the neighbor direction best aligned with a drag vector.
    ///
    /// Returns `None` for a zero-length (or non-finite) drag.
    pub fn direction_from_drag(&self, origin: Coord, drag: WorldPos) -> Option<Direction> {
        let drag = drag.normalized()?;
        let center = self.to_world(origin);

        let mut best: Option<(Direction, f64)> = None;
        for direction in Direction::ALL {
            let target = self.to_world(origin.neighbor(direction));
            let Some(to_neighbor) = WorldPos::new(target.x - center.x, target.y - center.y).normalized()
            else {
                continue;
            };
            let dot = drag.dot(&to_neighbor);
            // Strictly greater: ties keep the earlier direction
            if best.map_or(true, |(_, max)| dot > max) {
                best = Some((direction, dot));
            }
        }
        best.map(|(direction, _)| direction)
    }
}
