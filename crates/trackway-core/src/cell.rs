//! Integer voxel coordinates.

use crate::direction::Direction;
use glam::DVec3;
use std::fmt;

/// An integer `(x, y, z)` voxel coordinate.
///
/// Cells are plain values: cheap to copy, ordered, and usable as map or set
/// keys. The continuous space occupied by a cell is the unit cube from
/// `(x, y, z)` to `(x + 1, y + 1, z + 1)`.
///
/// # Examples
///
/// ```
/// use trackway_core::{Cell, Direction};
///
/// let c = Cell::new(3, 64, -2);
/// assert_eq!(c.offset(Direction::East), Cell::new(4, 64, -2));
/// assert_eq!(c.offset(Direction::North), Cell::new(3, 64, -3));
/// assert_eq!(c.manhattan_distance(Cell::new(0, 64, 0)), 5);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// East-west coordinate, increasing eastward.
    pub x: i32,
    /// Height.
    pub y: i32,
    /// North-south coordinate, increasing southward.
    pub z: i32,
}

impl Cell {
    /// The world origin.
    pub const ORIGIN: Cell = Cell::new(0, 0, 0);

    /// Construct a cell from its coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The cell `(dx, dy, dz)` away from this one.
    pub const fn relative(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// The neighbouring cell one step in `dir`. `SelfFace` returns `self`.
    pub const fn offset(self, dir: Direction) -> Self {
        self.relative(dir.mod_x(), dir.mod_y(), dir.mod_z())
    }

    /// The cell directly above.
    pub const fn up(self) -> Self {
        self.relative(0, 1, 0)
    }

    /// The cell directly below.
    pub const fn down(self) -> Self {
        self.relative(0, -1, 0)
    }

    /// Component-wise difference `other - self`.
    pub const fn delta_to(self, other: Cell) -> (i32, i32, i32) {
        (other.x - self.x, other.y - self.y, other.z - self.z)
    }

    /// Sum of absolute coordinate differences.
    pub fn manhattan_distance(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }

    /// Coordinates of the 16x16 column chunk holding this cell.
    pub const fn chunk(self) -> (i32, i32) {
        (self.x >> 4, self.z >> 4)
    }

    /// The minimum corner of the cell as a continuous point.
    pub fn corner(self) -> DVec3 {
        DVec3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// The centre of the cell.
    pub fn center(self) -> DVec3 {
        self.corner() + DVec3::splat(0.5)
    }

    /// The cell containing a continuous point.
    pub fn containing(p: DVec3) -> Self {
        let f = p.floor();
        Self::new(f.x as i32, f.y as i32, f.z as i32)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<[i32; 3]> for Cell {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(i32, i32, i32)> for Cell {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}
