//! Track layout builders.
//!
//! Each helper writes plain rails blocks (or ladders) into a [`GridWorld`]
//! and returns the cell where the layout ends, so layouts can be chained.

use crate::GridWorld;
use trackway_core::{Block, Cell, Direction, RailShape};

impl GridWorld {
    /// `count` straight rails from `start` toward `direction` (a cardinal).
    /// Returns the last cell.
    pub fn straight(&mut self, start: Cell, direction: Direction, count: i32) -> Cell {
        let shape = if direction.is_along_x() {
            RailShape::EastWest
        } else {
            RailShape::NorthSouth
        };
        let mut cell = start;
        for i in 0..count {
            if i > 0 {
                cell = cell.offset(direction);
            }
            self.set(cell, Block::rails(shape));
        }
        cell
    }

    /// A curve at `cell` joining faces `a` and `b`.
    ///
    /// # Panics
    ///
    /// If `a` and `b` are not perpendicular cardinals.
    pub fn curve(&mut self, cell: Cell, a: Direction, b: Direction) -> Cell {
        let shape = RailShape::from_connections(a, b)
            .filter(|s| s.is_curve())
            .unwrap_or_else(|| panic!("no curve joins {a} and {b}"));
        self.set(cell, Block::rails(shape));
        cell
    }

    /// A slope at `cell` rising toward `direction`. Returns the cell the
    /// slope leads onto at the top.
    pub fn slope(&mut self, cell: Cell, direction: Direction) -> Cell {
        let shape = RailShape::ascending_toward(direction)
            .unwrap_or_else(|| panic!("no slope rises toward {direction}"));
        self.set(cell, Block::rails(shape));
        cell.up().offset(direction)
    }

    /// A ladder column of `height` cells from `base` against `wall`, with
    /// solid blocks behind it. Returns the top ladder cell.
    pub fn vertical_column(&mut self, base: Cell, wall: Direction, height: i32) -> Cell {
        let mut top = base;
        for dy in 0..height {
            top = base.relative(0, dy, 0);
            self.set(top, Block::Ladder { wall });
            self.set(top.offset(wall), Block::Solid);
        }
        top
    }

    /// A closed rectangular loop `width` cells along X and `depth` along Z
    /// with its north-west corner at `corner`. Both sides need at least two
    /// cells.
    pub fn rail_loop(&mut self, corner: Cell, width: i32, depth: i32) -> Cell {
        assert!(width >= 2 && depth >= 2, "loop needs at least 2 x 2 cells");
        let (w, d) = (width - 1, depth - 1);
        for x in 1..w {
            self.set(corner.relative(x, 0, 0), Block::rails(RailShape::EastWest));
            self.set(corner.relative(x, 0, d), Block::rails(RailShape::EastWest));
        }
        for z in 1..d {
            self.set(corner.relative(0, 0, z), Block::rails(RailShape::NorthSouth));
            self.set(corner.relative(w, 0, z), Block::rails(RailShape::NorthSouth));
        }
        self.set(corner, Block::rails(RailShape::SouthEast));
        self.set(corner.relative(w, 0, 0), Block::rails(RailShape::SouthWest));
        self.set(corner.relative(w, 0, d), Block::rails(RailShape::NorthWest));
        self.set(corner.relative(0, 0, d), Block::rails(RailShape::NorthEast));
        corner
    }
}
