//! Pressure-plate crossings.
//!
//! A plate carries no shape of its own. Its axis is sensed from the rails
//! around it: track on the north or south side only makes it a north-south
//! run, track on the east or west side only an east-west run, and track on
//! both axes (or none) a full cross whose heading is [`Direction::SelfFace`].

use crate::behavior::{Directions, RailBehavior, RailView};
use crate::logic::LogicKind;
use crate::path::RailPath;
use crate::rails_block::shape_path;
use smallvec::smallvec;
use trackway_core::{Block, Cell, Direction, RailShape};

/// Pressure plates as track crossings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CrossingRail;

impl CrossingRail {
    /// The sensed axis of the plate at `cell`: `South` for a north-south
    /// run, `East` for an east-west run, `SelfFace` for a cross.
    pub fn plate_axis(view: RailView<'_>, cell: Cell) -> Direction {
        let rail_at = |face: Direction| view.find_rail(cell.offset(face)).is_some();
        let ns = rail_at(Direction::North) || rail_at(Direction::South);
        let ew = rail_at(Direction::East) || rail_at(Direction::West);
        match (ns, ew) {
            (true, false) => Direction::South,
            (false, true) => Direction::East,
            _ => Direction::SelfFace,
        }
    }
}

impl RailBehavior for CrossingRail {
    fn name(&self) -> &str {
        "crossing"
    }

    fn is_rail(&self, view: RailView<'_>, cell: Cell) -> bool {
        matches!(view.block(cell), Block::PressurePlate)
    }

    fn possible_directions(&self, view: RailView<'_>, rail: Cell) -> Directions {
        match Self::plate_axis(view, rail) {
            Direction::South => smallvec![Direction::North, Direction::South],
            Direction::East => smallvec![Direction::East, Direction::West],
            _ => smallvec![Direction::SelfFace],
        }
    }

    fn next_cell(&self, view: RailView<'_>, rail: Cell, direction: Direction) -> Option<Cell> {
        let axis = Self::plate_axis(view, rail);
        if axis == Direction::SelfFace {
            return direction.is_cardinal().then(|| rail.offset(direction));
        }
        if direction == axis || direction == axis.opposite() {
            Some(rail.offset(direction))
        } else {
            Some(rail.offset(axis))
        }
    }

    fn logic(&self, view: RailView<'_>, rail: Cell) -> LogicKind {
        LogicKind::Crossing {
            axis: Self::plate_axis(view, rail),
        }
    }

    fn path(&self, view: RailView<'_>, rail: Cell, heading: Direction) -> RailPath {
        let along_x = match Self::plate_axis(view, rail) {
            Direction::East => true,
            Direction::South => false,
            _ => heading.is_along_x(),
        };
        let shape = if along_x {
            RailShape::EastWest
        } else {
            RailShape::NorthSouth
        };
        shape_path(rail, shape)
    }
}
