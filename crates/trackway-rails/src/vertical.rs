//! Vertical rails: ladders a body climbs straight up or down.

use crate::behavior::{Directions, RailBehavior, RailView};
use crate::logic::LogicKind;
use crate::path::{RailPath, Y_POS_OFFSET};
use crate::rail_type::RailType;
use glam::DVec3;
use smallvec::smallvec;
use trackway_core::{Block, Cell, Direction};

/// Horizontal offset of the climbing column from the cell centre, toward
/// the wall.
pub const WALL_OFFSET: f64 = 0.5;

/// The wall side of a vertical rail block.
pub(crate) fn ladder_wall(block: Block) -> Option<Direction> {
    match block {
        Block::Ladder { wall } => Some(wall),
        _ => None,
    }
}

/// Ladders as vertical track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerticalRail;

impl VerticalRail {
    /// The rail a body climbing off the top of the vertical rail at
    /// `vertical` continues onto, if any.
    ///
    /// The cell above the ladder must be free; the candidate is the cell
    /// beside it on the wall side, and is accepted when its rail can be left
    /// back toward the ladder.
    pub fn after_slope(view: RailView<'_>, vertical: Cell) -> Option<Cell> {
        let wall = ladder_wall(view.block(vertical))?;
        let above = vertical.up();
        if view.block(above).is_solid() {
            return None;
        }
        let candidate = above.offset(wall);
        let registry = view.registry();
        for &rail_type in registry.types() {
            // A ladder can never be left sideways.
            if rail_type == RailType::Vertical {
                continue;
            }
            let Some(behavior) = registry.behavior(rail_type) else {
                continue;
            };
            if let Some(rail) = behavior.find_rail(view, candidate) {
                if behavior
                    .possible_directions(view, rail)
                    .contains(&wall.opposite())
                {
                    return Some(rail);
                }
            }
        }
        None
    }
}

impl RailBehavior for VerticalRail {
    fn name(&self) -> &str {
        "vertical"
    }

    fn is_rail(&self, view: RailView<'_>, cell: Cell) -> bool {
        ladder_wall(view.block(cell)).is_some()
    }

    fn find_rail(&self, view: RailView<'_>, pos: Cell) -> Option<Cell> {
        if self.is_rail(view, pos) {
            return Some(pos);
        }
        // A body that has climbed over the top still rides the ladder
        // below, as long as a rail continues beside the top.
        let below = pos.down();
        Self::after_slope(view, below).map(|_| below)
    }

    fn possible_directions(&self, _view: RailView<'_>, _rail: Cell) -> Directions {
        smallvec![Direction::Up, Direction::Down]
    }

    fn next_cell(&self, view: RailView<'_>, rail: Cell, direction: Direction) -> Option<Cell> {
        if direction != Direction::Up {
            return Some(rail.down());
        }
        let next = rail.up();
        if !view.is_any_rail(next) {
            if let Some(after) = Self::after_slope(view, rail) {
                return Some(after);
            }
        }
        Some(next)
    }

    fn logic(&self, view: RailView<'_>, rail: Cell) -> LogicKind {
        match ladder_wall(view.block(rail)) {
            Some(wall) => LogicKind::Vertical { wall },
            None => LogicKind::Air,
        }
    }

    fn path(&self, view: RailView<'_>, rail: Cell, _heading: Direction) -> RailPath {
        let Some(wall) = ladder_wall(view.block(rail)) else {
            return RailPath::default();
        };
        let column = rail.center() + wall.to_vector() * WALL_OFFSET;
        let bottom = f64::from(rail.y) + Y_POS_OFFSET;
        RailPath::from_points([
            DVec3::new(column.x, bottom, column.z),
            DVec3::new(column.x, bottom + 1.0, column.z),
        ])
    }
}
