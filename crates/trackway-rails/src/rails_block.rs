//! Behavior shared by every rails-block type: regular, powered, detector
//! and activator rails.
//!
//! The kinds differ only in which [`RailKind`] they accept and in whether
//! they may curve. Connectivity follows the rail shape: straights connect
//! opposite faces, curves two adjacent faces, slopes rise one cell toward
//! their ascending face.

use crate::behavior::{Directions, RailBehavior, RailView};
use crate::error::JunctionError;
use crate::junction::{Junctions, RailJunction};
use crate::logic::LogicKind;
use crate::path::{RailPath, Y_POS_OFFSET};
use crate::rail_type::RailType;
use crate::vertical::ladder_wall;
use glam::DVec3;
use smallvec::smallvec;
use trackway_core::{Block, BlockAccessMut, Cell, Direction, RailKind, RailShape};

/// A rail type backed by a rails block of one [`RailKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RailsType {
    rail_type: RailType,
    name: &'static str,
    kind: RailKind,
}

impl RailsType {
    /// A rails type accepting blocks of `kind`.
    pub const fn new(rail_type: RailType, name: &'static str, kind: RailKind) -> Self {
        Self {
            rail_type,
            name,
            kind,
        }
    }

    /// The block kind this type accepts.
    pub const fn kind(&self) -> RailKind {
        self.kind
    }

    fn shape(&self, view: RailView<'_>, cell: Cell) -> Option<RailShape> {
        match view.block(cell) {
            Block::Rails { kind, shape } if kind == self.kind => Some(shape),
            _ => None,
        }
    }
}

/// Whether the block above `rail` is a vertical rail against the `wall`
/// side.
pub(crate) fn is_vertical_above(view: RailView<'_>, rail: Cell, wall: Direction) -> bool {
    ladder_wall(view.block(rail.up())) == Some(wall)
}

/// Midpoint of the face of `cell` toward `face`, `height` above its floor.
pub(crate) fn edge_point(cell: Cell, face: Direction, height: f64) -> DVec3 {
    let c = cell.center() + face.to_vector() * 0.5;
    DVec3::new(c.x, f64::from(cell.y) + height, c.z)
}

/// The centreline of a rail of `shape` at `cell`.
pub(crate) fn shape_path(cell: Cell, shape: RailShape) -> RailPath {
    let [a, b] = shape.connections();
    let height = |face: Direction| {
        if shape.ascending() == Some(face) {
            1.0 + Y_POS_OFFSET
        } else {
            Y_POS_OFFSET
        }
    };
    RailPath::from_points([edge_point(cell, a, height(a)), edge_point(cell, b, height(b))])
}

/// The raw step off a rails block of `shape` heading `direction`.
pub(crate) fn shape_next_cell(
    view: RailView<'_>,
    rail: Cell,
    shape: RailShape,
    direction: Direction,
) -> Cell {
    let [a, b] = shape.connections();
    if shape.is_curve() {
        if direction == a || direction == b {
            return rail.offset(direction);
        }
        let back = direction.opposite();
        let exit = if back == a {
            b
        } else if back == b {
            a
        } else if matches!(a, Direction::South | Direction::East) {
            a
        } else {
            b
        };
        return rail.offset(exit);
    }

    if let Some(up) = shape.ascending() {
        if direction == up || direction == Direction::Up {
            let above = rail.up();
            let climb_onto_vertical = match ladder_wall(view.block(above)) {
                Some(wall) => direction == Direction::Up || wall == direction,
                None => false,
            };
            return if climb_onto_vertical {
                above
            } else {
                above.offset(up)
            };
        }
        return rail.offset(up.opposite());
    }

    if direction == a || direction == b {
        rail.offset(direction)
    } else {
        rail.offset(shape.direction())
    }
}

impl RailBehavior for RailsType {
    fn name(&self) -> &str {
        self.name
    }

    fn is_rail(&self, view: RailView<'_>, cell: Cell) -> bool {
        self.shape(view, cell).is_some()
    }

    fn possible_directions(&self, view: RailView<'_>, rail: Cell) -> Directions {
        let Some(shape) = self.shape(view, rail) else {
            return Directions::new();
        };
        if let Some(up) = shape.ascending() {
            if is_vertical_above(view, rail, up) {
                return smallvec![up.opposite(), Direction::Up];
            }
        }
        let [a, b] = shape.connections();
        smallvec![a, b]
    }

    fn next_cell(&self, view: RailView<'_>, rail: Cell, direction: Direction) -> Option<Cell> {
        let shape = self.shape(view, rail)?;
        Some(shape_next_cell(view, rail, shape, direction))
    }

    fn logic(&self, view: RailView<'_>, rail: Cell) -> LogicKind {
        match self.shape(view, rail) {
            None => LogicKind::Air,
            Some(shape) => match shape.ascending() {
                Some(up) if is_vertical_above(view, rail, up) => {
                    LogicKind::SlopeToVertical { direction: up }
                }
                Some(up) => LogicKind::Sloped { direction: up },
                None => LogicKind::Horizontal { shape },
            },
        }
    }

    fn path(&self, view: RailView<'_>, rail: Cell, heading: Direction) -> RailPath {
        let _ = heading;
        self.shape(view, rail)
            .map(|shape| shape_path(rail, shape))
            .unwrap_or_default()
    }

    fn junctions(&self, view: RailView<'_>, rail: Cell) -> Junctions {
        match self.shape(view, rail) {
            Some(shape) if !shape.is_sloped() => Direction::CARDINALS
                .into_iter()
                .map(RailJunction::toward)
                .collect(),
            _ => Junctions::new(),
        }
    }

    fn switch_junction(
        &self,
        world: &mut dyn BlockAccessMut,
        rail: Cell,
        from: &RailJunction,
        to: &RailJunction,
    ) -> Result<(), JunctionError> {
        let unsupported = || JunctionError::Unsupported {
            from: from.name.clone(),
            to: to.name.clone(),
        };
        match world.block(rail) {
            Block::Rails { kind, shape } if kind == self.kind && !shape.is_sloped() => {}
            _ => {
                return Err(JunctionError::NotSwitchable {
                    rail_type: self.rail_type,
                    cell: rail,
                })
            }
        }
        let shape = RailShape::from_connections(from.direction, to.direction)
            .ok_or_else(unsupported)?;
        if shape.is_curve() && !self.kind.can_curve() {
            return Err(unsupported());
        }
        world.set_block(
            rail,
            Block::Rails {
                kind: self.kind,
                shape,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use crate::registry::RailTypeRegistry;
    use crate::testing::SparseWorld;

    const EPS: f64 = 1e-9;

    fn world_with(cell: Cell, shape: RailShape) -> SparseWorld {
        let mut w = SparseWorld::default();
        w.set(cell, Block::rails(shape));
        w
    }

    // ── Connectivity ──────────────────────────────────────────────

    #[test]
    fn straight_steps_along_axis() {
        let reg = RailTypeRegistry::default();
        let w = world_with(Cell::ORIGIN, RailShape::NorthSouth);
        let view = reg.view(&w);
        let p = view.piece_at(Cell::ORIGIN);
        assert_eq!(view.next_cell(p, Direction::North), Some(Cell::new(0, 0, -1)));
        assert_eq!(view.next_cell(p, Direction::South), Some(Cell::new(0, 0, 1)));
        // Off-axis headings follow the south rule.
        assert_eq!(view.next_cell(p, Direction::East), Some(Cell::new(0, 0, 1)));
    }

    #[test]
    fn curve_turns() {
        let reg = RailTypeRegistry::default();
        let w = world_with(Cell::ORIGIN, RailShape::SouthWest);
        let view = reg.view(&w);
        let p = view.piece_at(Cell::ORIGIN);
        // Entered from the west heading east: leave south.
        assert_eq!(view.next_cell(p, Direction::East), Some(Cell::new(0, 0, 1)));
        // Entered from the south heading north: leave west.
        assert_eq!(view.next_cell(p, Direction::North), Some(Cell::new(-1, 0, 0)));
        // Heading already out of a connected face.
        assert_eq!(view.next_cell(p, Direction::West), Some(Cell::new(-1, 0, 0)));
    }

    #[test]
    fn curve_south_east_rule_for_unconnected_entry() {
        let reg = RailTypeRegistry::default();
        let w = world_with(Cell::ORIGIN, RailShape::NorthEast);
        let view = reg.view(&w);
        let p = view.piece_at(Cell::ORIGIN);
        // Heading down onto a curve: neither face matches, take the east face.
        assert_eq!(view.next_cell(p, Direction::Down), Some(Cell::new(1, 0, 0)));
    }

    #[test]
    fn slope_up_and_down() {
        let reg = RailTypeRegistry::default();
        let w = world_with(Cell::ORIGIN, RailShape::AscendingEast);
        let view = reg.view(&w);
        let p = view.piece_at(Cell::ORIGIN);
        assert_eq!(view.next_cell(p, Direction::East), Some(Cell::new(1, 1, 0)));
        assert_eq!(view.next_cell(p, Direction::West), Some(Cell::new(-1, 0, 0)));
        assert_eq!(
            view.possible_directions(p).as_slice(),
            &[Direction::East, Direction::West]
        );
    }

    #[test]
    fn slope_under_vertical_rail_climbs() {
        let reg = RailTypeRegistry::default();
        let mut w = world_with(Cell::ORIGIN, RailShape::AscendingEast);
        w.set(
            Cell::new(0, 1, 0),
            Block::Ladder {
                wall: Direction::East,
            },
        );
        let view = reg.view(&w);
        let p = view.piece_at(Cell::ORIGIN);
        assert_eq!(view.next_cell(p, Direction::East), Some(Cell::new(0, 1, 0)));
        assert_eq!(
            view.possible_directions(p).as_slice(),
            &[Direction::West, Direction::Up]
        );
        assert_eq!(
            view.logic(p).kind,
            LogicKind::SlopeToVertical {
                direction: Direction::East
            }
        );
    }

    #[test]
    fn finds_rail_below_position() {
        let reg = RailTypeRegistry::default();
        let w = world_with(Cell::ORIGIN, RailShape::EastWest);
        let view = reg.view(&w);
        let found = view.find_rail(Cell::new(0, 1, 0)).unwrap();
        assert_eq!(found.cell, Cell::ORIGIN);
        assert_eq!(found.rail_type, RailType::Regular);
        assert!(view.find_rail(Cell::new(0, 2, 0)).is_none());
    }

    // ── Geometry ──────────────────────────────────────────────────

    #[test]
    fn straight_path_spans_cell() {
        let path = shape_path(Cell::new(2, 5, 7), RailShape::EastWest);
        assert!((path.total_distance() - 1.0).abs() < EPS);
        let start = path.start_position().unwrap().position;
        assert!(start.distance(DVec3::new(3.0, 5.0625, 7.5)) < EPS);
    }

    #[test]
    fn curve_path_is_half_root_two() {
        let path = shape_path(Cell::ORIGIN, RailShape::SouthEast);
        assert!((path.total_distance() - std::f64::consts::FRAC_1_SQRT_2).abs() < EPS);
    }

    #[test]
    fn slope_path_rises_one() {
        let path = shape_path(Cell::ORIGIN, RailShape::AscendingNorth);
        assert!((path.total_distance() - std::f64::consts::SQRT_2).abs() < EPS);
        let [s] = path.segments() else {
            panic!("slope path should be one segment");
        };
        assert!((s.p0.y - Y_POS_OFFSET - 1.0).abs() < EPS);
        assert!((s.p1.y - Y_POS_OFFSET).abs() < EPS);
    }

    // ── Junctions ─────────────────────────────────────────────────

    #[test]
    fn regular_rail_switches_to_curve() {
        let reg = RailTypeRegistry::default();
        let mut w = world_with(Cell::ORIGIN, RailShape::NorthSouth);
        let piece = reg.view(&w).piece_at(Cell::ORIGIN);
        let (from, to) = {
            let view = reg.view(&w);
            (
                view.junction_named(piece, "n").unwrap(),
                view.junction_named(piece, "e").unwrap(),
            )
        };
        reg.switch_junction(&mut w, piece, &from, &to).unwrap();
        assert_eq!(w.get(Cell::ORIGIN), Block::rails(RailShape::NorthEast));
    }

    #[test]
    fn powered_rail_refuses_curve() {
        let reg = RailTypeRegistry::default();
        let mut w = SparseWorld::default();
        w.set(
            Cell::ORIGIN,
            Block::Rails {
                kind: RailKind::Powered { powered: true },
                shape: RailShape::EastWest,
            },
        );
        let piece = reg.view(&w).piece_at(Cell::ORIGIN);
        assert_eq!(piece.rail_type, RailType::Boost);
        let err = reg
            .switch_junction(
                &mut w,
                piece,
                &RailJunction::toward(Direction::East),
                &RailJunction::toward(Direction::North),
            )
            .unwrap_err();
        assert!(matches!(err, JunctionError::Unsupported { .. }));
        // Straight switch is fine.
        reg.switch_junction(
            &mut w,
            piece,
            &RailJunction::toward(Direction::East),
            &RailJunction::toward(Direction::West),
        )
        .unwrap();
    }

    #[test]
    fn slopes_have_no_junctions() {
        let reg = RailTypeRegistry::default();
        let w = world_with(Cell::ORIGIN, RailShape::AscendingSouth);
        let view = reg.view(&w);
        let piece = view.piece_at(Cell::ORIGIN);
        assert!(view.junctions(piece).is_empty());
        assert!(matches!(
            view.junction_named(piece, "n"),
            Err(JunctionError::NotSwitchable { .. })
        ));
    }

    // ── Compliance ────────────────────────────────────────────────

    #[test]
    fn compliance_every_shape() {
        let reg = RailTypeRegistry::default();
        for shape in RailShape::ALL {
            let w = world_with(Cell::new(4, 10, -3), shape);
            compliance::run_full_compliance(reg.view(&w), Cell::new(4, 10, -3));
        }
    }
}
