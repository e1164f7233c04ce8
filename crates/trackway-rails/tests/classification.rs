//! Integration test: classification over a mixed layout.
//!
//! Every built-in block kind is placed once; each cell must classify to
//! exactly one type, repeatably, and extension types must slot into the
//! order where they are registered.

use std::collections::HashMap;

use trackway_core::{Block, BlockAccess, Cell, Direction, RailKind, RailShape};
use trackway_rails::{
    Directions, LogicKind, RailBehavior, RailPath, RailType, RailTypeRegistry, RailView,
};

struct World(HashMap<Cell, Block>);

impl BlockAccess for World {
    fn block(&self, cell: Cell) -> Block {
        self.0.get(&cell).copied().unwrap_or_default()
    }
}

fn mixed_world() -> World {
    let entries = [
        (Cell::new(0, 0, 0), Block::rails(RailShape::EastWest)),
        (
            Cell::new(1, 0, 0),
            Block::Rails {
                kind: RailKind::Powered { powered: true },
                shape: RailShape::EastWest,
            },
        ),
        (
            Cell::new(2, 0, 0),
            Block::Rails {
                kind: RailKind::Powered { powered: false },
                shape: RailShape::EastWest,
            },
        ),
        (
            Cell::new(3, 0, 0),
            Block::Rails {
                kind: RailKind::Detector,
                shape: RailShape::EastWest,
            },
        ),
        (
            Cell::new(4, 0, 0),
            Block::Rails {
                kind: RailKind::Activator { powered: true },
                shape: RailShape::EastWest,
            },
        ),
        (
            Cell::new(5, 0, 0),
            Block::Rails {
                kind: RailKind::Activator { powered: false },
                shape: RailShape::EastWest,
            },
        ),
        (Cell::new(6, 0, 0), Block::PressurePlate),
        (
            Cell::new(7, 0, 0),
            Block::Ladder {
                wall: Direction::South,
            },
        ),
        (Cell::new(8, 0, 0), Block::Solid),
        (Cell::new(9, 0, 0), Block::Sign),
        (Cell::new(10, 0, 0), Block::Custom { id: 42, data: 0 }),
    ];
    World(entries.into_iter().collect())
}

#[test]
fn each_block_kind_has_one_type() {
    let reg = RailTypeRegistry::default();
    let world = mixed_world();
    let expected = [
        RailType::Regular,
        RailType::Boost,
        RailType::Brake,
        RailType::Detector,
        RailType::ActivatorOn,
        RailType::ActivatorOff,
        RailType::Crossing,
        RailType::Vertical,
        RailType::None,
        RailType::None,
        RailType::None,
    ];
    for (x, want) in expected.into_iter().enumerate() {
        let cell = Cell::new(x as i32, 0, 0);
        assert_eq!(reg.classify(&world, cell), want, "at {cell}");
        assert_eq!(reg.classify(&world, cell), want, "repeat at {cell}");
    }
}

/// Claims custom block id 42 as a north-south straight.
struct Beam;

impl RailBehavior for Beam {
    fn name(&self) -> &str {
        "beam"
    }

    fn is_rail(&self, view: RailView<'_>, cell: Cell) -> bool {
        matches!(view.block(cell), Block::Custom { id: 42, .. })
    }

    fn possible_directions(&self, _view: RailView<'_>, _rail: Cell) -> Directions {
        Directions::from_slice(&[Direction::North, Direction::South])
    }

    fn next_cell(&self, _view: RailView<'_>, rail: Cell, direction: Direction) -> Option<Cell> {
        Some(rail.offset(direction))
    }

    fn logic(&self, _view: RailView<'_>, _rail: Cell) -> LogicKind {
        LogicKind::Custom { tag: 42 }
    }

    fn path(&self, _view: RailView<'_>, rail: Cell, _heading: Direction) -> RailPath {
        let c = rail.center();
        RailPath::from_points([c - glam::DVec3::Z * 0.5, c + glam::DVec3::Z * 0.5])
    }
}

#[test]
fn extension_type_classifies_its_blocks() {
    let mut reg = RailTypeRegistry::default();
    let world = mixed_world();
    let beam = reg.register_custom(Box::new(Beam), false);
    assert_eq!(reg.classify(&world, Cell::new(10, 0, 0)), beam);
    // Built-in blocks are unaffected.
    assert_eq!(reg.classify(&world, Cell::new(0, 0, 0)), RailType::Regular);

    let view = reg.view(&world);
    let piece = view.piece_at(Cell::new(10, 0, 0));
    assert_eq!(view.logic(piece).kind, LogicKind::Custom { tag: 42 });
    assert!((view.path(piece, Direction::North).total_distance() - 1.0).abs() < 1e-12);

    assert!(reg.unregister(beam));
    assert_eq!(reg.classify(&world, Cell::new(10, 0, 0)), RailType::None);
}

#[test]
fn removing_a_builtin_falls_through() {
    let mut reg = RailTypeRegistry::default();
    let world = mixed_world();
    reg.unregister(RailType::Crossing);
    assert_eq!(reg.classify(&world, Cell::new(6, 0, 0)), RailType::None);
    reg.register(RailType::Crossing, false).unwrap();
    assert_eq!(reg.classify(&world, Cell::new(6, 0, 0)), RailType::Crossing);
}
