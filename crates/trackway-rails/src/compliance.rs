//! Rail behavior compliance test helpers.
//!
//! These functions verify that the rail at a cell satisfies the invariants
//! the track iterators rely on. Reused across the built-in type test
//! modules.

use crate::behavior::RailView;
use trackway_core::{Cell, Direction};

/// Assert that exactly one registered type claims `cell` and that
/// classification is repeatable.
pub fn assert_classification_exclusive(view: RailView<'_>, cell: Cell) {
    let first = view.classify(cell);
    assert_eq!(first, view.classify(cell), "classification of {cell} changed");
    let claiming: Vec<_> = view
        .registry()
        .types()
        .iter()
        .copied()
        .filter(|&t| {
            view.registry()
                .behavior(t)
                .is_some_and(|b| b.is_rail(view, cell))
        })
        .collect();
    assert_eq!(claiming, vec![first], "types claiming {cell}: {claiming:?}");
}

/// Assert that every possible direction leads to a nearby, different cell.
pub fn assert_next_cells_defined(view: RailView<'_>, cell: Cell) {
    let piece = view.piece_at(cell);
    let dirs = view.possible_directions(piece);
    assert!(!dirs.is_empty(), "{piece} has no possible directions");
    for d in dirs.into_iter().filter(|d| *d != Direction::SelfFace) {
        let next = view
            .next_cell(piece, d)
            .unwrap_or_else(|| panic!("{piece} has no next cell heading {d}"));
        assert_ne!(next, cell, "{piece} heading {d} stays put");
        assert!(
            cell.manhattan_distance(next) <= 3,
            "{piece} heading {d} jumps to {next}"
        );
    }
}

/// Assert that the path is non-empty and stays near the rail's cell.
pub fn assert_path_local(view: RailView<'_>, cell: Cell) {
    let piece = view.piece_at(cell);
    for heading in Direction::CARDINALS {
        let path = view.path(piece, heading);
        assert!(!path.is_empty(), "{piece} has an empty path");
        let lo = cell.corner() - glam::DVec3::splat(1e-9);
        let hi = cell.corner() + glam::DVec3::new(1.0, 2.0, 1.0) + glam::DVec3::splat(1e-9);
        for seg in path.segments() {
            for p in [seg.p0, seg.p1] {
                assert!(
                    p.cmpge(lo).all() && p.cmple(hi).all(),
                    "{piece} path point {p} outside its cell"
                );
            }
        }
    }
}

/// Assert that a body at the rail's minecart position finds the rail again.
pub fn assert_minecart_position_finds_rail(view: RailView<'_>, cell: Cell) {
    let piece = view.piece_at(cell);
    let pos = view.minecart_position(piece);
    assert_eq!(view.find_rail(pos), Some(piece), "{piece} not found from {pos}");
}

/// Run every compliance check on the rail at `cell`.
pub fn run_full_compliance(view: RailView<'_>, cell: Cell) {
    assert_classification_exclusive(view, cell);
    assert_next_cells_defined(view, cell);
    assert_path_local(view, cell);
    assert_minecart_position_finds_rail(view, cell);
}
