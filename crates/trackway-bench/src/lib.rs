//! Benchmark layouts for the Trackway rail network.
//!
//! - [`line_profile`]: one long straight run
//! - [`serpentine_profile`]: a run that turns every few pieces
//! - [`hill_profile`]: alternating climbs and flats

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use trackway_core::{Cell, Direction};
use trackway_test_utils::GridWorld;

/// `len` straight rails east from the origin.
pub fn line_profile(len: i32) -> GridWorld {
    let mut w = GridWorld::new();
    w.straight(Cell::ORIGIN, Direction::East, len);
    w
}

/// A zig-zag east from the origin: `legs` runs of `leg` straights, turning
/// south and back east between them.
pub fn serpentine_profile(legs: i32, leg: i32) -> GridWorld {
    let mut w = GridWorld::new();
    let mut at = Cell::ORIGIN;
    for _ in 0..legs {
        at = w.straight(at, Direction::East, leg).offset(Direction::East);
        w.curve(at, Direction::West, Direction::South);
        at = at.offset(Direction::South);
        w.curve(at, Direction::North, Direction::East);
        at = at.offset(Direction::East);
    }
    w
}

/// `rises` slopes eastward from the origin, each followed by `flat`
/// straights.
pub fn hill_profile(rises: i32, flat: i32) -> GridWorld {
    let mut w = GridWorld::new();
    let mut at = Cell::ORIGIN;
    for _ in 0..rises {
        let top = w.slope(at, Direction::East);
        at = w.straight(top, Direction::East, flat).offset(Direction::East);
    }
    w
}

/// The far end of [`line_profile`].
pub fn line_end(len: i32) -> Cell {
    Cell::new(len - 1, 0, 0)
}
