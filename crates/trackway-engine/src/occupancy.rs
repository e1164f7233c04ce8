//! The occupancy index consumed by the switcher.

use trackway_core::OccupantId;
use trackway_rails::{RailPiece, RailState};

/// Which bodies are on which rail piece.
///
/// # Contract
///
/// - `occupants` reflects the authoritative simulation state at call time
///   and lists each body at most once.
/// - `rail_state` of a listed occupant returns its current state on the
///   queried piece.
/// - `set_rail_state` replaces the body's authoritative position; the
///   switcher calls it once per relocated occupant, after the world has
///   been rewritten.
///
/// # Object safety
///
/// This trait is object-safe.
pub trait RailOccupancy {
    /// Bodies currently on `piece`.
    fn occupants(&self, piece: RailPiece) -> Vec<OccupantId>;

    /// The state of body `id`, if it is tracked.
    fn rail_state(&self, id: OccupantId) -> Option<RailState>;

    /// Move body `id` to `state`.
    fn set_rail_state(&mut self, id: OccupantId, state: RailState);
}
