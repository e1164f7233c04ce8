use std::collections::BTreeMap;

use trackway_core::OccupantId;
use trackway_engine::RailOccupancy;
use trackway_rails::{RailPiece, RailState};

/// In-memory [`RailOccupancy`] keyed by occupant id.
///
/// Occupants of a piece are reported in id order. Every
/// [`set_rail_state`](RailOccupancy::set_rail_state) call is recorded for
/// inspection.
#[derive(Debug, Default)]
pub struct FakeOccupancy {
    states: BTreeMap<OccupantId, RailState>,
    updates: Vec<OccupantId>,
}

impl FakeOccupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an occupant on the track.
    pub fn insert(&mut self, id: impl Into<OccupantId>, state: RailState) {
        self.states.insert(id.into(), state);
    }

    pub fn get(&self, id: impl Into<OccupantId>) -> Option<RailState> {
        self.states.get(&id.into()).copied()
    }

    /// Occupants updated by the code under test, in call order.
    pub fn updates(&self) -> &[OccupantId] {
        &self.updates
    }
}

impl RailOccupancy for FakeOccupancy {
    fn occupants(&self, piece: RailPiece) -> Vec<OccupantId> {
        self.states
            .iter()
            .filter(|(_, s)| s.piece == piece)
            .map(|(id, _)| *id)
            .collect()
    }

    fn rail_state(&self, id: OccupantId) -> Option<RailState> {
        self.states.get(&id).copied()
    }

    fn set_rail_state(&mut self, id: OccupantId, state: RailState) {
        self.updates.push(id);
        self.states.insert(id, state);
    }
}
