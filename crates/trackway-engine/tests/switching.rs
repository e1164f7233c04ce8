//! Integration test: junction switches under occupied track.
//!
//! Occupants straddling a switched piece must keep their distance from the
//! end they entered by, or be clamped to the end of a shorter new branch.

use glam::DVec3;
use proptest::prelude::*;
use std::f64::consts::FRAC_1_SQRT_2;
use trackway_core::{Block, BlockAccess, Cell, Direction, OccupantId, RailKind, RailShape};
use trackway_engine::{JunctionSwitcher, PhysicsSignal, RailOccupancy, SwitchError, PHYSICS_SIGNAL};
use trackway_rails::{
    JunctionError, PathPosition, RailJunction, RailPiece, RailState, RailType, RailTypeRegistry,
    Y_POS_OFFSET,
};
use trackway_test_utils::{FakeOccupancy, ForkRail, GridWorld};

const EPS: f64 = 1e-9;

fn west_edge() -> DVec3 {
    DVec3::new(0.0, Y_POS_OFFSET, 0.5)
}

fn junction(d: Direction) -> RailJunction {
    RailJunction::toward(d)
}

/// A regular east-west rail at the origin with one occupant `d` in from
/// the west edge, heading east.
fn occupied_straight(d: f64) -> (GridWorld, RailPiece, FakeOccupancy) {
    let mut w = GridWorld::new();
    w.set(Cell::ORIGIN, Block::rails(RailShape::EastWest));
    let piece = RailPiece::new(RailType::Regular, Cell::ORIGIN);
    let mut occ = FakeOccupancy::new();
    occ.insert(
        1,
        RailState::new(piece, PathPosition::new(west_edge() + DVec3::X * d, DVec3::X)),
    );
    (w, piece, occ)
}

// ── Distance preservation ───────────────────────────────────

#[test]
fn straight_to_curve_keeps_distance() {
    let signal = PhysicsSignal::new();
    let switcher = JunctionSwitcher::with_signal(&signal);
    let reg = RailTypeRegistry::default();
    let (mut w, piece, mut occ) = occupied_straight(0.3);

    let report = switcher
        .switch(&mut w, &reg, &mut occ, piece, &junction(Direction::West), &junction(Direction::South))
        .unwrap();

    assert_eq!(w.block(Cell::ORIGIN), Block::rails(RailShape::SouthWest));
    assert_eq!(report.relocations.len(), 1);
    let r = report.relocations[0];
    assert!((r.measured - 0.3).abs() < EPS);
    assert!((r.replayed - 0.3).abs() < EPS);
    assert!(!r.clamped);

    let state = occ.get(1).unwrap();
    assert_eq!(state, r.state);
    assert!((state.position.position.distance(west_edge()) - 0.3).abs() < EPS);
    // Still heading away from the entry edge, now along the curve.
    assert!(state.position.motion.x > 0.0 && state.position.motion.z > 0.0);
}

#[test]
fn fork_switch_to_longer_branch_keeps_distance() {
    let fork_rail = ForkRail::new(900, 3.0, 5.0);
    let mut reg = RailTypeRegistry::default();
    let fork = reg.register_custom(Box::new(fork_rail.clone()), true);
    let mut w = GridWorld::new();
    w.set(Cell::ORIGIN, fork_rail.block(false));
    let piece = RailPiece::new(fork, Cell::ORIGIN);
    let entry = ForkRail::entry_point(Cell::ORIGIN);

    let mut occ = FakeOccupancy::new();
    occ.insert(7, RailState::new(piece, PathPosition::new(entry + DVec3::X * 2.5, DVec3::X)));

    let signal = PhysicsSignal::new();
    let switcher = JunctionSwitcher::with_signal(&signal);
    let report = switcher
        .switch(
            &mut w,
            &reg,
            &mut occ,
            piece,
            &ForkRail::junction(ForkRail::ENTRY),
            &ForkRail::junction(ForkRail::BRANCH_B),
        )
        .unwrap();

    assert_eq!(report.clamped_count(), 0);
    let state = occ.get(7).unwrap();
    let expected = entry + DVec3::new(1.0, 0.0, -1.0).normalize() * 2.5;
    assert!(state.position.position.distance(expected) < EPS);
}

// ── Clamping ────────────────────────────────────────────────

#[test]
fn fork_switch_to_shorter_branch_clamps() {
    let _ = env_logger::builder().is_test(true).try_init();
    let fork_rail = ForkRail::new(901, 5.0, 3.0);
    let mut reg = RailTypeRegistry::default();
    let fork = reg.register_custom(Box::new(fork_rail.clone()), true);
    let mut w = GridWorld::new();
    w.set(Cell::ORIGIN, fork_rail.block(false));
    let piece = RailPiece::new(fork, Cell::ORIGIN);
    let entry = ForkRail::entry_point(Cell::ORIGIN);

    let mut occ = FakeOccupancy::new();
    occ.insert(1, RailState::new(piece, PathPosition::new(entry + DVec3::X * 4.0, DVec3::X)));

    let signal = PhysicsSignal::new();
    let switcher = JunctionSwitcher::with_signal(&signal);
    let report = switcher
        .switch(
            &mut w,
            &reg,
            &mut occ,
            piece,
            &ForkRail::junction(ForkRail::ENTRY),
            &ForkRail::junction(ForkRail::BRANCH_B),
        )
        .unwrap();

    let r = report.relocations[0];
    assert!(r.clamped);
    assert!((r.measured - 4.0).abs() < EPS);
    assert!((r.replayed - 3.0).abs() < EPS);
    let end = entry + DVec3::new(1.0, 0.0, -1.0).normalize() * 3.0;
    assert!(occ.get(1).unwrap().position.position.distance(end) < EPS);
}

proptest! {
    #[test]
    fn curve_replay_clamps_only_past_its_length(d in 0.0f64..1.0) {
        let signal = PhysicsSignal::new();
        let switcher = JunctionSwitcher::with_signal(&signal);
        let reg = RailTypeRegistry::default();
        let (mut w, piece, mut occ) = occupied_straight(d);
        let report = switcher
            .switch(&mut w, &reg, &mut occ, piece, &junction(Direction::West), &junction(Direction::South))
            .unwrap();
        let r = report.relocations[0];
        prop_assert!((r.measured - d).abs() < EPS);
        if d <= FRAC_1_SQRT_2 - EPS {
            prop_assert!(!r.clamped);
            prop_assert!((r.replayed - d).abs() < EPS);
        } else if d > FRAC_1_SQRT_2 + EPS {
            prop_assert!(r.clamped);
            prop_assert!((r.replayed - FRAC_1_SQRT_2).abs() < EPS);
        }
    }
}

// ── Signal and scope ────────────────────────────────────────

#[test]
fn every_switch_raises_the_signal() {
    let signal = PhysicsSignal::new();
    let switcher = JunctionSwitcher::with_signal(&signal);
    let reg = RailTypeRegistry::default();
    let (mut w, piece, mut occ) = occupied_straight(0.5);
    let mut seen = signal.generation();
    switcher
        .switch(&mut w, &reg, &mut occ, piece, &junction(Direction::West), &junction(Direction::North))
        .unwrap();
    assert!(signal.take_since(&mut seen));
    switcher
        .switch(&mut w, &reg, &mut occ, piece, &junction(Direction::West), &junction(Direction::East))
        .unwrap();
    assert!(signal.take_since(&mut seen));
    assert_eq!(seen, 2);
}

#[test]
fn default_switcher_raises_process_signal() {
    let before = PHYSICS_SIGNAL.generation();
    let reg = RailTypeRegistry::default();
    let (mut w, piece, mut occ) = occupied_straight(0.5);
    JunctionSwitcher::new()
        .switch(&mut w, &reg, &mut occ, piece, &junction(Direction::West), &junction(Direction::South))
        .unwrap();
    assert!(PHYSICS_SIGNAL.generation() > before);
}

#[test]
fn occupants_of_other_pieces_are_untouched() {
    let reg = RailTypeRegistry::default();
    let (mut w, piece, mut occ) = occupied_straight(0.2);
    let elsewhere = RailPiece::new(RailType::Regular, Cell::new(5, 0, 0));
    let far = RailState::new(elsewhere, PathPosition::new(DVec3::new(5.5, 0.0, 0.5), DVec3::X));
    occ.insert(2, far);
    let signal = PhysicsSignal::new();
    let switcher = JunctionSwitcher::with_signal(&signal);
    switcher
        .switch(&mut w, &reg, &mut occ, piece, &junction(Direction::West), &junction(Direction::South))
        .unwrap();
    assert_eq!(occ.updates(), &[OccupantId(1)]);
    assert_eq!(occ.get(2), Some(far));
}

#[test]
fn refused_curve_leaves_occupants_in_place() {
    let reg = RailTypeRegistry::default();
    let mut w = GridWorld::new();
    let boost = Block::Rails {
        kind: RailKind::Powered { powered: true },
        shape: RailShape::EastWest,
    };
    w.set(Cell::ORIGIN, boost);
    let piece = RailPiece::new(RailType::Boost, Cell::ORIGIN);
    let mut occ = FakeOccupancy::new();
    occ.insert(1, RailState::new(piece, PathPosition::new(west_edge(), DVec3::X)));

    let signal = PhysicsSignal::new();
    let switcher = JunctionSwitcher::with_signal(&signal);
    let result = switcher.switch(
        &mut w,
        &reg,
        &mut occ,
        piece,
        &junction(Direction::West),
        &junction(Direction::South),
    );
    assert!(matches!(
        result,
        Err(SwitchError::Junction(JunctionError::Unsupported { .. }))
    ));
    assert_eq!(w.block(Cell::ORIGIN), boost);
    assert!(occ.updates().is_empty());
}

// ── Re-entrancy ─────────────────────────────────────────────

/// Occupancy that tries to switch the same piece again while being
/// updated.
struct Reentrant<'a> {
    inner: FakeOccupancy,
    switcher: &'a JunctionSwitcher<'a>,
    registry: &'a RailTypeRegistry,
}

impl RailOccupancy for Reentrant<'_> {
    fn occupants(&self, piece: RailPiece) -> Vec<OccupantId> {
        self.inner.occupants(piece)
    }

    fn rail_state(&self, id: OccupantId) -> Option<RailState> {
        self.inner.rail_state(id)
    }

    fn set_rail_state(&mut self, id: OccupantId, state: RailState) {
        let mut scratch = GridWorld::new();
        let _ = self.switcher.switch(
            &mut scratch,
            self.registry,
            &mut FakeOccupancy::new(),
            state.piece,
            &junction(Direction::West),
            &junction(Direction::East),
        );
        self.inner.set_rail_state(id, state);
    }
}

#[test]
#[should_panic(expected = "re-entrant junction switch")]
fn nested_switch_of_same_piece_panics() {
    let signal = PhysicsSignal::new();
    let switcher = JunctionSwitcher::with_signal(&signal);
    let reg = RailTypeRegistry::default();
    let (mut w, piece, occ) = occupied_straight(0.4);
    let mut reentrant = Reentrant {
        inner: occ,
        switcher: &switcher,
        registry: &reg,
    };
    let _ = switcher.switch(
        &mut w,
        &reg,
        &mut reentrant,
        piece,
        &junction(Direction::West),
        &junction(Direction::South),
    );
}

/// Occupancy that builds its own switcher and switches the piece being
/// updated, as a sign handler reacting to the move might.
struct SecondSwitcher {
    inner: FakeOccupancy,
    registry: RailTypeRegistry,
    signal: PhysicsSignal,
}

impl RailOccupancy for SecondSwitcher {
    fn occupants(&self, piece: RailPiece) -> Vec<OccupantId> {
        self.inner.occupants(piece)
    }

    fn rail_state(&self, id: OccupantId) -> Option<RailState> {
        self.inner.rail_state(id)
    }

    fn set_rail_state(&mut self, id: OccupantId, state: RailState) {
        let (mut scratch, _, _) = occupied_straight(0.0);
        let _ = JunctionSwitcher::with_signal(&self.signal).switch(
            &mut scratch,
            &self.registry,
            &mut FakeOccupancy::new(),
            state.piece,
            &junction(Direction::West),
            &junction(Direction::East),
        );
        self.inner.set_rail_state(id, state);
    }
}

#[test]
#[should_panic(expected = "re-entrant junction switch")]
fn nested_switch_through_another_switcher_panics() {
    let signal = PhysicsSignal::new();
    let switcher = JunctionSwitcher::with_signal(&signal);
    let reg = RailTypeRegistry::default();
    let (mut w, piece, occ) = occupied_straight(0.4);
    let mut second = SecondSwitcher {
        inner: occ,
        registry: RailTypeRegistry::default(),
        signal: PhysicsSignal::new(),
    };
    let _ = switcher.switch(
        &mut w,
        &reg,
        &mut second,
        piece,
        &junction(Direction::West),
        &junction(Direction::South),
    );
}

#[test]
fn guard_is_released_after_a_switch() {
    let signal = PhysicsSignal::new();
    let first = JunctionSwitcher::with_signal(&signal);
    let second = JunctionSwitcher::with_signal(&signal);
    let reg = RailTypeRegistry::default();
    let (mut w, piece, mut occ) = occupied_straight(0.4);
    first
        .switch(&mut w, &reg, &mut occ, piece, &junction(Direction::West), &junction(Direction::South))
        .unwrap();
    assert!(!second.is_switching(piece));
    second
        .switch(&mut w, &reg, &mut occ, piece, &junction(Direction::South), &junction(Direction::East))
        .unwrap();
    assert_eq!(w.block(Cell::ORIGIN), Block::rails(RailShape::SouthEast));
}
