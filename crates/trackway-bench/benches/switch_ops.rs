//! Criterion micro-benchmarks for junction switching under load.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use glam::DVec3;
use trackway_core::{Block, Cell, Direction, RailShape};
use trackway_engine::{JunctionSwitcher, PhysicsSignal};
use trackway_rails::{PathPosition, RailJunction, RailPiece, RailState, RailType, RailTypeRegistry};
use trackway_test_utils::{FakeOccupancy, GridWorld};

/// Occupancy with `n` bodies spread along an east-west rail at the origin.
fn crowded(n: u64) -> FakeOccupancy {
    let piece = RailPiece::new(RailType::Regular, Cell::ORIGIN);
    let mut occ = FakeOccupancy::new();
    for i in 0..n {
        let x = (i as f64 + 0.5) / n as f64;
        occ.insert(
            i,
            RailState::new(piece, PathPosition::new(DVec3::new(x, 0.0625, 0.5), DVec3::X)),
        );
    }
    occ
}

/// Benchmark: flip a straight to a curve and back with 16 occupants.
fn bench_switch_16_occupants(c: &mut Criterion) {
    let reg = RailTypeRegistry::default();
    let signal = PhysicsSignal::new();
    let switcher = JunctionSwitcher::with_signal(&signal);
    let piece = RailPiece::new(RailType::Regular, Cell::ORIGIN);
    let west = RailJunction::toward(Direction::West);
    let south = RailJunction::toward(Direction::South);
    let east = RailJunction::toward(Direction::East);

    c.bench_function("switch_16_occupants", |b| {
        b.iter(|| {
            let mut world = GridWorld::new();
            world.set(Cell::ORIGIN, Block::rails(RailShape::EastWest));
            let mut occ = crowded(16);
            let to_curve = switcher.switch(&mut world, &reg, &mut occ, piece, &west, &south);
            let back = switcher.switch(&mut world, &reg, &mut occ, piece, &west, &east);
            black_box((to_curve.is_ok(), back.is_ok()));
        });
    });
}

criterion_group!(benches, bench_switch_16_occupants);
criterion_main!(benches);
