//! The physics recalculation signal.

use std::sync::atomic::{AtomicU64, Ordering};

/// Generation counter raised whenever track connectivity changes under
/// moving bodies.
///
/// Consumers remember the last generation they saw and rebuild their
/// cached rail state when [`take_since`](Self::take_since) reports a
/// change. The counter only grows.
#[derive(Debug, Default)]
pub struct PhysicsSignal {
    generation: AtomicU64,
}

// Compile-time assertion: PhysicsSignal must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<PhysicsSignal>();
};

/// The process-wide signal used by [`JunctionSwitcher::new`].
///
/// [`JunctionSwitcher::new`]: crate::JunctionSwitcher::new
pub static PHYSICS_SIGNAL: PhysicsSignal = PhysicsSignal::new();

impl PhysicsSignal {
    /// A signal at generation 0.
    pub const fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
        }
    }

    /// Request a recalculation. Returns the new generation.
    pub fn raise(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::Release) + 1
    }

    /// The current generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Whether the signal was raised since generation `seen`, updating
    /// `seen` to the current generation.
    pub fn take_since(&self, seen: &mut u64) -> bool {
        let current = self.generation();
        let raised = current != *seen;
        *seen = current;
        raised
    }
}
