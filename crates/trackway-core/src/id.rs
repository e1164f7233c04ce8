//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Counter for unique [`CustomRailId`] allocation.
static CUSTOM_RAIL_COUNTER: AtomicU32 = AtomicU32::new(1);

/// Identifies a rail type contributed by an extension.
///
/// Allocated from a monotonic atomic counter via [`CustomRailId::next`], so
/// two extensions can never collide even if they register in different
/// orders across runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomRailId(u32);

impl CustomRailId {
    /// Allocate a fresh, unique id. Thread-safe.
    pub fn next() -> Self {
        Self(CUSTOM_RAIL_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CustomRailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "custom#{}", self.0)
    }
}

/// Identifies a body (a cart) tracked by an occupancy index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OccupantId(pub u64);

impl fmt::Display for OccupantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OccupantId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
