//! Junction switching for Trackway.
//!
//! Flipping a junction rewrites a rail block while carts may be sitting on
//! it. [`JunctionSwitcher`] measures every occupant's distance from the end
//! it entered by, commits the switch, and replays that distance along the
//! new path so a cart straddling the switch continues from the equivalent
//! point on the new branch.
//!
//! The switcher consumes a [`RailOccupancy`] index and raises a
//! [`PhysicsSignal`] so dependent caches can rebuild.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod occupancy;
pub mod signal;
pub mod switcher;

pub use error::SwitchError;
pub use occupancy::RailOccupancy;
pub use signal::{PhysicsSignal, PHYSICS_SIGNAL};
pub use switcher::{JunctionSwitcher, Relocation, SwitchReport};
