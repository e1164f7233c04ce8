//! Walking trains along a Trackway rail network.
//!
//! The network is never materialised as a graph. Every step asks the rail
//! registry what lies at the next cell, so the walkers always see the
//! world's current block state.
//!
//! - [`TrackMovingPoint`] is the bare cursor: current piece, heading, and a
//!   lazily computed next piece.
//! - [`TrackIterator`] steps piece by piece with cycle detection, distance
//!   accounting and reachability queries ([`TrackIterator::try_find`],
//!   [`TrackIterator::is_connected`]).
//! - [`TrackWalkingPoint`] moves a fractional position by exact distances,
//!   for spawn placement, platform measurement and cart spacing.
//!
//! [`TrackConfig`] carries the tunables shared by the iterators.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod iterator;
pub mod moving_point;
pub mod walker;

pub use config::{ConfigError, TrackConfig};
pub use iterator::TrackIterator;
pub use moving_point::{TrackMovingPoint, TrackStep};
pub use walker::{Placement, TrackWalkingPoint};
