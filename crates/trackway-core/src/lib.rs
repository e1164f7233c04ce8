//! Core types for the Trackway rail network.
//!
//! This crate defines the vocabulary shared by every other Trackway crate:
//! integer voxel [`Cell`]s, compass and vertical [`Direction`]s, the
//! [`Block`] model the world reports for each cell, and the [`BlockAccess`]
//! traits through which track code reads (and, for junction switching,
//! writes) world state.
//!
//! Nothing in this crate caches world state. Every other component derives
//! its view of the track network from fresh [`BlockAccess`] queries.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod access;
pub mod block;
pub mod cell;
pub mod direction;
pub mod error;
pub mod id;

pub use access::{BlockAccess, BlockAccessMut};
pub use block::{Block, RailKind, RailShape};
pub use cell::Cell;
pub use direction::{vector_pitch, vector_yaw, Direction};
pub use error::ParseDirectionError;
pub use id::{CustomRailId, OccupantId};
