//! Trackway: rail networks embedded in a voxel world.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Trackway sub-crates. There is no stored track graph: every query
//! classifies blocks on demand through a [`rails::RailTypeRegistry`], so
//! results always reflect the current world.
//!
//! # Quick start
//!
//! ```rust
//! use std::collections::HashMap;
//! use trackway::prelude::*;
//!
//! struct World(HashMap<Cell, Block>);
//!
//! impl BlockAccess for World {
//!     fn block(&self, cell: Cell) -> Block {
//!         self.0.get(&cell).copied().unwrap_or_default()
//!     }
//! }
//!
//! // Eleven straight rails running east from the origin.
//! let world = World(
//!     (0..11)
//!         .map(|x| (Cell::new(x, 0, 0), Block::rails(RailShape::EastWest)))
//!         .collect(),
//! );
//! let registry = RailTypeRegistry::default();
//! let view = registry.view(&world);
//!
//! let target = Cell::new(10, 0, 0);
//! let mut finder = TrackIterator::finder(view, Cell::ORIGIN, Direction::East, target);
//! assert!(finder.try_find(target));
//! assert_eq!(finder.distance(), 10);
//!
//! // Three carts, 1.5 apart, starting mid-way along the first rail.
//! let mut walker =
//!     TrackWalkingPoint::new(view, Cell::ORIGIN, Direction::East, &TrackConfig::default());
//! let carts = walker.placement_points(3, 1.5).unwrap();
//! assert_eq!(carts.len(), 3);
//! assert!((carts[2].position.x - 3.5).abs() < 1e-9);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`world`] | `trackway-core` | Cells, directions, blocks, world access traits |
//! | [`rails`] | `trackway-rails` | Rail types, registry, paths, junctions, cell ray |
//! | [`track`] | `trackway-track` | Track iterator and walking point |
//! | [`engine`] | `trackway-engine` | Junction switcher, occupancy, physics signal |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Cells, directions, the block model and world access (`trackway-core`).
pub use trackway_core as world;

/// Rail classification and geometry (`trackway-rails`).
///
/// [`rails::RailTypeRegistry`] classifies cells; [`rails::RailView`] answers
/// connectivity, path and junction queries; [`rails::CellRay`] enumerates
/// the cells a straight segment passes through.
pub use trackway_rails as rails;

/// Walking the network (`trackway-track`).
///
/// [`track::TrackIterator`] steps piece by piece;
/// [`track::TrackWalkingPoint`] moves by exact distances.
pub use trackway_track as track;

/// Junction switching (`trackway-engine`).
pub use trackway_engine as engine;

/// Common imports for typical Trackway usage.
///
/// ```rust
/// use trackway::prelude::*;
/// ```
pub mod prelude {
    // World model
    pub use trackway_core::{
        Block, BlockAccess, BlockAccessMut, Cell, Direction, OccupantId, RailKind, RailShape,
    };

    // Rails
    pub use trackway_rails::{
        PathPosition, RailBehavior, RailJunction, RailPath, RailPiece, RailState, RailType,
        RailTypeRegistry, RailView,
    };

    // Track
    pub use trackway_track::{TrackConfig, TrackIterator, TrackWalkingPoint};

    // Switching
    pub use trackway_engine::{JunctionSwitcher, RailOccupancy, SwitchError};

    // Errors
    pub use trackway_rails::{JunctionError, RegistryError};
    pub use trackway_track::ConfigError;
}
