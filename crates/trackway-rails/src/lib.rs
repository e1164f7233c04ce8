//! Rail classification, connectivity and geometry for Trackway.
//!
//! A [`RailTypeRegistry`] holds the ordered list of [`RailType`]s. Asking it
//! "what rail is at this cell" tests each registered type in order and
//! returns the first match, or [`RailType::None`]. Each type's
//! [`RailBehavior`] then answers the connectivity questions the track
//! iterators need (which ways a body may leave, which cell comes next) and
//! describes the exact centreline a body follows as a [`RailPath`].
//!
//! Switchable pieces expose [`RailJunction`]s; the [`CellRay`] walks the
//! cells a straight segment passes through.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use trackway_core::{Block, BlockAccess, Cell, Direction, RailShape};
//! use trackway_rails::{RailType, RailTypeRegistry};
//!
//! struct World(HashMap<Cell, Block>);
//! impl BlockAccess for World {
//!     fn block(&self, cell: Cell) -> Block {
//!         self.0.get(&cell).copied().unwrap_or_default()
//!     }
//! }
//!
//! let mut blocks = HashMap::new();
//! blocks.insert(Cell::ORIGIN, Block::rails(RailShape::EastWest));
//! let world = World(blocks);
//!
//! let registry = RailTypeRegistry::default();
//! assert_eq!(registry.classify(&world, Cell::ORIGIN), RailType::Regular);
//! assert_eq!(registry.classify(&world, Cell::new(1, 0, 0)), RailType::None);
//!
//! let view = registry.view(&world);
//! let piece = view.piece_at(Cell::ORIGIN);
//! assert_eq!(
//!     view.possible_directions(piece).as_slice(),
//!     &[Direction::East, Direction::West]
//! );
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod behavior;
pub mod crossing;
pub mod error;
pub mod junction;
pub mod logic;
pub mod path;
pub mod rail_type;
pub mod rails_block;
pub mod ray;
pub mod registry;
pub mod transfer;
pub mod vertical;

#[cfg(test)]
pub(crate) mod compliance;
#[cfg(test)]
pub(crate) mod testing;

pub use behavior::{Directions, RailBehavior, RailView};
pub use error::{JunctionError, RegistryError};
pub use junction::{Junctions, RailJunction};
pub use logic::{LogicKind, RailLogic};
pub use path::{PathPosition, RailPath, RailState, Segment, Y_POS_OFFSET};
pub use rail_type::{RailPiece, RailType};
pub use ray::CellRay;
pub use registry::RailTypeRegistry;
pub use transfer::{slope_to_vertical, vertical_to_slope, BodyMotion};
