//! Test utilities and fake collaborators for Trackway development.
//!
//! Provides an in-memory [`GridWorld`] with track layout helpers, a
//! [`FakeOccupancy`] index for the junction switcher, and [`ForkRail`], an
//! extension rail type whose two branches have configurable lengths.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod fork;
mod layout;
mod occupancy;

pub use fork::ForkRail;
pub use occupancy::FakeOccupancy;

use std::collections::HashMap;

use trackway_core::{Block, BlockAccess, BlockAccessMut, Cell};

/// A sparse block world backed by a `HashMap<Cell, Block>`.
///
/// Unset cells are air. Every cell is loaded until a predicate is installed
/// with [`load_only`](GridWorld::load_only).
#[derive(Default)]
pub struct GridWorld {
    blocks: HashMap<Cell, Block>,
    loaded: Option<Box<dyn Fn(Cell) -> bool>>,
    writes: usize,
}

impl GridWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a block. Placing air removes the entry.
    pub fn set(&mut self, cell: Cell, block: Block) {
        if block.is_air() {
            self.blocks.remove(&cell);
        } else {
            self.blocks.insert(cell, block);
        }
    }

    pub fn get(&self, cell: Cell) -> Block {
        self.blocks.get(&cell).copied().unwrap_or_default()
    }

    /// Restrict the loaded region to cells accepted by `pred`.
    pub fn load_only(&mut self, pred: impl Fn(Cell) -> bool + 'static) {
        self.loaded = Some(Box::new(pred));
    }

    /// Number of non-air cells.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of writes made through [`BlockAccessMut`].
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl BlockAccess for GridWorld {
    fn block(&self, cell: Cell) -> Block {
        self.get(cell)
    }

    fn is_loaded(&self, cell: Cell) -> bool {
        self.loaded.as_ref().is_none_or(|pred| pred(cell))
    }
}

impl BlockAccessMut for GridWorld {
    fn set_block(&mut self, cell: Cell, block: Block) {
        self.writes += 1;
        self.set(cell, block);
    }
}
