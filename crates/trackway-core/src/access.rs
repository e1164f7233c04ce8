//! World access traits consumed by every track component.

use crate::block::Block;
use crate::cell::Cell;

/// Read access to the voxel world.
///
/// Implementations must be side-effect-free: rail classification and track
/// iteration call [`block`](BlockAccess::block) freely and repeatedly, and
/// assume that two calls with no intervening write return the same block.
///
/// # Object safety
///
/// This trait is object-safe; track components take `&dyn BlockAccess`.
pub trait BlockAccess {
    /// The block at `cell`. Unloaded or out-of-world cells report
    /// [`Block::Air`].
    fn block(&self, cell: Cell) -> Block;

    /// Whether the chunk holding `cell` is currently loaded.
    ///
    /// Worlds without a loading model report every cell as loaded.
    fn is_loaded(&self, cell: Cell) -> bool {
        let _ = cell;
        true
    }
}

/// Write access to the voxel world.
///
/// Only junction switching writes blocks.
pub trait BlockAccessMut: BlockAccess {
    /// Replace the block at `cell`.
    fn set_block(&mut self, cell: Cell, block: Block);
}
