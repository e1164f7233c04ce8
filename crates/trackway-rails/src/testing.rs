//! A minimal in-memory world for unit tests.

use std::collections::HashMap;
use trackway_core::{Block, BlockAccess, BlockAccessMut, Cell};

#[derive(Default)]
pub struct SparseWorld {
    blocks: HashMap<Cell, Block>,
}

impl SparseWorld {
    pub fn set(&mut self, cell: Cell, block: Block) {
        self.blocks.insert(cell, block);
    }

    pub fn get(&self, cell: Cell) -> Block {
        self.blocks.get(&cell).copied().unwrap_or_default()
    }
}

impl BlockAccess for SparseWorld {
    fn block(&self, cell: Cell) -> Block {
        self.get(cell)
    }
}

impl BlockAccessMut for SparseWorld {
    fn set_block(&mut self, cell: Cell, block: Block) {
        self.set(cell, block);
    }
}
