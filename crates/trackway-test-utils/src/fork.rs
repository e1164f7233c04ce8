//! A two-way fork rail type with configurable branch lengths.

use glam::DVec3;
use trackway_core::{Block, BlockAccessMut, Cell, Direction};
use trackway_rails::{
    Directions, JunctionError, Junctions, LogicKind, RailBehavior, RailJunction, RailPath,
    RailView, Y_POS_OFFSET,
};

/// Extension rail claiming `Block::Custom` blocks with one id.
///
/// Both branches leave the west edge of the cell: branch `"a"` runs east,
/// branch `"b"` north-east. The block's `data` selects the active branch
/// (0 for a, anything else for b). Branch lengths are not limited to the
/// cell so switch scenarios can use round numbers.
#[derive(Clone, Debug, PartialEq)]
pub struct ForkRail {
    block_id: u32,
    branch_a: f64,
    branch_b: f64,
}

impl ForkRail {
    pub const ENTRY: &'static str = "w";
    pub const BRANCH_A: &'static str = "a";
    pub const BRANCH_B: &'static str = "b";

    pub fn new(block_id: u32, branch_a: f64, branch_b: f64) -> Self {
        Self {
            block_id,
            branch_a,
            branch_b,
        }
    }

    /// The fork block with branch a (`false`) or b (`true`) selected.
    pub fn block(&self, branch_b: bool) -> Block {
        Block::Custom {
            id: self.block_id,
            data: u32::from(branch_b),
        }
    }

    /// Where both branches start.
    pub fn entry_point(cell: Cell) -> DVec3 {
        DVec3::new(
            f64::from(cell.x),
            f64::from(cell.y) + Y_POS_OFFSET,
            f64::from(cell.z) + 0.5,
        )
    }

    pub fn junction(name: &str) -> RailJunction {
        let direction = match name {
            Self::BRANCH_A => Direction::East,
            Self::BRANCH_B => Direction::NorthEast,
            _ => Direction::West,
        };
        RailJunction::named(name, direction)
    }

    fn branch_b(&self, view: RailView<'_>, cell: Cell) -> Option<bool> {
        match view.block(cell) {
            Block::Custom { id, data } if id == self.block_id => Some(data != 0),
            _ => None,
        }
    }
}

impl RailBehavior for ForkRail {
    fn name(&self) -> &str {
        "fork"
    }

    fn is_rail(&self, view: RailView<'_>, cell: Cell) -> bool {
        self.branch_b(view, cell).is_some()
    }

    fn possible_directions(&self, _view: RailView<'_>, _rail: Cell) -> Directions {
        Directions::from_slice(&[Direction::West, Direction::East])
    }

    fn next_cell(&self, _view: RailView<'_>, rail: Cell, direction: Direction) -> Option<Cell> {
        match direction {
            Direction::West => Some(rail.offset(Direction::West)),
            _ => Some(rail.offset(Direction::East)),
        }
    }

    fn logic(&self, _view: RailView<'_>, _rail: Cell) -> LogicKind {
        LogicKind::Custom { tag: self.block_id }
    }

    fn path(&self, view: RailView<'_>, rail: Cell, _heading: Direction) -> RailPath {
        let Some(branch_b) = self.branch_b(view, rail) else {
            return RailPath::default();
        };
        let entry = Self::entry_point(rail);
        let exit = if branch_b {
            entry + DVec3::new(1.0, 0.0, -1.0).normalize() * self.branch_b
        } else {
            entry + DVec3::X * self.branch_a
        };
        RailPath::from_points([entry, exit])
    }

    fn junctions(&self, _view: RailView<'_>, _rail: Cell) -> Junctions {
        [Self::ENTRY, Self::BRANCH_A, Self::BRANCH_B]
            .into_iter()
            .map(Self::junction)
            .collect()
    }

    fn switch_junction(
        &self,
        world: &mut dyn BlockAccessMut,
        rail: Cell,
        from: &RailJunction,
        to: &RailJunction,
    ) -> Result<(), JunctionError> {
        let branch_b = match to.name.as_str() {
            Self::BRANCH_A => false,
            Self::BRANCH_B => true,
            _ => {
                return Err(JunctionError::Unsupported {
                    from: from.name.clone(),
                    to: to.name.clone(),
                })
            }
        };
        world.set_block(rail, self.block(branch_b));
        Ok(())
    }
}
