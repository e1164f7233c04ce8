//! The [`RailBehavior`] trait and the [`RailView`] query context.

use crate::error::JunctionError;
use crate::junction::{Junctions, RailJunction};
use crate::logic::{LogicKind, RailLogic};
use crate::path::RailPath;
use crate::rail_type::{RailPiece, RailType};
use crate::registry::RailTypeRegistry;
use smallvec::SmallVec;
use trackway_core::{Block, BlockAccess, BlockAccessMut, Cell, Direction};

/// Directions a body may leave a rail piece by. Inline up to four.
pub type Directions = SmallVec<[Direction; 4]>;

/// Classifier plus connectivity rules for one kind of track.
///
/// Every method receives a [`RailView`], so a behavior can consult both the
/// world and the other registered types (a ladder needs to know whether the
/// block beside its top is track of any kind).
///
/// # Contract
///
/// - `is_rail` must be a pure function of world state.
/// - `next_cell` is the raw geometric step. It does not check that a rail
///   exists at the returned cell; the caller re-classifies.
/// - `path` must return points in world coordinates, ordered so that the
///   first and last points lie on the faces the piece connects.
///
/// # Object safety
///
/// This trait is object-safe; the registry stores extension behaviors as
/// `Box<dyn RailBehavior>`.
pub trait RailBehavior: Send + Sync {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Whether the block at `cell` is track of this type.
    fn is_rail(&self, view: RailView<'_>, cell: Cell) -> bool;

    /// The rail block a body occupying `pos` rides on, if it is of this
    /// type.
    ///
    /// The default accepts `pos` itself or the cell below it, which covers
    /// bodies whose position has drifted above a flat or sloped rail.
    fn find_rail(&self, view: RailView<'_>, pos: Cell) -> Option<Cell> {
        if self.is_rail(view, pos) {
            return Some(pos);
        }
        let below = pos.down();
        self.is_rail(view, below).then_some(below)
    }

    /// The cell a body on the rail at `rail` is considered to occupy.
    fn find_minecart_position(&self, view: RailView<'_>, rail: Cell) -> Cell {
        let _ = view;
        rail
    }

    /// Directions a body may leave the rail at `rail` by.
    fn possible_directions(&self, view: RailView<'_>, rail: Cell) -> Directions;

    /// The cell reached by leaving `rail` while heading `direction`.
    fn next_cell(&self, view: RailView<'_>, rail: Cell, direction: Direction) -> Option<Cell>;

    /// The movement rule of the rail at `rail`.
    fn logic(&self, view: RailView<'_>, rail: Cell) -> LogicKind;

    /// The centreline of the rail at `rail` for a body heading roughly
    /// `heading`.
    fn path(&self, view: RailView<'_>, rail: Cell, heading: Direction) -> RailPath;

    /// Alternate connectivity choices of the rail at `rail`. Most rails
    /// have none.
    fn junctions(&self, view: RailView<'_>, rail: Cell) -> Junctions {
        let _ = (view, rail);
        Junctions::new()
    }

    /// Rewrite the world so the rail at `rail` joins `from` to `to`.
    fn switch_junction(
        &self,
        world: &mut dyn BlockAccessMut,
        rail: Cell,
        from: &RailJunction,
        to: &RailJunction,
    ) -> Result<(), JunctionError> {
        let _ = (world, rail);
        Err(JunctionError::Unsupported {
            from: from.name.clone(),
            to: to.name.clone(),
        })
    }
}

/// A world paired with the registry that interprets it.
///
/// All rail queries go through a view. It is `Copy` and holds only shared
/// borrows; build one per query or per iteration.
#[derive(Clone, Copy)]
pub struct RailView<'a> {
    world: &'a dyn BlockAccess,
    registry: &'a RailTypeRegistry,
}

impl<'a> RailView<'a> {
    /// Pair a world with a registry.
    pub fn new(world: &'a dyn BlockAccess, registry: &'a RailTypeRegistry) -> Self {
        Self { world, registry }
    }

    /// The underlying world.
    pub fn world(&self) -> &'a dyn BlockAccess {
        self.world
    }

    /// The registry used for classification.
    pub fn registry(&self) -> &'a RailTypeRegistry {
        self.registry
    }

    /// Shorthand for [`BlockAccess::block`].
    pub fn block(&self, cell: Cell) -> Block {
        self.world.block(cell)
    }

    /// Shorthand for [`BlockAccess::is_loaded`].
    pub fn is_loaded(&self, cell: Cell) -> bool {
        self.world.is_loaded(cell)
    }

    fn behavior(&self, rail_type: RailType) -> Option<&'a dyn RailBehavior> {
        self.registry.behavior(rail_type)
    }

    /// The first registered type whose block test accepts `cell`, or
    /// [`RailType::None`].
    pub fn classify(&self, cell: Cell) -> RailType {
        for &rail_type in self.registry.types() {
            if let Some(b) = self.behavior(rail_type) {
                if b.is_rail(*self, cell) {
                    return rail_type;
                }
            }
        }
        RailType::None
    }

    /// [`classify`](Self::classify) as a piece.
    pub fn piece_at(&self, cell: Cell) -> RailPiece {
        RailPiece::new(self.classify(cell), cell)
    }

    /// Whether any registered type claims `cell`.
    pub fn is_any_rail(&self, cell: Cell) -> bool {
        !self.classify(cell).is_none()
    }

    /// The rail piece a body at `pos` rides on, trying each registered
    /// type's [`find_rail`](RailBehavior::find_rail) in order.
    pub fn find_rail(&self, pos: Cell) -> Option<RailPiece> {
        self.find_rail_where(pos, |_| true)
    }

    pub(crate) fn find_rail_where(
        &self,
        pos: Cell,
        mut accept: impl FnMut(RailType) -> bool,
    ) -> Option<RailPiece> {
        for &rail_type in self.registry.types() {
            if !accept(rail_type) {
                continue;
            }
            if let Some(b) = self.behavior(rail_type) {
                if let Some(cell) = b.find_rail(*self, pos) {
                    return Some(RailPiece::new(rail_type, cell));
                }
            }
        }
        None
    }

    /// Directions a body may leave `piece` by. Empty for no rail.
    pub fn possible_directions(&self, piece: RailPiece) -> Directions {
        self.behavior(piece.rail_type)
            .map(|b| b.possible_directions(*self, piece.cell))
            .unwrap_or_default()
    }

    /// The raw geometric step off `piece` heading `direction`.
    pub fn next_cell(&self, piece: RailPiece, direction: Direction) -> Option<Cell> {
        self.behavior(piece.rail_type)
            .and_then(|b| b.next_cell(*self, piece.cell, direction))
    }

    /// Where a body riding `piece` is considered to be.
    pub fn minecart_position(&self, piece: RailPiece) -> Cell {
        self.behavior(piece.rail_type)
            .map(|b| b.find_minecart_position(*self, piece.cell))
            .unwrap_or(piece.cell)
    }

    /// The movement rule of `piece`. No rail yields [`LogicKind::Air`].
    pub fn logic(&self, piece: RailPiece) -> RailLogic {
        let kind = self
            .behavior(piece.rail_type)
            .map(|b| b.logic(*self, piece.cell))
            .unwrap_or(LogicKind::Air);
        RailLogic::new(piece, kind)
    }

    /// The centreline of `piece`. No rail yields an empty path.
    pub fn path(&self, piece: RailPiece, heading: Direction) -> RailPath {
        self.behavior(piece.rail_type)
            .map(|b| b.path(*self, piece.cell, heading))
            .unwrap_or_default()
    }

    /// Junctions of `piece`.
    pub fn junctions(&self, piece: RailPiece) -> Junctions {
        self.behavior(piece.rail_type)
            .map(|b| b.junctions(*self, piece.cell))
            .unwrap_or_default()
    }

    /// The junction of `piece` called `name`.
    pub fn junction_named(&self, piece: RailPiece, name: &str) -> Result<RailJunction, JunctionError> {
        let junctions = self.junctions(piece);
        if junctions.is_empty() {
            return Err(JunctionError::NotSwitchable {
                rail_type: piece.rail_type,
                cell: piece.cell,
            });
        }
        junctions
            .into_iter()
            .find(|j| j.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| JunctionError::UnknownJunction {
                name: name.to_string(),
            })
    }
}

impl std::fmt::Debug for RailView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RailView")
            .field("registry", &self.registry.types())
            .finish_non_exhaustive()
    }
}
