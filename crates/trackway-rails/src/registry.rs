//! The ordered registry of rail types.

use crate::behavior::{RailBehavior, RailView};
use crate::crossing::CrossingRail;
use crate::error::{JunctionError, RegistryError};
use crate::junction::RailJunction;
use crate::rail_type::{RailPiece, RailType};
use crate::rails_block::RailsType;
use crate::vertical::VerticalRail;
use indexmap::IndexMap;
use std::fmt;
use trackway_core::{BlockAccess, BlockAccessMut, Cell, CustomRailId, RailKind};

static VERTICAL: VerticalRail = VerticalRail;
static CROSSING: CrossingRail = CrossingRail;
static REGULAR: RailsType = RailsType::new(RailType::Regular, "regular", RailKind::Plain);
static DETECTOR: RailsType = RailsType::new(RailType::Detector, "detector", RailKind::Detector);
static BRAKE: RailsType = RailsType::new(
    RailType::Brake,
    "brake",
    RailKind::Powered { powered: false },
);
static BOOST: RailsType = RailsType::new(
    RailType::Boost,
    "boost",
    RailKind::Powered { powered: true },
);
static ACTIVATOR_ON: RailsType = RailsType::new(
    RailType::ActivatorOn,
    "activator_on",
    RailKind::Activator { powered: true },
);
static ACTIVATOR_OFF: RailsType = RailsType::new(
    RailType::ActivatorOff,
    "activator_off",
    RailKind::Activator { powered: false },
);

fn builtin(rail_type: RailType) -> Option<&'static dyn RailBehavior> {
    match rail_type {
        RailType::Vertical => Some(&VERTICAL),
        RailType::ActivatorOn => Some(&ACTIVATOR_ON),
        RailType::ActivatorOff => Some(&ACTIVATOR_OFF),
        RailType::Crossing => Some(&CROSSING),
        RailType::Regular => Some(&REGULAR),
        RailType::Detector => Some(&DETECTOR),
        RailType::Brake => Some(&BRAKE),
        RailType::Boost => Some(&BOOST),
        RailType::Custom(_) | RailType::None => None,
    }
}

/// Ordered list of rail types used for classification.
///
/// Types are tested in order and the first match wins, so registering with
/// priority lets an extension claim blocks a built-in type would otherwise
/// take. Classification is never cached: every query re-derives the answer
/// from the world.
///
/// Mutation takes `&mut self`. A registry shared with track code is
/// borrowed immutably for the duration of every query, so it cannot change
/// under an iteration in progress.
///
/// Unregistering a type removes it from classification only. Its behavior
/// stays resolvable, so pieces classified before the removal can still be
/// stepped and pathed.
pub struct RailTypeRegistry {
    order: Vec<RailType>,
    custom: IndexMap<CustomRailId, Box<dyn RailBehavior>>,
}

impl Default for RailTypeRegistry {
    /// The built-in types in their canonical order.
    fn default() -> Self {
        Self {
            order: RailType::BUILTIN.to_vec(),
            custom: IndexMap::new(),
        }
    }
}

impl RailTypeRegistry {
    /// A registry that classifies nothing.
    pub fn empty() -> Self {
        Self {
            order: Vec::new(),
            custom: IndexMap::new(),
        }
    }

    /// Registered types in classification order.
    pub fn types(&self) -> &[RailType] {
        &self.order
    }

    /// Whether `rail_type` currently takes part in classification.
    pub fn contains(&self, rail_type: RailType) -> bool {
        self.order.contains(&rail_type)
    }

    /// The behavior of `rail_type`, registered or not. `None` for the
    /// no-rail sentinel and for unknown custom ids.
    pub fn behavior(&self, rail_type: RailType) -> Option<&dyn RailBehavior> {
        match rail_type {
            RailType::Custom(id) => self.custom.get(&id).map(|b| b.as_ref()),
            other => builtin(other),
        }
    }

    /// Add an extension behavior under a fresh id and register it.
    ///
    /// With `with_priority` the type is tested before every other type;
    /// otherwise after them.
    pub fn register_custom(
        &mut self,
        behavior: Box<dyn RailBehavior>,
        with_priority: bool,
    ) -> RailType {
        let id = CustomRailId::next();
        log::debug!("registering custom rail type '{}' as {id}", behavior.name());
        self.custom.insert(id, behavior);
        let rail_type = RailType::Custom(id);
        self.insert(rail_type, with_priority);
        rail_type
    }

    /// Put a known type back into the classification order.
    pub fn register(&mut self, rail_type: RailType, with_priority: bool) -> Result<(), RegistryError> {
        if rail_type.is_none() {
            return Err(RegistryError::NoneNotRegistrable);
        }
        if self.contains(rail_type) {
            return Err(RegistryError::AlreadyRegistered { rail_type });
        }
        if self.behavior(rail_type).is_none() {
            return Err(RegistryError::UnknownCustom { rail_type });
        }
        log::debug!("registering rail type '{rail_type}' (priority: {with_priority})");
        self.insert(rail_type, with_priority);
        Ok(())
    }

    fn insert(&mut self, rail_type: RailType, with_priority: bool) {
        if with_priority {
            self.order.insert(0, rail_type);
        } else {
            self.order.push(rail_type);
        }
    }

    /// Remove a type from classification. Returns whether it was
    /// registered.
    pub fn unregister(&mut self, rail_type: RailType) -> bool {
        let before = self.order.len();
        self.order.retain(|t| *t != rail_type);
        let removed = self.order.len() != before;
        if removed {
            log::debug!("unregistered rail type '{rail_type}'");
        }
        removed
    }

    /// A query view over `world`.
    pub fn view<'a>(&'a self, world: &'a dyn BlockAccess) -> RailView<'a> {
        RailView::new(world, self)
    }

    /// The rail type at `cell`, or [`RailType::None`].
    pub fn classify(&self, world: &dyn BlockAccess, cell: Cell) -> RailType {
        self.view(world).classify(cell)
    }

    /// The rail a body at `pos` rides on.
    pub fn find_rail(&self, world: &dyn BlockAccess, pos: Cell) -> Option<RailPiece> {
        self.view(world).find_rail(pos)
    }

    /// Commit a junction switch on `piece` by rewriting its block.
    ///
    /// Both junctions must be among the piece's current junctions.
    pub fn switch_junction<W: BlockAccessMut>(
        &self,
        world: &mut W,
        piece: RailPiece,
        from: &RailJunction,
        to: &RailJunction,
    ) -> Result<(), JunctionError> {
        let behavior = self
            .behavior(piece.rail_type)
            .ok_or(JunctionError::NotSwitchable {
                rail_type: piece.rail_type,
                cell: piece.cell,
            })?;
        {
            let view = self.view(&*world);
            for junction in [from, to] {
                view.junction_named(piece, &junction.name)?;
            }
        }
        behavior.switch_junction(world, piece.cell, from, to)?;
        log::debug!("switched {piece} from '{}' to '{}'", from.name, to.name);
        Ok(())
    }
}

impl fmt::Debug for RailTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RailTypeRegistry")
            .field("order", &self.order)
            .field("custom", &self.custom.keys().collect::<Vec<_>>())
            .finish()
    }
}
