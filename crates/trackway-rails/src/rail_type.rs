//! The closed set of rail types and the [`RailPiece`] address.

use std::fmt;
use trackway_core::{Cell, CustomRailId};

/// A kind of track, as decided by classification.
///
/// Built-in kinds are listed as variants. Extensions register behavior
/// under a [`CustomRailId`] and appear as [`RailType::Custom`].
/// [`RailType::None`] is the no-match sentinel: it is never registered and
/// is a valid, terminal classification result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RailType {
    /// Ladders used as vertical track.
    Vertical,
    /// Powered activator rails.
    ActivatorOn,
    /// Unpowered activator rails.
    ActivatorOff,
    /// Pressure-plate crossings.
    Crossing,
    /// Plain rails, the only kind that curves or switches freely.
    Regular,
    /// Detector rails.
    Detector,
    /// Unpowered powered-rails.
    Brake,
    /// Powered powered-rails.
    Boost,
    /// An extension-defined type.
    Custom(CustomRailId),
    /// No rail.
    None,
}

impl RailType {
    /// Built-in types in their default classification order.
    pub const BUILTIN: [RailType; 8] = [
        RailType::Vertical,
        RailType::ActivatorOn,
        RailType::ActivatorOff,
        RailType::Crossing,
        RailType::Regular,
        RailType::Detector,
        RailType::Brake,
        RailType::Boost,
    ];

    /// `true` for the [`RailType::None`] sentinel.
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// `true` for extension-defined types.
    pub const fn is_custom(self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for RailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => f.write_str("vertical"),
            Self::ActivatorOn => f.write_str("activator_on"),
            Self::ActivatorOff => f.write_str("activator_off"),
            Self::Crossing => f.write_str("crossing"),
            Self::Regular => f.write_str("regular"),
            Self::Detector => f.write_str("detector"),
            Self::Brake => f.write_str("brake"),
            Self::Boost => f.write_str("boost"),
            Self::Custom(id) => write!(f, "{id}"),
            Self::None => f.write_str("none"),
        }
    }
}

/// A rail type at a cell: the unit of addressing for track graph and path
/// operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RailPiece {
    /// Classified type of the rail.
    pub rail_type: RailType,
    /// Cell holding the rail block.
    pub cell: Cell,
}

impl RailPiece {
    /// Pair a rail type with its cell.
    pub const fn new(rail_type: RailType, cell: Cell) -> Self {
        Self { rail_type, cell }
    }

    /// A piece with no rail at `cell`.
    pub const fn none(cell: Cell) -> Self {
        Self::new(RailType::None, cell)
    }

    /// `true` when this piece has no rail.
    pub const fn is_none(self) -> bool {
        self.rail_type.is_none()
    }
}

impl fmt::Display for RailPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.rail_type, self.cell)
    }
}
