//! Error types for registry mutation and junction switching.

use crate::rail_type::RailType;
use std::error::Error;
use std::fmt;
use trackway_core::Cell;

/// Errors from [`RailTypeRegistry`](crate::RailTypeRegistry) mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// The rail type is already in the classification order.
    AlreadyRegistered {
        /// The offending type.
        rail_type: RailType,
    },
    /// A custom rail type id has no behavior in this registry.
    UnknownCustom {
        /// The offending type.
        rail_type: RailType,
    },
    /// [`RailType::None`] is the no-match sentinel and cannot be registered.
    NoneNotRegistrable,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRegistered { rail_type } => {
                write!(f, "rail type '{rail_type}' is already registered")
            }
            Self::UnknownCustom { rail_type } => {
                write!(f, "rail type '{rail_type}' has no registered behavior")
            }
            Self::NoneNotRegistrable => write!(f, "the none rail type cannot be registered"),
        }
    }
}

impl Error for RegistryError {}

/// Errors from committing a junction switch to the world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JunctionError {
    /// The rail type at this piece exposes no junctions.
    NotSwitchable {
        /// Type of the piece.
        rail_type: RailType,
        /// Cell of the piece.
        cell: Cell,
    },
    /// No junction with this name exists on the piece.
    UnknownJunction {
        /// The requested junction name.
        name: String,
    },
    /// The two junctions cannot be joined by this rail kind, e.g. a curve
    /// requested of a rail that only runs straight.
    Unsupported {
        /// Name of the junction switched from.
        from: String,
        /// Name of the junction switched to.
        to: String,
    },
}

impl fmt::Display for JunctionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSwitchable { rail_type, cell } => {
                write!(f, "rail '{rail_type}' at {cell} has no junctions")
            }
            Self::UnknownJunction { name } => write!(f, "no junction named '{name}'"),
            Self::Unsupported { from, to } => {
                write!(f, "cannot connect junction '{from}' to '{to}'")
            }
        }
    }
}

impl Error for JunctionError {}
