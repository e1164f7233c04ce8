//! Errors from junction switching.

use std::error::Error;
use std::fmt;
use trackway_rails::JunctionError;

/// Why a junction switch was refused.
///
/// A refused switch leaves the world and the occupants untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwitchError {
    /// `from` and `to` name the same junction.
    SameJunction {
        /// The junction named twice.
        name: String,
    },
    /// The rail refused the switch.
    Junction(JunctionError),
}

impl fmt::Display for SwitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameJunction { name } => {
                write!(f, "cannot switch junction '{name}' to itself")
            }
            Self::Junction(e) => write!(f, "junction switch failed: {e}"),
        }
    }
}

impl Error for SwitchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Junction(e) => Some(e),
            Self::SameJunction { .. } => None,
        }
    }
}

impl From<JunctionError> for SwitchError {
    fn from(e: JunctionError) -> Self {
        Self::Junction(e)
    }
}
