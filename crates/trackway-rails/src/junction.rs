//! Named alternate branches of a switchable rail piece.

use smallvec::SmallVec;
use std::fmt;
use trackway_core::Direction;

/// Junctions of one piece. Inline up to four.
pub type Junctions = SmallVec<[RailJunction; 4]>;

/// One branch of a switchable piece.
///
/// Junctions are produced on demand by the rail's behavior and consumed
/// immediately; they carry no identity beyond their name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RailJunction {
    /// Name as written on switch signs and in commands, e.g. `"n"`.
    pub name: String,
    /// The face of the piece this branch leaves through.
    pub direction: Direction,
}

impl RailJunction {
    /// A junction named after its direction's short name.
    pub fn toward(direction: Direction) -> Self {
        Self {
            name: direction.short_name().to_string(),
            direction,
        }
    }

    /// A junction with an explicit name.
    pub fn named(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
        }
    }
}

impl fmt::Display for RailJunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.direction)
    }
}
