//! Movement-rule handles produced by rail pieces.
//!
//! The physics integrator owns the actual per-tick motion rules. Track code
//! only needs to obtain the rule for a piece and ask it which way a body
//! aligned to the rail is heading.

use crate::rail_type::RailPiece;
use trackway_core::{Direction, RailShape};

/// Which movement rule applies on a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicKind {
    /// No rail: free flight.
    Air,
    /// A flat straight or curve.
    Horizontal {
        /// Shape of the rail.
        shape: RailShape,
    },
    /// A slope rising toward `direction`.
    Sloped {
        /// Rising direction.
        direction: Direction,
    },
    /// A slope whose top feeds a vertical rail above it.
    SlopeToVertical {
        /// Rising direction; also the wall side of the vertical rail.
        direction: Direction,
    },
    /// A vertical rail against the wall on side `wall`.
    Vertical {
        /// Wall side.
        wall: Direction,
    },
    /// A crossing. `axis` is the sensed axis, or `SelfFace` for a full
    /// cross.
    Crossing {
        /// Sensed axis.
        axis: Direction,
    },
    /// An extension-defined rule, identified by the extension.
    Custom {
        /// Extension-defined discriminator.
        tag: u32,
    },
}

/// The movement rule of one piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RailLogic {
    /// The piece this rule belongs to.
    pub piece: RailPiece,
    /// The rule.
    pub kind: LogicKind,
}

impl RailLogic {
    /// Bind a rule to a piece.
    pub const fn new(piece: RailPiece, kind: LogicKind) -> Self {
        Self { piece, kind }
    }

    /// `true` on slopes, including slopes feeding a vertical rail.
    pub const fn is_sloped(&self) -> bool {
        matches!(
            self.kind,
            LogicKind::Sloped { .. } | LogicKind::SlopeToVertical { .. }
        )
    }

    /// `true` on vertical rails.
    pub const fn is_vertical(&self) -> bool {
        matches!(self.kind, LogicKind::Vertical { .. })
    }

    /// The heading of a body aligned to this rail that approached it
    /// heading roughly `heading`.
    pub fn movement_direction(&self, heading: Direction) -> Direction {
        match self.kind {
            LogicKind::Air | LogicKind::Custom { .. } => heading,
            LogicKind::Horizontal { shape } => {
                let [a, b] = shape.connections();
                if heading == a || heading == b {
                    heading
                } else if heading.opposite() == a {
                    b
                } else if heading.opposite() == b {
                    a
                } else {
                    shape.direction()
                }
            }
            LogicKind::Sloped { direction } | LogicKind::SlopeToVertical { direction } => {
                if heading == direction || heading == Direction::Up {
                    direction
                } else {
                    direction.opposite()
                }
            }
            LogicKind::Vertical { .. } => {
                if heading == Direction::Down {
                    Direction::Down
                } else {
                    Direction::Up
                }
            }
            LogicKind::Crossing { axis } => {
                if heading.is_cardinal() {
                    heading
                } else if axis == Direction::SelfFace {
                    Direction::South
                } else {
                    axis
                }
            }
        }
    }
}
