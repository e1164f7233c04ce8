//! The block model reported by a world for each cell.

use crate::direction::Direction;

/// Variant of a rails block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RailKind {
    /// Ordinary rails. The only kind that can form curves.
    Plain,
    /// Powered rails: boost when powered, brake when not.
    Powered {
        /// Whether the rail currently carries power.
        powered: bool,
    },
    /// Detector rails.
    Detector,
    /// Activator rails.
    Activator {
        /// Whether the rail currently carries power.
        powered: bool,
    },
}

impl RailKind {
    /// Whether this kind may take one of the four curve shapes.
    pub const fn can_curve(self) -> bool {
        matches!(self, Self::Plain)
    }
}

/// Shape of a rails block: two straights, four slopes and four curves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RailShape {
    /// Straight, connecting North and South.
    NorthSouth,
    /// Straight, connecting East and West.
    EastWest,
    /// Slope rising toward the North.
    AscendingNorth,
    /// Slope rising toward the East.
    AscendingEast,
    /// Slope rising toward the South.
    AscendingSouth,
    /// Slope rising toward the West.
    AscendingWest,
    /// Curve connecting South and East.
    SouthEast,
    /// Curve connecting South and West.
    SouthWest,
    /// Curve connecting North and West.
    NorthWest,
    /// Curve connecting North and East.
    NorthEast,
}

impl RailShape {
    /// Every shape.
    pub const ALL: [RailShape; 10] = [
        RailShape::NorthSouth,
        RailShape::EastWest,
        RailShape::AscendingNorth,
        RailShape::AscendingEast,
        RailShape::AscendingSouth,
        RailShape::AscendingWest,
        RailShape::SouthEast,
        RailShape::SouthWest,
        RailShape::NorthWest,
        RailShape::NorthEast,
    ];

    /// The two planar faces this shape connects.
    ///
    /// Curves list their north/south face first.
    pub const fn connections(self) -> [Direction; 2] {
        use Direction::*;
        match self {
            Self::NorthSouth | Self::AscendingNorth | Self::AscendingSouth => [North, South],
            Self::EastWest | Self::AscendingEast | Self::AscendingWest => [East, West],
            Self::SouthEast => [South, East],
            Self::SouthWest => [South, West],
            Self::NorthWest => [North, West],
            Self::NorthEast => [North, East],
        }
    }

    /// The direction this slope rises toward, if it is a slope.
    pub const fn ascending(self) -> Option<Direction> {
        match self {
            Self::AscendingNorth => Some(Direction::North),
            Self::AscendingEast => Some(Direction::East),
            Self::AscendingSouth => Some(Direction::South),
            Self::AscendingWest => Some(Direction::West),
            _ => None,
        }
    }

    /// The slope rising toward `dir`.
    pub const fn ascending_toward(dir: Direction) -> Option<Self> {
        match dir {
            Direction::North => Some(Self::AscendingNorth),
            Direction::East => Some(Self::AscendingEast),
            Direction::South => Some(Self::AscendingSouth),
            Direction::West => Some(Self::AscendingWest),
            _ => None,
        }
    }

    /// `true` for the four curve shapes.
    pub const fn is_curve(self) -> bool {
        matches!(
            self,
            Self::SouthEast | Self::SouthWest | Self::NorthWest | Self::NorthEast
        )
    }

    /// `true` for the four slopes.
    pub const fn is_sloped(self) -> bool {
        self.ascending().is_some()
    }

    /// The heading that names this rail.
    ///
    /// Flat straights report their South or East end, slopes the direction
    /// they rise toward, and curves the diagonal between their two faces.
    pub const fn direction(self) -> Direction {
        match self {
            Self::NorthSouth => Direction::South,
            Self::EastWest => Direction::East,
            Self::AscendingNorth => Direction::North,
            Self::AscendingEast => Direction::East,
            Self::AscendingSouth => Direction::South,
            Self::AscendingWest => Direction::West,
            Self::SouthEast => Direction::SouthEast,
            Self::SouthWest => Direction::SouthWest,
            Self::NorthWest => Direction::NorthWest,
            Self::NorthEast => Direction::NorthEast,
        }
    }

    /// The flat shape joining two cardinal faces, in either order.
    ///
    /// Opposite faces give a straight, perpendicular faces a curve. Equal
    /// faces and non-cardinal input give `None`.
    pub fn from_connections(a: Direction, b: Direction) -> Option<Self> {
        if !a.is_cardinal() || !b.is_cardinal() || a == b {
            return None;
        }
        if a.opposite() == b {
            return Some(if a.is_along_z() {
                Self::NorthSouth
            } else {
                Self::EastWest
            });
        }
        let (ns, ew) = if a.is_along_z() { (a, b) } else { (b, a) };
        Some(match (ns, ew) {
            (Direction::South, Direction::East) => Self::SouthEast,
            (Direction::South, _) => Self::SouthWest,
            (_, Direction::West) => Self::NorthWest,
            _ => Self::NorthEast,
        })
    }
}

/// What occupies a cell, as far as track code is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Block {
    /// Empty space.
    #[default]
    Air,
    /// Any full solid block.
    Solid,
    /// A rails block.
    Rails {
        /// Rail variant.
        kind: RailKind,
        /// Rail shape.
        shape: RailShape,
    },
    /// A pressure plate, used as a track crossing.
    PressurePlate,
    /// A ladder used as vertical rail, attached to the wall on side `wall`.
    Ladder {
        /// Side of the cell the ladder is fixed to.
        wall: Direction,
    },
    /// A sign. Not track, not solid.
    Sign,
    /// A block owned by an extension. Interpreted only by custom rail types.
    Custom {
        /// Extension-defined block id.
        id: u32,
        /// Extension-defined block data.
        data: u32,
    },
}

impl Block {
    /// Plain rails of the given shape.
    pub const fn rails(shape: RailShape) -> Self {
        Self::Rails {
            kind: RailKind::Plain,
            shape,
        }
    }

    /// Whether the block stops movement through the cell.
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Solid)
    }

    /// `true` for [`Block::Air`].
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }
}
