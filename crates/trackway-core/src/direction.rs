//! Compass, vertical and diagonal headings.

use crate::error::ParseDirectionError;
use glam::DVec3;
use std::fmt;
use std::str::FromStr;

/// One of the ten track headings, plus the [`SelfFace`](Direction::SelfFace)
/// sentinel.
///
/// Axis conventions follow the voxel world: North is `-Z`, East is `+X`,
/// South is `+Z`, West is `-X`, Up is `+Y`.
///
/// `SelfFace` means "no heading of its own". Pressure-plate crossings report
/// it when their surroundings do not pin down a single axis, and callers
/// resolve it from the approaching body's own heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// `-Z`.
    North,
    /// `+X`.
    East,
    /// `+Z`.
    South,
    /// `-X`.
    West,
    /// `+Y`.
    Up,
    /// `-Y`.
    Down,
    /// `+X -Z`.
    NorthEast,
    /// `+X +Z`.
    SouthEast,
    /// `-X +Z`.
    SouthWest,
    /// `-X -Z`.
    NorthWest,
    /// No heading; the sentinel for "resolve from context".
    SelfFace,
}

/// Planar headings in clockwise order, 45 degrees apart.
const RING: [Direction; 8] = [
    Direction::North,
    Direction::NorthEast,
    Direction::East,
    Direction::SouthEast,
    Direction::South,
    Direction::SouthWest,
    Direction::West,
    Direction::NorthWest,
];

impl Direction {
    /// The four axis-aligned planar headings, clockwise from North.
    pub const CARDINALS: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Every heading except [`SelfFace`](Direction::SelfFace).
    pub const ALL: [Direction; 10] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::Up,
        Direction::Down,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// X component of a one-cell step in this direction.
    pub const fn mod_x(self) -> i32 {
        match self {
            Self::East | Self::NorthEast | Self::SouthEast => 1,
            Self::West | Self::NorthWest | Self::SouthWest => -1,
            _ => 0,
        }
    }

    /// Y component of a one-cell step in this direction.
    pub const fn mod_y(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
            _ => 0,
        }
    }

    /// Z component of a one-cell step in this direction.
    pub const fn mod_z(self) -> i32 {
        match self {
            Self::South | Self::SouthEast | Self::SouthWest => 1,
            Self::North | Self::NorthEast | Self::NorthWest => -1,
            _ => 0,
        }
    }

    /// The heading pointing the other way. `SelfFace` is its own opposite.
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::NorthEast => Self::SouthWest,
            Self::SouthEast => Self::NorthWest,
            Self::SouthWest => Self::NorthEast,
            Self::NorthWest => Self::SouthEast,
            Self::SelfFace => Self::SelfFace,
        }
    }

    /// Rotate clockwise (seen from above) by `steps` increments of 45 degrees.
    ///
    /// Negative steps rotate counter-clockwise. Vertical headings and
    /// `SelfFace` have no planar component and are returned unchanged.
    pub fn rotate(self, steps: i32) -> Self {
        match self.ring_index() {
            Some(i) => RING[(i as i32 + steps).rem_euclid(8) as usize],
            None => self,
        }
    }

    fn ring_index(self) -> Option<usize> {
        RING.iter().position(|d| *d == self)
    }

    /// `true` for `Up` and `Down`.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// `true` for the four sub-cardinal headings.
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::NorthEast | Self::SouthEast | Self::SouthWest | Self::NorthWest
        )
    }

    /// `true` for `North`, `East`, `South` and `West`.
    pub const fn is_cardinal(self) -> bool {
        matches!(self, Self::North | Self::East | Self::South | Self::West)
    }

    /// `true` for `East` and `West`.
    pub const fn is_along_x(self) -> bool {
        matches!(self, Self::East | Self::West)
    }

    /// `true` for `North` and `South`.
    pub const fn is_along_z(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// Exact heading of an integer step.
    ///
    /// Only the signs matter. A step with any planar component maps to a
    /// cardinal or diagonal heading (its vertical part is ignored); a purely
    /// vertical step maps to `Up`/`Down`; the zero step is `SelfFace`.
    pub fn from_delta(dx: i32, dy: i32, dz: i32) -> Self {
        match (dx.signum(), dz.signum()) {
            (0, 0) => match dy.signum() {
                1 => Self::Up,
                -1 => Self::Down,
                _ => Self::SelfFace,
            },
            (0, -1) => Self::North,
            (0, _) => Self::South,
            (1, 0) => Self::East,
            (_, 0) => Self::West,
            (1, -1) => Self::NorthEast,
            (1, _) => Self::SouthEast,
            (_, 1) => Self::SouthWest,
            _ => Self::NorthWest,
        }
    }

    /// Cardinal heading of the dominant planar axis of `(dx, dz)`.
    ///
    /// Ties between the axes resolve to the Z axis. The zero vector gives
    /// `SelfFace`.
    pub fn dominant_planar(dx: i32, dz: i32) -> Self {
        if dx == 0 && dz == 0 {
            Self::SelfFace
        } else if dx.unsigned_abs() > dz.unsigned_abs() {
            if dx > 0 {
                Self::East
            } else {
                Self::West
            }
        } else if dz > 0 {
            Self::South
        } else {
            Self::North
        }
    }

    /// Vertical heading, `Up` when `up` is true.
    pub const fn vertical(up: bool) -> Self {
        if up {
            Self::Up
        } else {
            Self::Down
        }
    }

    /// Closest axis-aligned heading of a continuous vector.
    ///
    /// When the planar part vanishes the vertical sign decides; otherwise
    /// the dominant planar axis wins.
    pub fn from_vector(v: DVec3) -> Self {
        const EPS: f64 = 1e-9;
        if v.x.abs() < EPS && v.z.abs() < EPS {
            if v.y > EPS {
                Self::Up
            } else if v.y < -EPS {
                Self::Down
            } else {
                Self::SelfFace
            }
        } else if v.x.abs() > v.z.abs() {
            if v.x > 0.0 {
                Self::East
            } else {
                Self::West
            }
        } else if v.z > 0.0 {
            Self::South
        } else {
            Self::North
        }
    }

    /// Unit vector of this heading. `SelfFace` yields the zero vector.
    pub fn to_vector(self) -> DVec3 {
        DVec3::new(
            f64::from(self.mod_x()),
            f64::from(self.mod_y()),
            f64::from(self.mod_z()),
        )
        .normalize_or_zero()
    }

    /// Yaw of this heading in degrees, see [`vector_yaw`].
    pub fn yaw(self) -> f64 {
        vector_yaw(self.to_vector())
    }

    /// Lower-case long name, e.g. `"north_east"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
            Self::NorthEast => "north_east",
            Self::SouthEast => "south_east",
            Self::SouthWest => "south_west",
            Self::NorthWest => "north_west",
            Self::SelfFace => "self",
        }
    }

    /// Short name as written on switch signs, e.g. `"ne"`.
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::East => "e",
            Self::South => "s",
            Self::West => "w",
            Self::Up => "u",
            Self::Down => "d",
            Self::NorthEast => "ne",
            Self::SouthEast => "se",
            Self::SouthWest => "sw",
            Self::NorthWest => "nw",
            Self::SelfFace => "self",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Parse a long or short name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .chain(std::iter::once(&Self::SelfFace))
            .copied()
            .find(|d| d.name() == lower || d.short_name() == lower)
            .ok_or(ParseDirectionError {
                input: s.to_string(),
            })
    }
}

/// Yaw in degrees of a motion vector, in `[0, 360)`.
///
/// South is 0, West is 90, North is 180 and East is 270. The vertical
/// component is ignored; a purely vertical vector has yaw 0.
pub fn vector_yaw(v: DVec3) -> f64 {
    if v.x == 0.0 && v.z == 0.0 {
        return 0.0;
    }
    (-v.x).atan2(v.z).to_degrees().rem_euclid(360.0)
}

/// Pitch in degrees of a motion vector. Climbing is negative, so straight
/// up is `-90`.
pub fn vector_pitch(v: DVec3) -> f64 {
    let planar = (v.x * v.x + v.z * v.z).sqrt();
    if planar == 0.0 && v.y == 0.0 {
        return 0.0;
    }
    -v.y.atan2(planar).to_degrees()
}
