//! Rail paths: the exact centreline a body follows over a piece.
//!
//! A [`RailPath`] is a polyline in world coordinates. A [`PathPosition`]
//! is a point plus a motion vector; [`RailPath::move_relative`] advances it
//! along the polyline by a distance, following the motion's sense, and
//! reports how much distance was actually consumed before the path ended.

use crate::rail_type::RailPiece;
use crate::ray::CellRay;
use glam::DVec3;
use trackway_core::{vector_pitch, vector_yaw, Cell, Direction};

/// Height of the rail centreline above the floor of its cell.
pub const Y_POS_OFFSET: f64 = 0.0625;

/// Segments shorter than this are dropped when building a path.
const MIN_SEGMENT_LENGTH: f64 = 1e-9;

/// One straight piece of a [`RailPath`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Start point.
    pub p0: DVec3,
    /// End point.
    pub p1: DVec3,
    /// Unit vector from `p0` to `p1`.
    pub motion: DVec3,
    /// Distance from `p0` to `p1`.
    pub length: f64,
}

impl Segment {
    /// The segment from `p0` to `p1`, or `None` if they coincide.
    pub fn new(p0: DVec3, p1: DVec3) -> Option<Self> {
        let delta = p1 - p0;
        let length = delta.length();
        if length < MIN_SEGMENT_LENGTH {
            return None;
        }
        Some(Self {
            p0,
            p1,
            motion: delta / length,
            length,
        })
    }

    /// The point `t` along the segment from `p0`.
    pub fn point_at(&self, t: f64) -> DVec3 {
        self.p0 + self.motion * t
    }

    /// Distance along the segment of the closest point to `p`.
    fn project(&self, p: DVec3) -> f64 {
        (p - self.p0).dot(self.motion).clamp(0.0, self.length)
    }
}

/// A point on (or near) a path together with its direction of travel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PathPosition {
    /// World position.
    pub position: DVec3,
    /// Direction of travel. Only its sense relative to the path matters.
    pub motion: DVec3,
}

impl PathPosition {
    /// A position with a motion vector.
    pub const fn new(position: DVec3, motion: DVec3) -> Self {
        Self { position, motion }
    }

    /// The same point, travelling the other way.
    pub fn inverted(self) -> Self {
        Self::new(self.position, -self.motion)
    }

    /// The cell holding the position.
    pub fn cell(&self) -> Cell {
        Cell::containing(self.position)
    }

    /// Closest axis heading of the motion vector.
    pub fn heading(&self) -> Direction {
        Direction::from_vector(self.motion)
    }

    /// Yaw of the motion vector in degrees.
    pub fn yaw(&self) -> f64 {
        vector_yaw(self.motion)
    }

    /// Pitch of the motion vector in degrees.
    pub fn pitch(&self) -> f64 {
        vector_pitch(self.motion)
    }
}

/// A body's position on a specific piece.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RailState {
    /// The piece whose path the position refers to.
    pub piece: RailPiece,
    /// Position and motion on that path.
    pub position: PathPosition,
}

impl RailState {
    /// Bind a position to a piece.
    pub const fn new(piece: RailPiece, position: PathPosition) -> Self {
        Self { piece, position }
    }

    /// A copy travelling the other way.
    pub fn motion_inverted(&self) -> Self {
        Self::new(self.piece, self.position.inverted())
    }

    /// Closest axis heading of the motion vector.
    pub fn heading(&self) -> Direction {
        self.position.heading()
    }
}

/// The centreline of a rail piece: a polyline in world coordinates.
///
/// # Examples
///
/// ```
/// use glam::DVec3;
/// use trackway_rails::{PathPosition, RailPath};
///
/// let path = RailPath::from_points([
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(2.0, 0.0, 0.0),
///     DVec3::new(2.0, 0.0, 3.0),
/// ]);
/// assert_eq!(path.total_distance(), 5.0);
///
/// let mut pos = path.start_position().unwrap();
/// assert_eq!(path.move_relative(&mut pos, 3.0), 3.0);
/// assert_eq!(pos.position, DVec3::new(2.0, 0.0, 1.0));
///
/// // Only two units remain before the end.
/// assert_eq!(path.move_relative(&mut pos, 10.0), 2.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RailPath {
    segments: Vec<Segment>,
    total: f64,
}

impl RailPath {
    /// Build a path through `points` in order. Repeated points are skipped.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Self {
        let mut segments = Vec::new();
        let mut prev: Option<DVec3> = None;
        for p in points {
            match prev {
                Some(p0) => {
                    if let Some(seg) = Segment::new(p0, p) {
                        segments.push(seg);
                        prev = Some(p);
                    }
                }
                None => prev = Some(p),
            }
        }
        let total = segments.iter().map(|s| s.length).sum();
        Self { segments, total }
    }

    /// The straight segments, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Sum of segment lengths.
    pub fn total_distance(&self) -> f64 {
        self.total
    }

    /// `true` when the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The first point, travelling into the path.
    pub fn start_position(&self) -> Option<PathPosition> {
        self.segments
            .first()
            .map(|s| PathPosition::new(s.p0, s.motion))
    }

    /// The last point, travelling back into the path.
    pub fn end_position(&self) -> Option<PathPosition> {
        self.segments
            .last()
            .map(|s| PathPosition::new(s.p1, -s.motion))
    }

    /// Whichever end lies closer to `p`, travelling into the path.
    pub fn nearest_end(&self, p: DVec3) -> Option<PathPosition> {
        let start = self.start_position()?;
        let end = self.end_position()?;
        if start.position.distance_squared(p) <= end.position.distance_squared(p) {
            Some(start)
        } else {
            Some(end)
        }
    }

    /// The point `distance` along the path from its start, clamped to the
    /// path's extent.
    pub fn point_at(&self, distance: f64) -> Option<DVec3> {
        let mut remaining = distance.max(0.0);
        for seg in &self.segments {
            if remaining <= seg.length {
                return Some(seg.point_at(remaining));
            }
            remaining -= seg.length;
        }
        self.segments.last().map(|s| s.p1)
    }

    /// The point halfway along the path.
    pub fn midpoint(&self) -> Option<DVec3> {
        self.point_at(self.total * 0.5)
    }

    /// Distance from the path start to the closest point on the path to `p`.
    pub fn distance_from_start(&self, p: DVec3) -> Option<f64> {
        let (i, t) = self.locate(p, DVec3::ZERO)?;
        Some(self.segments[..i].iter().map(|s| s.length).sum::<f64>() + t)
    }

    /// Index and offset of the closest point to `p`.
    ///
    /// Points equidistant from several segments (segment joints) resolve to
    /// the segment best aligned with `motion`.
    fn locate(&self, p: DVec3, motion: DVec3) -> Option<(usize, f64)> {
        const TIE: f64 = 1e-12;
        let mut best: Option<(usize, f64, f64, f64)> = None;
        for (i, seg) in self.segments.iter().enumerate() {
            let t = seg.project(p);
            let d2 = seg.point_at(t).distance_squared(p);
            let align = motion.dot(seg.motion).abs();
            let better = match best {
                None => true,
                Some((_, _, bd2, balign)) => d2 < bd2 - TIE || (d2 <= bd2 + TIE && align > balign),
            };
            if better {
                best = Some((i, t, d2, align));
            }
        }
        best.map(|(i, t, _, _)| (i, t))
    }

    /// Move `pos` onto the closest point of the path and align its motion
    /// with the segment there, keeping its sense.
    pub fn snap(&self, pos: &mut PathPosition) {
        if let Some((i, t)) = self.locate(pos.position, pos.motion) {
            let seg = &self.segments[i];
            let sign = if pos.motion.dot(seg.motion) >= 0.0 { 1.0 } else { -1.0 };
            pos.position = seg.point_at(t);
            pos.motion = seg.motion * sign;
        }
    }

    /// Advance `pos` by `distance` along the path in the sense of its
    /// motion.
    ///
    /// The position is first snapped onto the path. Returns the distance
    /// actually moved, which is less than requested when an end of the path
    /// is reached; the position then rests on that end with its motion
    /// pointing out of the path. A non-positive distance only snaps.
    pub fn move_relative(&self, pos: &mut PathPosition, distance: f64) -> f64 {
        let Some((mut i, mut t)) = self.locate(pos.position, pos.motion) else {
            return 0.0;
        };
        let forward = pos.motion.dot(self.segments[i].motion) >= 0.0;
        let sign = if forward { 1.0 } else { -1.0 };

        let mut remaining = distance.max(0.0);
        let mut moved = 0.0;
        loop {
            let seg = &self.segments[i];
            let available = if forward { seg.length - t } else { t };
            if remaining <= available {
                t += remaining * sign;
                moved += remaining;
                break;
            }
            remaining -= available;
            moved += available;
            if forward && i + 1 < self.segments.len() {
                i += 1;
                t = 0.0;
            } else if !forward && i > 0 {
                i -= 1;
                t = self.segments[i].length;
            } else {
                t = if forward { seg.length } else { 0.0 };
                break;
            }
        }

        let seg = &self.segments[i];
        pos.position = seg.point_at(t);
        pos.motion = seg.motion * sign;
        moved
    }

    /// Every cell the path passes through, in path order.
    pub fn cells(&self) -> Vec<Cell> {
        let mut out: Vec<Cell> = Vec::new();
        for seg in &self.segments {
            for cell in CellRay::segment(seg.p0, seg.p1) {
                if out.last() != Some(&cell) {
                    out.push(cell);
                }
            }
        }
        out
    }
}
