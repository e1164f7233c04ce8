//! Walking a straight ray through voxel cells.

use glam::DVec3;
use trackway_core::Cell;

/// Axis components smaller than this are treated as parallel to the
/// axis planes.
const AXIS_EPSILON: f64 = 1e-10;

/// Iterator over the cells a straight ray passes through, in order.
///
/// The first item is the cell holding the start point. Each further item is
/// the cell entered by crossing one cell face, until the distance budget
/// would be exceeded. A ray passing exactly through an edge or corner
/// yields the intermediate cells one face at a time.
///
/// [`CellRay::segment`] walks the cells between two points and excludes
/// cells that are only touched on a face at either end.
///
/// # Examples
///
/// ```
/// use glam::DVec3;
/// use trackway_core::Cell;
/// use trackway_rails::CellRay;
///
/// let cells: Vec<Cell> = CellRay::new(DVec3::new(0.5, 0.5, 0.5), DVec3::X, 2.0).collect();
/// assert_eq!(cells, vec![Cell::new(0, 0, 0), Cell::new(1, 0, 0), Cell::new(2, 0, 0)]);
/// ```
#[derive(Clone, Debug)]
pub struct CellRay {
    position: DVec3,
    direction: DVec3,
    remaining: f64,
    cell: Cell,
    started: bool,
    strict_end: bool,
    skip_start: bool,
    done: bool,
}

impl CellRay {
    /// A ray from `start` along `direction` for `distance`.
    ///
    /// `direction` is normalised; a zero direction yields only the start
    /// cell.
    pub fn new(start: DVec3, direction: DVec3, distance: f64) -> Self {
        Self {
            position: start,
            direction: direction.normalize_or_zero(),
            remaining: distance.max(0.0),
            cell: Cell::containing(start),
            started: false,
            strict_end: false,
            skip_start: false,
            done: false,
        }
    }

    /// The cells strictly traversed between `p0` and `p1`.
    pub fn segment(p0: DVec3, p1: DVec3) -> Self {
        let delta = p1 - p0;
        let mut ray = Self::new(p0, delta, delta.length());
        ray.strict_end = true;
        ray.skip_start = ray.starts_on_trailing_face();
        ray
    }

    /// Whether the start lies on a face of its cell that the ray leaves
    /// through immediately.
    fn starts_on_trailing_face(&self) -> bool {
        let corner = self.cell.corner();
        let on = |p: f64, c: f64, d: f64| d < -AXIS_EPSILON && p - c <= AXIS_EPSILON;
        on(self.position.x, corner.x, self.direction.x)
            || on(self.position.y, corner.y, self.direction.y)
            || on(self.position.z, corner.z, self.direction.z)
    }

    /// Distance along the ray to the next face of the current cell on one
    /// axis.
    fn edge_distance(p: f64, cell: i32, d: f64) -> f64 {
        if d > AXIS_EPSILON {
            (f64::from(cell) + 1.0 - p) / d
        } else if d < -AXIS_EPSILON {
            (p - f64::from(cell)) / -d
        } else {
            f64::INFINITY
        }
    }

    /// Cross the nearest face, if within budget.
    fn advance(&mut self) -> Option<Cell> {
        let tx = Self::edge_distance(self.position.x, self.cell.x, self.direction.x);
        let ty = Self::edge_distance(self.position.y, self.cell.y, self.direction.y);
        let tz = Self::edge_distance(self.position.z, self.cell.z, self.direction.z);
        let (axis, t) = if tx <= ty && tx <= tz {
            (0, tx)
        } else if ty <= tz {
            (1, ty)
        } else {
            (2, tz)
        };
        let t = t.max(0.0);
        if !t.is_finite() {
            return None;
        }
        let within = if self.strict_end {
            t < self.remaining - AXIS_EPSILON
        } else {
            t <= self.remaining
        };
        if !within {
            return None;
        }

        self.position += self.direction * t;
        self.remaining -= t;
        let d = self.direction;
        let step = |c: f64| if c > 0.0 { 1 } else { -1 };
        self.cell = match axis {
            0 => self.cell.relative(step(d.x), 0, 0),
            1 => self.cell.relative(0, step(d.y), 0),
            _ => self.cell.relative(0, 0, step(d.z)),
        };
        Some(self.cell)
    }
}

impl Iterator for CellRay {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            if !self.skip_start {
                return Some(self.cell);
            }
        }
        let next = self.advance();
        if next.is_none() {
            self.done = true;
        }
        next
    }
}
