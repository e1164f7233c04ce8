//! Continuous, distance-exact walking along the track.

use crate::config::{ConfigError, TrackConfig};
use crate::moving_point::TrackMovingPoint;
use glam::DVec3;
use std::collections::HashSet;
use trackway_core::{Cell, Direction};
use trackway_rails::{PathPosition, RailPath, RailPiece, RailView};

/// Remaining distances below this count as zero.
const EPSILON: f64 = 1e-9;

/// A point placed on the track, with the orientation of the track there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Exact world position on the rail centreline.
    pub position: DVec3,
    /// Yaw in degrees (south 0, west 90).
    pub yaw: f64,
    /// Pitch in degrees (negative is upward).
    pub pitch: f64,
    /// The piece the point lies on.
    pub piece: RailPiece,
}

/// A fractional position walked along the track by exact distances.
///
/// The walker follows each piece's [`RailPath`] and switches to the next
/// piece, found with a [`TrackMovingPoint`], when the path is used up. The
/// position is never snapped to cell boundaries and the orientation follows
/// the path segment under the point, so curves and slopes are measured
/// along their real geometry.
///
/// Construction resolves the start piece and places the point on the middle
/// of its path, facing the starting heading. The first [`move_by`] then
/// continues forward from there.
///
/// [`move_by`]: Self::move_by
pub struct TrackWalkingPoint<'a> {
    point: TrackMovingPoint<'a>,
    config: TrackConfig,
    path: RailPath,
    state: PathPosition,
    visited: HashSet<Cell>,
    steps: u32,
    moved: f64,
    ended: bool,
}

impl<'a> TrackWalkingPoint<'a> {
    /// Start on the rail a body at `start` rides on, heading `direction`.
    ///
    /// `config` must pass [`TrackConfig::validate`]; debug builds assert it.
    pub fn new(view: RailView<'a>, start: Cell, direction: Direction, config: &TrackConfig) -> Self {
        Self::with_point(TrackMovingPoint::new(view, start, direction), config)
    }

    /// Start on a known piece.
    pub fn from_piece(
        view: RailView<'a>,
        piece: RailPiece,
        direction: Direction,
        config: &TrackConfig,
    ) -> Self {
        Self::with_point(TrackMovingPoint::from_piece(view, piece, direction), config)
    }

    fn with_point(mut point: TrackMovingPoint<'a>, config: &TrackConfig) -> Self {
        config.debug_check();
        point.set_only_loaded(config.only_in_loaded_region);
        let view = point.view();
        let mut walker = Self {
            point,
            config: config.clone(),
            path: RailPath::default(),
            state: PathPosition::default(),
            visited: HashSet::new(),
            steps: 0,
            moved: 0.0,
            ended: true,
        };
        let Some(start) = walker.point.current() else {
            return walker;
        };
        let heading = view.logic(start.piece).movement_direction(start.direction);
        walker.path = view.path(start.piece, start.direction);
        let anchor = walker
            .path
            .midpoint()
            .unwrap_or_else(|| start.piece.cell.center());
        walker.state = PathPosition::new(anchor, heading.to_vector());
        walker.path.snap(&mut walker.state);
        walker.visited.insert(start.piece.cell);
        walker.ended = false;
        walker
    }

    /// Current world position.
    pub fn position(&self) -> DVec3 {
        self.state.position
    }

    /// Unit vector of the current direction of travel.
    pub fn direction_vector(&self) -> DVec3 {
        self.state.motion
    }

    /// Yaw and pitch of the direction of travel, in degrees.
    pub fn orientation(&self) -> (f64, f64) {
        (self.state.yaw(), self.state.pitch())
    }

    /// The piece under the point.
    pub fn current_piece(&self) -> Option<RailPiece> {
        self.point.current().map(|s| s.piece)
    }

    /// Total distance walked since construction.
    pub fn moved(&self) -> f64 {
        self.moved
    }

    /// The point as a [`Placement`], if on track.
    pub fn placement(&self) -> Option<Placement> {
        let piece = self.current_piece()?;
        let (yaw, pitch) = self.orientation();
        Some(Placement {
            position: self.state.position,
            yaw,
            pitch,
            piece,
        })
    }

    /// Distance left on the current piece before the next one is needed.
    pub fn remaining_on_piece(&self) -> f64 {
        let mut probe = self.state;
        self.path.move_relative(&mut probe, f64::MAX)
    }

    /// Walk `distance` further along the track.
    ///
    /// Returns `false` when the track ends first. The point then rests at
    /// the end of the last piece it reached and [`moved`](Self::moved)
    /// includes the distance covered before the end. A non-positive
    /// distance moves nothing and reports whether the point is on track.
    pub fn move_by(&mut self, distance: f64) -> bool {
        if self.point.current().is_none() {
            return false;
        }
        let mut remaining = distance;
        while remaining > EPSILON {
            let moved = self.path.move_relative(&mut self.state, remaining);
            self.moved += moved;
            remaining -= moved;
            if remaining > EPSILON && !self.advance() {
                return false;
            }
        }
        true
    }

    /// Walk to the end of the current piece, first stepping onto the next
    /// piece if this one is already used up.
    pub fn move_full(&mut self) -> bool {
        if self.remaining_on_piece() <= EPSILON && !self.advance() {
            return false;
        }
        let rest = self.remaining_on_piece();
        self.move_by(rest)
    }

    /// Turn around on the current piece.
    pub fn reverse(&mut self) {
        let Some(at) = self.point.current() else {
            return;
        };
        let view = self.point.view();
        self.point = TrackMovingPoint::from_piece(view, at.piece, at.direction.opposite());
        self.point.set_only_loaded(self.config.only_in_loaded_region);
        self.state = self.state.inverted();
        self.visited.clear();
        self.visited.insert(at.piece.cell);
        self.steps = 0;
        self.ended = false;
    }

    /// Step onto the next piece and enter its path at the end nearest the
    /// current position.
    fn advance(&mut self) -> bool {
        if self.ended {
            return false;
        }
        if self.steps >= self.config.max_distance {
            log::trace!("walk stopped after {} pieces", self.steps);
            return self.end();
        }
        // Refused legs leave the point on the piece it is already on.
        let Some(step) = self.point.peek_next() else {
            return self.end();
        };
        if self.config.loop_filter && self.visited.contains(&step.piece.cell) {
            log::trace!("walk re-entered {}", step.piece);
            return self.end();
        }
        let view = self.point.view();
        let path = view.path(step.piece, step.direction);
        if self.config.check_loaded_cells {
            if let Some(cell) = path.cells().into_iter().find(|c| !view.is_loaded(*c)) {
                log::trace!("walk stopped at unloaded cell {cell}");
                return self.end();
            }
        }
        self.point.next();
        self.steps += 1;
        self.visited.insert(step.piece.cell);
        match path.nearest_end(self.state.position) {
            Some(entry) => self.state = entry,
            None => self.state.motion = step.direction.to_vector(),
        }
        self.path = path;
        true
    }

    fn end(&mut self) -> bool {
        self.ended = true;
        false
    }

    /// Up to `count` placements `spacing` apart along the track, starting
    /// at the current position. Fewer are returned when the track ends.
    pub fn placement_points(
        &mut self,
        count: usize,
        spacing: f64,
    ) -> Result<Vec<Placement>, ConfigError> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(ConfigError::InvalidSpacing { spacing });
        }
        let mut points = Vec::with_capacity(count);
        for i in 0..count {
            if i > 0 && !self.move_by(spacing) {
                break;
            }
            match self.placement() {
                Some(p) => points.push(p),
                None => break,
            }
        }
        Ok(points)
    }

    /// How far the point can walk before the track ends, up to `max`.
    pub fn measure_length(&mut self, max: f64) -> f64 {
        let before = self.moved;
        self.move_by(max);
        self.moved - before
    }
}
