//! Discrete piece-by-piece track iteration.

use crate::config::TrackConfig;
use crate::moving_point::{TrackMovingPoint, TrackStep};
use smallvec::SmallVec;
use std::collections::HashSet;
use std::f64::consts::FRAC_1_SQRT_2;
use std::iter::FusedIterator;
use trackway_core::{Cell, Direction};
use trackway_rails::{RailPiece, RailView};

/// Steps along the track one rail piece at a time.
///
/// Every piece entered is recorded; the iterator ends instead of entering a
/// piece twice, so looped layouts terminate. It also ends once
/// [`TrackConfig::max_distance`] pieces have been stepped.
///
/// Two distances are accumulated: [`distance`](Self::distance) counts
/// pieces, [`cart_distance`](Self::cart_distance) approximates the arc
/// length travelled by counting a turn as `√2⁄2` instead of 1.
pub struct TrackIterator<'a> {
    point: TrackMovingPoint<'a>,
    visited: HashSet<Cell>,
    distance: u32,
    cart_distance: f64,
    max_distance: u32,
}

impl<'a> TrackIterator<'a> {
    /// Iterate from the rail a body at `start` rides on, heading
    /// `direction`.
    ///
    /// `config` must pass [`TrackConfig::validate`]; debug builds assert it.
    pub fn new(view: RailView<'a>, start: Cell, direction: Direction, config: &TrackConfig) -> Self {
        config.debug_check();
        let mut point = TrackMovingPoint::new(view, start, direction);
        point.set_only_loaded(config.only_in_loaded_region);
        Self::with_point(point, config.max_distance)
    }

    /// Iterate from a known piece.
    pub fn from_piece(
        view: RailView<'a>,
        piece: RailPiece,
        direction: Direction,
        config: &TrackConfig,
    ) -> Self {
        config.debug_check();
        let mut point = TrackMovingPoint::from_piece(view, piece, direction);
        point.set_only_loaded(config.only_in_loaded_region);
        Self::with_point(point, config.max_distance)
    }

    /// An iterator bounded for a search from `start` to `target`: it stops
    /// after the Manhattan distance between them plus two pieces.
    pub fn finder(view: RailView<'a>, start: Cell, direction: Direction, target: Cell) -> Self {
        let budget = start.manhattan_distance(target).saturating_add(2);
        Self::with_point(TrackMovingPoint::new(view, start, direction), budget)
    }

    fn with_point(point: TrackMovingPoint<'a>, max_distance: u32) -> Self {
        let visited = point.current().map(|s| s.piece.cell).into_iter().collect();
        Self {
            point,
            visited,
            distance: 0,
            cart_distance: 0.0,
            max_distance,
        }
    }

    /// The current position, if on track.
    pub fn current(&self) -> Option<TrackStep> {
        self.point.current()
    }

    /// The current piece, if on track.
    pub fn current_piece(&self) -> Option<RailPiece> {
        self.point.current().map(|s| s.piece)
    }

    /// Heading of travel at the current piece.
    pub fn direction(&self) -> Option<Direction> {
        self.point.current().map(|s| s.direction)
    }

    /// Pieces stepped so far.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Approximate arc length travelled so far.
    pub fn cart_distance(&self) -> f64 {
        self.cart_distance
    }

    /// The position a step would move to, without moving.
    pub fn peek_next(&self) -> Option<TrackStep> {
        self.step_check().ok()
    }

    /// Whether another step is possible.
    pub fn has_next(&self) -> bool {
        self.peek_next().is_some()
    }

    fn step_check(&self) -> Result<TrackStep, &'static str> {
        if self.distance >= self.max_distance {
            return Err("distance cap reached");
        }
        let next = self.point.peek_next().ok_or("no rail")?;
        if self.visited.contains(&next.piece.cell) {
            return Err("piece already visited");
        }
        Ok(next)
    }

    /// Step to the next piece and return it.
    pub fn next_piece(&mut self) -> Option<RailPiece> {
        let step = match self.step_check() {
            Ok(step) => step,
            Err(reason) => {
                if let Some(at) = self.point.current() {
                    log::trace!("track iteration ends after {}: {reason}", at.piece);
                }
                return None;
            }
        };
        let previous = self.direction();
        self.point.next();
        self.visited.insert(step.piece.cell);
        self.distance += 1;
        self.cart_distance += match previous {
            Some(d) if d != step.direction && d.opposite() != step.direction => FRAC_1_SQRT_2,
            _ => 1.0,
        };
        Some(step.piece)
    }

    /// Step until the current piece is at `target` (either the rail cell or
    /// the body position on it). Returns `false` when the track ends first.
    pub fn try_find(&mut self, target: Cell) -> bool {
        loop {
            if let Some(at) = self.point.current() {
                if at.piece.cell == target || at.position == target {
                    return true;
                }
            }
            if self.next_piece().is_none() {
                return false;
            }
        }
    }

    /// Whether track runs from the rail at `a` to the rail at `b`.
    ///
    /// The search from each end first heads toward the other end, then
    /// tries the rail's other departure directions. With `both_ways` both
    /// searches must succeed; otherwise either suffices.
    pub fn is_connected(view: RailView<'_>, a: Cell, b: Cell, both_ways: bool) -> bool {
        let (Some(from), Some(to)) = (view.find_rail(a), view.find_rail(b)) else {
            return false;
        };
        if from.cell == to.cell {
            return true;
        }
        let forward = Self::reaches(view, from, to.cell);
        if both_ways {
            forward && Self::reaches(view, to, from.cell)
        } else {
            forward || Self::reaches(view, to, from.cell)
        }
    }

    fn reaches(view: RailView<'_>, from: RailPiece, target: Cell) -> bool {
        Self::search_order(view, from, target)
            .into_iter()
            .any(|direction| TrackIterator::finder(view, from.cell, direction, target).try_find(target))
    }

    /// The directions `from` can be left by, the one facing `target` first.
    fn search_order(view: RailView<'_>, from: RailPiece, target: Cell) -> SmallVec<[Direction; 5]> {
        let (dx, dy, dz) = from.cell.delta_to(target);
        let preferred = if dx == 0 && dz == 0 {
            Direction::vertical(dy > 0)
        } else {
            Direction::dominant_planar(dx, dz)
        };
        let mut candidates: SmallVec<[Direction; 5]> = view
            .possible_directions(from)
            .into_iter()
            .map(|d| if d == Direction::SelfFace { preferred } else { d })
            .collect();
        candidates.dedup();
        // Search the way facing the target first, if the rail can leave that way.
        if let Some(i) = candidates.iter().position(|d| *d == preferred) {
            candidates[..=i].rotate_right(1);
        }
        candidates
    }
}

impl Iterator for TrackIterator<'_> {
    type Item = RailPiece;

    fn next(&mut self) -> Option<RailPiece> {
        self.next_piece()
    }
}

impl FusedIterator for TrackIterator<'_> {}
