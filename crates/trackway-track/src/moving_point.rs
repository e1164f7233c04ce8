//! The bare track cursor.

use std::cell::OnceCell;
use trackway_core::{Cell, Direction};
use trackway_rails::{RailPiece, RailView};

/// One position of a [`TrackMovingPoint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackStep {
    /// The rail piece.
    pub piece: RailPiece,
    /// Where a body on the piece is considered to be.
    pub position: Cell,
    /// Heading of travel on arrival at the piece.
    pub direction: Direction,
}

/// A cursor over the track network holding the current piece and, computed
/// on first request, the piece after it.
///
/// The next piece is found by asking the current rail for its raw next
/// cell, then asking the registry which rail a body there rides on. The
/// arrival heading is the geometric delta between the two rail cells: a
/// purely vertical delta (or a step onto a vertical-only rail) gives `Up`
/// or `Down`, anything else the dominant planar direction.
///
/// A moving point is transient: construct it, step it, drop it.
pub struct TrackMovingPoint<'a> {
    view: RailView<'a>,
    current: Option<TrackStep>,
    next: OnceCell<Option<TrackStep>>,
    only_loaded: bool,
}

impl<'a> TrackMovingPoint<'a> {
    /// Start on the rail a body at `start` rides on, heading `direction`.
    ///
    /// Without a rail there the point is already exhausted.
    pub fn new(view: RailView<'a>, start: Cell, direction: Direction) -> Self {
        let current = view.find_rail(start).map(|piece| Self::step_for(view, piece, direction));
        Self::with_current(view, current)
    }

    /// Start on a known piece, heading `direction`.
    pub fn from_piece(view: RailView<'a>, piece: RailPiece, direction: Direction) -> Self {
        let current = (!piece.is_none()).then(|| Self::step_for(view, piece, direction));
        Self::with_current(view, current)
    }

    /// A point with no track at all.
    pub fn empty(view: RailView<'a>) -> Self {
        Self::with_current(view, None)
    }

    fn with_current(view: RailView<'a>, current: Option<TrackStep>) -> Self {
        Self {
            view,
            current,
            next: OnceCell::new(),
            only_loaded: false,
        }
    }

    fn step_for(view: RailView<'_>, piece: RailPiece, direction: Direction) -> TrackStep {
        TrackStep {
            piece,
            position: view.minecart_position(piece),
            direction,
        }
    }

    /// Treat cells outside the loaded region as the end of track.
    pub fn set_only_loaded(&mut self, only_loaded: bool) {
        self.only_loaded = only_loaded;
        self.next = OnceCell::new();
    }

    /// The view this point queries.
    pub fn view(&self) -> RailView<'a> {
        self.view
    }

    /// The current position, if on track.
    pub fn current(&self) -> Option<TrackStep> {
        self.current
    }

    /// The next position, computing it on first request.
    pub fn peek_next(&self) -> Option<TrackStep> {
        *self.next.get_or_init(|| self.compute_next())
    }

    /// Whether a next position exists.
    pub fn has_next(&self) -> bool {
        self.peek_next().is_some()
    }

    /// Forget the next position, making the point exhausted.
    pub fn clear_next(&mut self) {
        self.next = OnceCell::from(None);
    }

    /// Advance to the next position and return it.
    pub fn next(&mut self) -> Option<TrackStep> {
        let next = self.peek_next()?;
        self.current = Some(next);
        self.next = OnceCell::new();
        Some(next)
    }

    fn compute_next(&self) -> Option<TrackStep> {
        let current = self.current?;
        let cell = self.view.next_cell(current.piece, current.direction)?;
        if self.only_loaded && !self.view.is_loaded(cell) {
            log::trace!("track ends at unloaded cell {cell}");
            return None;
        }
        let piece = self.view.find_rail(cell)?;
        let direction = self.arrival_heading(current, piece);
        Some(Self::step_for(self.view, piece, direction))
    }

    fn arrival_heading(&self, from: TrackStep, to: RailPiece) -> Direction {
        let (dx, dy, dz) = from.piece.cell.delta_to(to.cell);
        if dx == 0 && dz == 0 {
            return match dy {
                0 => from.direction,
                _ => Direction::vertical(dy > 0),
            };
        }
        if dy != 0 {
            let dirs = self.view.possible_directions(to);
            if !dirs.is_empty() && dirs.iter().all(|d| d.is_vertical()) {
                return Direction::vertical(dy > 0);
            }
        }
        Direction::dominant_planar(dx, dz)
    }
}
