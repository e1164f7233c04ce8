//! Junction switching with occupant relocation.

use crate::error::SwitchError;
use crate::occupancy::RailOccupancy;
use crate::signal::{PhysicsSignal, PHYSICS_SIGNAL};
use std::cell::RefCell;
use trackway_core::{BlockAccessMut, Direction, OccupantId};
use trackway_rails::{PathPosition, RailJunction, RailPiece, RailState, RailTypeRegistry, RailView};

/// Replayed distances this close to the measured one count as exact.
const EPSILON: f64 = 1e-9;

/// What happened to one occupant during a switch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Relocation {
    /// The body moved.
    pub occupant: OccupantId,
    /// Its distance from the end it entered by, before the switch.
    pub measured: f64,
    /// The distance replayed along the new path.
    pub replayed: f64,
    /// `true` when the new path was too short to replay `measured`.
    pub clamped: bool,
    /// The state written back to the occupancy index.
    pub state: RailState,
}

/// Outcome of a committed switch.
#[derive(Clone, Debug, PartialEq)]
pub struct SwitchReport {
    /// The switched piece.
    pub piece: RailPiece,
    /// One entry per relocated occupant, in occupancy order.
    pub relocations: Vec<Relocation>,
}

impl SwitchReport {
    /// Number of occupants clamped to the end of the new path.
    pub fn clamped_count(&self) -> usize {
        self.relocations.iter().filter(|r| r.clamped).count()
    }
}

/// An occupant measured before the world is rewritten.
struct Snapshot {
    occupant: OccupantId,
    heading: Direction,
    /// Where the path ended behind the occupant.
    entry: PathPosition,
    measured: f64,
    original: RailState,
}

thread_local! {
    /// Pieces with a switch in progress on this thread, across every
    /// switcher instance.
    static SWITCHING: RefCell<Vec<RailPiece>> = const { RefCell::new(Vec::new()) };
}

/// Marks a piece as being switched for the lifetime of one switch.
struct SwitchGuard {
    piece: RailPiece,
}

impl SwitchGuard {
    fn enter(piece: RailPiece) -> Self {
        let fresh = SWITCHING.with(|active| {
            let mut active = active.borrow_mut();
            if active.contains(&piece) {
                return false;
            }
            active.push(piece);
            true
        });
        if !fresh {
            panic!("re-entrant junction switch on {piece}: a switch of this piece is already in progress");
        }
        Self { piece }
    }
}

impl Drop for SwitchGuard {
    fn drop(&mut self) {
        // The thread-local may already be gone during thread teardown.
        let _ = SWITCHING.try_with(|active| active.borrow_mut().retain(|p| *p != self.piece));
    }
}

/// Switches junctions while keeping occupants at the same distance into the
/// piece.
///
/// A switch runs four phases in order: every occupant of the piece is
/// measured against the current path, the physics signal is raised, the
/// rail rewrites its block, and each occupant is replayed along the new
/// path. When the new path is shorter than an occupant's distance the
/// occupant is clamped to its end and a warning is logged.
///
/// Switching is single-threaded. Starting a switch of a piece from inside
/// a switch of the same piece on the same thread panics, whichever switcher
/// instance the nested call goes through (for example a second switcher
/// built in an occupancy callback).
#[derive(Debug)]
pub struct JunctionSwitcher<'s> {
    signal: &'s PhysicsSignal,
}

impl JunctionSwitcher<'static> {
    /// A switcher raising the process-wide [`PHYSICS_SIGNAL`].
    pub fn new() -> Self {
        Self::with_signal(&PHYSICS_SIGNAL)
    }
}

impl Default for JunctionSwitcher<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s> JunctionSwitcher<'s> {
    /// A switcher raising `signal`.
    pub fn with_signal(signal: &'s PhysicsSignal) -> Self {
        Self { signal }
    }

    /// The signal this switcher raises.
    pub fn signal(&self) -> &'s PhysicsSignal {
        self.signal
    }

    /// Whether a switch of `piece` is in progress on this thread.
    pub fn is_switching(&self, piece: RailPiece) -> bool {
        SWITCHING.with(|active| active.borrow().contains(&piece))
    }

    /// Switch `piece` from junction `from` to junction `to`, relocating its
    /// occupants.
    ///
    /// Both junctions must exist on the piece. Occupants listed by
    /// `occupancy` without a state are skipped.
    ///
    /// # Panics
    ///
    /// If a switch of `piece` is already in progress on this thread.
    pub fn switch<W, O>(
        &self,
        world: &mut W,
        registry: &RailTypeRegistry,
        occupancy: &mut O,
        piece: RailPiece,
        from: &RailJunction,
        to: &RailJunction,
    ) -> Result<SwitchReport, SwitchError>
    where
        W: BlockAccessMut,
        O: RailOccupancy + ?Sized,
    {
        let _guard = SwitchGuard::enter(piece);
        if from.name == to.name {
            return Err(SwitchError::SameJunction {
                name: to.name.clone(),
            });
        }

        let snapshots: Vec<Snapshot> = {
            let view = registry.view(&*world);
            view.junction_named(piece, &from.name)?;
            view.junction_named(piece, &to.name)?;
            occupancy
                .occupants(piece)
                .into_iter()
                .filter_map(|id| Some(measure(view, id, occupancy.rail_state(id)?)))
                .collect()
        };

        self.signal.raise();
        registry.switch_junction(world, piece, from, to)?;

        let view = registry.view(&*world);
        let mut relocations = Vec::with_capacity(snapshots.len());
        for snap in snapshots {
            let relocation = replay(view, piece, &snap);
            if relocation.clamped {
                log::warn!(
                    "occupant {} on {piece} clamped to the end of junction '{}': measured {:.4}, replayed {:.4}",
                    snap.occupant,
                    to.name,
                    relocation.measured,
                    relocation.replayed,
                );
            }
            occupancy.set_rail_state(snap.occupant, relocation.state);
            relocations.push(relocation);
        }
        log::debug!("relocated {} occupant(s) of {piece}", relocations.len());
        Ok(SwitchReport { piece, relocations })
    }
}

/// Distance from the end behind the occupant, found by running an inverted
/// copy of its state to the end of the path.
fn measure(view: RailView<'_>, occupant: OccupantId, state: RailState) -> Snapshot {
    let heading = state.heading();
    let path = view.path(state.piece, heading);
    let mut entry = state.motion_inverted().position;
    let measured = path.move_relative(&mut entry, f64::MAX);
    Snapshot {
        occupant,
        heading,
        entry,
        measured,
        original: state,
    }
}

fn replay(view: RailView<'_>, piece: RailPiece, snap: &Snapshot) -> Relocation {
    let path = view.path(piece, snap.heading);
    let Some(mut position) = path.nearest_end(snap.entry.position) else {
        return Relocation {
            occupant: snap.occupant,
            measured: snap.measured,
            replayed: 0.0,
            clamped: snap.measured > EPSILON,
            state: snap.original,
        };
    };
    let replayed = path.move_relative(&mut position, snap.measured);
    Relocation {
        occupant: snap.occupant,
        measured: snap.measured,
        replayed,
        clamped: replayed + EPSILON < snap.measured,
        state: RailState::new(piece, position),
    }
}
