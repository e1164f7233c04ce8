//! Hand-over between vertical rails and slopes.
//!
//! A body climbing off the top of a vertical rail onto a slope (or coming
//! off a slope onto a vertical rail) changes axis abruptly. These
//! transforms re-centre the body on the new rail and turn its velocity onto
//! the new axis without changing its speed.

use glam::DVec3;
use trackway_core::{Cell, Direction};

/// How far inside the new rail's cell a transferred body is placed.
const TRANSFER_INSET: f64 = 0.49;

/// Height above the floor a transferred body is placed at.
const TRANSFER_LIFT: f64 = 0.01;

/// Position and velocity of a body on the track.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyMotion {
    /// World position.
    pub position: DVec3,
    /// Velocity.
    pub velocity: DVec3,
}

impl BodyMotion {
    /// A body at `position` moving at `velocity`.
    pub const fn new(position: DVec3, velocity: DVec3) -> Self {
        Self { position, velocity }
    }

    /// Magnitude of the velocity.
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

/// Hand a body moving along a vertical rail onto the slope at `slope`,
/// which rises toward `direction`.
///
/// The body is placed just inside the slope's low edge. Upward motion
/// becomes motion up the slope, downward motion becomes motion down it.
pub fn vertical_to_slope(body: BodyMotion, slope: Cell, direction: Direction) -> BodyMotion {
    let dir = direction.to_vector();
    let center = slope.center() - dir * TRANSFER_INSET;
    let position = DVec3::new(center.x, f64::from(slope.y) + TRANSFER_LIFT, center.z);
    let sense = if body.velocity.y >= 0.0 { 1.0 } else { -1.0 };
    BodyMotion::new(position, dir * (body.speed() * sense))
}

/// Hand a body moving along a slope onto the vertical rail at `vertical`,
/// whose wall is on side `wall`.
///
/// The body is placed on the climbing column just above the floor. Motion
/// toward the wall becomes upward motion, motion away from it downward.
pub fn slope_to_vertical(body: BodyMotion, vertical: Cell, wall: Direction) -> BodyMotion {
    let w = wall.to_vector();
    let column = vertical.center() + w * TRANSFER_INSET;
    let position = DVec3::new(column.x, f64::from(vertical.y) + TRANSFER_LIFT, column.z);
    let sense = if body.velocity.dot(w) >= 0.0 { 1.0 } else { -1.0 };
    BodyMotion::new(position, DVec3::Y * (body.speed() * sense))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn climbing_body_moves_up_the_slope() {
        let body = BodyMotion::new(DVec3::new(0.5, 2.9, 0.5), DVec3::new(0.0, 0.4, 0.0));
        let out = vertical_to_slope(body, Cell::new(1, 3, 0), Direction::East);
        assert!((out.position - DVec3::new(1.01, 3.01, 0.5)).length() < 1e-12);
        assert!((out.velocity - DVec3::new(0.4, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn falling_body_moves_down_the_slope() {
        let body = BodyMotion::new(DVec3::ZERO, DVec3::new(0.0, -0.3, 0.0));
        let out = vertical_to_slope(body, Cell::ORIGIN, Direction::North);
        assert!((out.velocity - DVec3::new(0.0, 0.0, 0.3)).length() < 1e-12);
    }

    #[test]
    fn slope_body_climbs_toward_wall() {
        let body = BodyMotion::new(DVec3::ZERO, DVec3::new(0.3, 0.3, 0.0));
        let out = slope_to_vertical(body, Cell::new(0, 1, 0), Direction::East);
        assert!((out.velocity.y - body.speed()).abs() < 1e-12);
        assert!((out.position.x - 0.99).abs() < 1e-12);
        assert!((out.position.y - 1.01).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn speed_is_preserved(
            vx in -2.0f64..2.0, vy in -2.0f64..2.0, vz in -2.0f64..2.0,
            i in 0usize..4,
        ) {
            let body = BodyMotion::new(DVec3::ZERO, DVec3::new(vx, vy, vz));
            let d = Direction::CARDINALS[i];
            let a = vertical_to_slope(body, Cell::ORIGIN, d);
            let b = slope_to_vertical(body, Cell::ORIGIN, d);
            prop_assert!((a.speed() - body.speed()).abs() < 1e-9);
            prop_assert!((b.speed() - body.speed()).abs() < 1e-9);
        }
    }
}
