//! Swept circle vs point and circle vs circle
//!
//! A moving point touches a moving circle when the squared relative
//! distance equals the squared radius. Under constant velocities that is a
//! quadratic in time, so the first contact is its smaller non-negative
//! root. Two moving circles reduce to the same problem with the radii
//! summed (centers at distance r1 + r2 is the same condition as a point on
//! a circle of radius r1 + r2).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A pending circle impact: the quadratic whose smaller root is the time
/// of first contact.
///
/// Exists only for approaching pairs with a real root, so
/// [`time_of_impact`](Self::time_of_impact) is always meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleImpact {
    /// Leading coefficient: squared relative speed (≥ 0)
    pub a: f32,
    /// Linear coefficient: twice dot(relative position, relative velocity)
    pub b: f32,
    /// Discriminant b² − 4ac (≥ 0)
    pub d: f32,
}

impl CircleImpact {
    /// Time until first contact, relative to the queried positions.
    ///
    /// Selects the smaller non-negative root: the √d term is subtracted
    /// when `a > 0` (the far tangent is the larger root).
    pub fn time_of_impact(&self) -> f32 {
        let sign = if self.a > 0.0 { -1.0 } else { 1.0 };
        (-self.b + self.d.sqrt() * sign) / (2.0 * self.a)
    }
}

/// Shared quadratic for every swept-circle query.
///
/// `cp` is the position of the moving point relative to the circle center,
/// `dv` its relative velocity, `radius` the effective contact radius.
fn swept_circle(cp: Vec2, dv: Vec2, radius: f32) -> Option<CircleImpact> {
    // A pair that is not strictly approaching can never newly touch under
    // constant velocity.
    if cp.dot(dv) >= 0.0 {
        return None;
    }

    let a = dv.length_squared();
    let b = 2.0 * cp.dot(dv);
    let c = cp.length_squared() - radius * radius;
    let d = b * b - 4.0 * a * c;

    if d >= 0.0 { Some(CircleImpact { a, b, d }) } else { None }
}

/// Will a moving point touch a moving circle?
///
/// The horizon is unbounded: the caller bounds the returned time to its
/// own step. `None` means the pair is separating or passes clear.
pub fn circle_point_collision(
    point_pos: Vec2,
    point_vel: Vec2,
    circle_pos: Vec2,
    circle_vel: Vec2,
    radius: f32,
) -> Option<CircleImpact> {
    swept_circle(point_pos - circle_pos, point_vel - circle_vel, radius)
}

/// Will two moving circles touch?
///
/// Minkowski reduction of [`circle_point_collision`]: identical to treating
/// circle 1's center as a point against circle 2 grown to `radius1 + radius2`.
pub fn circle_circle_collision(
    pos1: Vec2,
    vel1: Vec2,
    radius1: f32,
    pos2: Vec2,
    vel2: Vec2,
    radius2: f32,
) -> Option<CircleImpact> {
    swept_circle(pos1 - pos2, vel1 - vel2, radius1 + radius2)
}
