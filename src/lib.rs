//! swept2d - continuous collision detection for 2D circular bodies
//!
//! Core modules:
//! - `sweep`: narrow-phase time-of-impact solvers (circle vs point,
//!   circle vs circle, circle vs one-sided segment)
//!
//! Instead of sampling positions and checking for overlap after the fact,
//! these solvers answer *when* two bodies moving at constant velocity first
//! touch, so a caller can advance its simulation to the exact contact
//! instant. Everything here is a pure function over `glam::Vec2` values:
//! no state, no allocation, no trigonometry.
//!
//! The solvers are a narrow-phase primitive. Pair selection, clamping the
//! time of impact to the current step, moving bodies, and collision
//! response all belong to the caller (see the `billiards` demo binary for
//! the full protocol).

pub mod sweep;

pub use sweep::{
    CircleImpact, SegmentContact, SegmentImpact, SegmentToi, circle_circle_collision,
    circle_point_collision, circle_segment_collision,
};
