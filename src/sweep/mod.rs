//! Narrow-phase continuous collision detection
//!
//! Each solver runs in two or more stages: an occurrence query that either
//! rules the collision out (`None`) or returns a pending-impact value, and
//! follow-up stages that are methods on that value. A later stage can only
//! be reached by holding the value the earlier stage produced, so "time
//! queried without a hit" is unrepresentable rather than a runtime assert.
//!
//! All stages are pure and loop-free. Given the same inputs they produce
//! bit-identical outputs; the arithmetic is kept in a fixed order because
//! reordering float operations can flip the occurrence verdict for grazing
//! contacts.

pub mod circle;
pub mod segment;

pub use circle::{CircleImpact, circle_circle_collision, circle_point_collision};
pub use segment::{SegmentContact, SegmentImpact, SegmentToi, circle_segment_collision};
