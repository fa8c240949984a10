//! Swept circle vs one-sided directed segment
//!
//! The tricky part of the crate: a moving circle against a moving segment
//! that is solid from one side only.
//!
//! Orientation contract: for a segment `p1 -> p2` with `dr = p2 - p1`, the
//! guarded (open) side is the one the perpendicular `(-dr.y, dr.x)` points
//! into. A circle is only reported when it sits on that side and presses
//! against it; approaches from behind pass through. Reversing the endpoint
//! order flips which side is solid, so a caller fencing in a region winds
//! its boundary consistently - counter-clockwise in y-up coordinates puts
//! the interior on the guarded side of every edge (the `billiards` demo
//! winds its cushions this way).
//!
//! The query runs in four stages, each a method on the previous stage's
//! value: occurrence, time of impact, contact point, and the on-track
//! check. The first three treat the segment as an infinite line; a contact
//! beyond the endpoints is rejected only by the final stage, which the
//! caller must therefore not skip.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A pending circle/segment impact.
///
/// Exists only when the segment is non-degenerate, the circle approaches
/// from the guarded side, and the relative motion actually crosses the
/// line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentImpact {
    /// Segment direction, `p2 - p1`
    pub dr: Vec2,
    /// Determinant of the relative motion; divisor of the time solve
    pub denominator: f32,
}

/// Time of impact plus the cached squared segment length the contact
/// projection needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentToi {
    /// Time of first contact
    pub dt: f32,
    /// Squared length of the segment direction
    pub dr_squared: f32,
}

/// Contact point together with the segment endpoints advanced to the
/// impact instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentContact {
    /// Circle center projected onto the advanced segment's line
    pub point: Vec2,
    /// `p1` advanced to the impact instant
    pub r1: Vec2,
    /// `p2` advanced to the impact instant
    pub r2: Vec2,
}

/// Will a moving circle hit the guarded side of a moving segment?
///
/// `None` when the segment is degenerate (`p1 == p2`), when the circle is
/// not moving into the guarded side, when it already lies on or past the
/// solid side, or when the relative motion never crosses the line. The
/// circle radius plays no role yet; it enters at the time stage.
pub fn circle_segment_collision(
    p1: Vec2,
    p2: Vec2,
    seg_vel: Vec2,
    circle_pos: Vec2,
    circle_vel: Vec2,
) -> Option<SegmentImpact> {
    let dr = p2 - p1;
    if dr.x == 0.0 && dr.y == 0.0 {
        return None;
    }

    // Perpendicular into the guarded side; see the module docs for the
    // winding contract.
    let guard = Vec2::new(-dr.y, dr.x);
    let vel_diff = circle_vel - seg_vel;
    if vel_diff.dot(guard) >= 0.0 || (p1 - circle_pos).dot(guard) > 0.0 {
        return None;
    }

    let denominator =
        dr.y * (seg_vel.x - circle_vel.x) + dr.x * (circle_vel.y - seg_vel.y);
    if denominator == 0.0 {
        // Relative motion parallel to the line: never crosses it.
        return None;
    }

    Some(SegmentImpact { dr, denominator })
}

impl SegmentImpact {
    /// Time until the circle first touches the line.
    ///
    /// `circle_pos` and `p1` are the same positions the occurrence query
    /// saw; `radius` offsets the contact by the circle's size. The sign of
    /// the radius term is chosen against the denominator so the near
    /// tangent point wins, not the far one.
    pub fn time_of_impact(&self, circle_pos: Vec2, p1: Vec2, radius: f32) -> SegmentToi {
        let dr_squared = self.dr.dot(self.dr);
        let plus_minus = radius * dr_squared.sqrt();
        let p1_to_circle = circle_pos - p1;
        let rest_numerator = self.dr.y * p1_to_circle.x - self.dr.x * p1_to_circle.y;
        let sign = if self.denominator > 0.0 { -1.0 } else { 1.0 };

        SegmentToi {
            dt: (rest_numerator + plus_minus * sign) / self.denominator,
            dr_squared,
        }
    }
}

impl SegmentToi {
    /// Contact point at the impact instant.
    ///
    /// Advances both endpoints and the circle center by `dt`, then projects
    /// the center onto the advanced line. The advanced endpoints ride along
    /// in the result for the on-track check.
    pub fn contact(
        &self,
        p1: Vec2,
        p2: Vec2,
        seg_vel: Vec2,
        circle_pos: Vec2,
        circle_vel: Vec2,
    ) -> SegmentContact {
        let r1 = p1 + seg_vel * self.dt;
        let r2 = p2 + seg_vel * self.dt;
        let c = circle_pos + circle_vel * self.dt;

        let along = (c - r1).dot(r2 - r1);
        SegmentContact {
            point: Vec2::new(
                r1.x + (r2.x - r1.x) * along / self.dr_squared,
                r1.y + (r2.y - r1.y) * along / self.dr_squared,
            ),
            r1,
            r2,
        }
    }
}

impl SegmentContact {
    /// Does the contact point lie within the advanced segment?
    ///
    /// The earlier stages solve against the infinite line; a circle that
    /// crosses the line beyond an endpoint produces a valid time and point
    /// but fails here. Membership is the advanced endpoints' axis-aligned
    /// bounding box.
    pub fn on_track(&self) -> bool {
        let (min_x, max_x) = if self.r1.x > self.r2.x {
            (self.r2.x, self.r1.x)
        } else {
            (self.r1.x, self.r2.x)
        };
        let (min_y, max_y) = if self.r1.y > self.r2.y {
            (self.r2.y, self.r1.y)
        } else {
            (self.r1.y, self.r2.y)
        };

        self.point.x >= min_x
            && self.point.x <= max_x
            && self.point.y >= min_y
            && self.point.y <= max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_circle_hits_segment_from_guarded_side() {
        // Segment (5,0)->(-5,0) guards the lower half-plane; unit circle at
        // (0,-5) rising at 1 touches the line at (0,0) after 4s.
        let p1 = Vec2::new(5.0, 0.0);
        let p2 = Vec2::new(-5.0, 0.0);
        let circle_pos = Vec2::new(0.0, -5.0);
        let circle_vel = Vec2::new(0.0, 1.0);

        let impact = circle_segment_collision(p1, p2, Vec2::ZERO, circle_pos, circle_vel)
            .expect("approach from the guarded side must collide");
        let toi = impact.time_of_impact(circle_pos, p1, 1.0);
        assert_eq!(toi.dt, 4.0);

        let contact = toi.contact(p1, p2, Vec2::ZERO, circle_pos, circle_vel);
        assert_eq!(contact.point, Vec2::ZERO);
        assert_eq!(contact.r1, p1);
        assert_eq!(contact.r2, p2);
        assert!(contact.on_track());
    }

    #[test]
    fn test_reversed_endpoints_flip_the_solid_side() {
        // Same circle and motion as above, endpoints swapped: the circle now
        // approaches from behind the wall.
        let impact = circle_segment_collision(
            Vec2::new(-5.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::ZERO,
            Vec2::new(0.0, -5.0),
            Vec2::new(0.0, 1.0),
        );
        assert!(impact.is_none());
    }

    #[test]
    fn test_degenerate_segment_never_collides() {
        let p = Vec2::new(2.0, 3.0);
        let impact = circle_segment_collision(
            p,
            p,
            Vec2::ZERO,
            Vec2::new(0.0, -5.0),
            Vec2::new(0.0, 1.0),
        );
        assert!(impact.is_none());
    }

    #[test]
    fn test_circle_moving_away_never_collides() {
        let impact = circle_segment_collision(
            Vec2::new(5.0, 0.0),
            Vec2::new(-5.0, 0.0),
            Vec2::ZERO,
            Vec2::new(0.0, -5.0),
            Vec2::new(0.0, -1.0),
        );
        assert!(impact.is_none());
    }

    #[test]
    fn test_circle_already_past_the_wall() {
        // Circle above the segment's line while the wall guards from below.
        let impact = circle_segment_collision(
            Vec2::new(5.0, 0.0),
            Vec2::new(-5.0, 0.0),
            Vec2::ZERO,
            Vec2::new(0.0, 5.0),
            Vec2::new(0.0, -1.0),
        );
        assert!(impact.is_none());
    }

    #[test]
    fn test_contact_beyond_endpoint_fails_on_track() {
        // Circle crosses the infinite extension at x=10, past the (5,0) end:
        // time and point solve fine, the membership check rejects it.
        let p1 = Vec2::new(5.0, 0.0);
        let p2 = Vec2::new(-5.0, 0.0);
        let circle_pos = Vec2::new(10.0, -5.0);
        let circle_vel = Vec2::new(0.0, 1.0);

        let impact = circle_segment_collision(p1, p2, Vec2::ZERO, circle_pos, circle_vel)
            .expect("the infinite line is still crossed");
        let toi = impact.time_of_impact(circle_pos, p1, 1.0);
        assert_eq!(toi.dt, 4.0);

        let contact = toi.contact(p1, p2, Vec2::ZERO, circle_pos, circle_vel);
        assert_eq!(contact.point, Vec2::new(10.0, 0.0));
        assert!(!contact.on_track());
    }

    #[test]
    fn test_moving_wall_hits_stationary_circle() {
        // Wall guarding downward, sweeping down at 1 onto a circle at rest
        // 5 below its line: contact after 4s, one radius above the center.
        let p1 = Vec2::new(5.0, 0.0);
        let p2 = Vec2::new(-5.0, 0.0);
        let seg_vel = Vec2::new(0.0, -1.0);
        let circle_pos = Vec2::new(0.0, -5.0);

        let impact = circle_segment_collision(p1, p2, seg_vel, circle_pos, Vec2::ZERO)
            .expect("wall sweeping onto the circle must collide");
        let toi = impact.time_of_impact(circle_pos, p1, 1.0);
        assert_eq!(toi.dt, 4.0);

        let contact = toi.contact(p1, p2, seg_vel, circle_pos, Vec2::ZERO);
        assert_eq!(contact.point, Vec2::new(0.0, -4.0));
        assert!(contact.on_track());
    }

    #[test]
    fn test_advanced_endpoints_follow_the_wall() {
        let p1 = Vec2::new(5.0, 0.0);
        let p2 = Vec2::new(-5.0, 0.0);
        let seg_vel = Vec2::new(0.0, -1.0);
        let circle_pos = Vec2::new(0.0, -5.0);

        let impact = circle_segment_collision(p1, p2, seg_vel, circle_pos, Vec2::ZERO)
            .expect("wall sweeping onto the circle must collide");
        let toi = impact.time_of_impact(circle_pos, p1, 1.0);
        let contact = toi.contact(p1, p2, seg_vel, circle_pos, Vec2::ZERO);

        assert_eq!(contact.r1, Vec2::new(5.0, -4.0));
        assert_eq!(contact.r2, Vec2::new(-5.0, -4.0));
    }

    fn coord() -> impl Strategy<Value = f32> {
        -100.0f32..100.0
    }

    fn vec2() -> impl Strategy<Value = Vec2> {
        (coord(), coord()).prop_map(|(x, y)| Vec2::new(x, y))
    }

    proptest! {
        /// A zero-length segment has no direction, hence no guarded side.
        #[test]
        fn prop_degenerate_segment_never_collides(
            p in vec2(), seg_vel in vec2(), circle_pos in vec2(), circle_vel in vec2(),
        ) {
            prop_assert!(
                circle_segment_collision(p, p, seg_vel, circle_pos, circle_vel).is_none()
            );
        }

        /// At most one endpoint order can report a hit for a given motion.
        #[test]
        fn prop_segment_is_one_sided(
            p1 in vec2(), p2 in vec2(), seg_vel in vec2(),
            circle_pos in vec2(), circle_vel in vec2(),
        ) {
            let forward = circle_segment_collision(p1, p2, seg_vel, circle_pos, circle_vel);
            let reversed = circle_segment_collision(p2, p1, seg_vel, circle_pos, circle_vel);
            prop_assert!(forward.is_none() || reversed.is_none());
        }

        /// The contact point always lies on the advanced segment's line.
        #[test]
        fn prop_contact_point_is_on_the_line(
            p1 in vec2(), p2 in vec2(), seg_vel in vec2(),
            circle_pos in vec2(), circle_vel in vec2(), radius in 0.1f32..10.0,
        ) {
            if let Some(impact) =
                circle_segment_collision(p1, p2, seg_vel, circle_pos, circle_vel)
            {
                let toi = impact.time_of_impact(circle_pos, p1, radius);
                // Near-parallel motion yields enormous times; the projection
                // identity is only meaningful while positions stay in range.
                prop_assume!(toi.dt.abs() < 1e6);
                let contact = toi.contact(p1, p2, seg_vel, circle_pos, circle_vel);
                let dr = contact.r2 - contact.r1;
                let offset = contact.point - contact.r1;
                // Cross product of collinear vectors vanishes, up to
                // rounding scaled by the operand magnitudes.
                let cross = dr.x * offset.y - dr.y * offset.x;
                let scale = dr.length().max(1.0) * offset.length().max(1.0);
                prop_assert!(cross.abs() <= scale * 1e-3);
            }
        }
    }
}
