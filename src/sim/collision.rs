//! Collision detection for circles and the screen rectangle
//!
//! Everything in the game is a circle, so contact is a distance check between
//! centres. The threshold lets enemy hits trigger at near-contact while
//! pickups need real overlap.

use glam::Vec2;

/// Distance between two circle edges (negative when overlapping)
#[inline]
pub fn circle_gap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> f32 {
    a.distance(b) - a_radius - b_radius
}

/// True when the gap between two circles is below `threshold`
#[inline]
pub fn circles_touch(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32, threshold: f32) -> bool {
    circle_gap(a, a_radius, b, b_radius) < threshold
}

/// True when a circle lies entirely outside `[0, width] x [0, height]`
pub fn fully_off_screen(pos: Vec2, radius: f32, width: f32, height: f32) -> bool {
    pos.x + radius < 0.0
        || pos.x - radius > width
        || pos.y + radius < 0.0
        || pos.y - radius > height
}

/// Reflect velocity off the screen edges.
///
/// Each component is negated when the circle touches or crosses the
/// corresponding pair of edges.
pub fn edge_bounce(pos: Vec2, vel: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    let mut vel = vel;
    if pos.x + radius > width || pos.x - radius < 0.0 {
        vel.x = -vel.x;
    }
    if pos.y + radius > height || pos.y - radius < 0.0 {
        vel.y = -vel.y;
    }
    vel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CONTACT_THRESHOLD, PICKUP_THRESHOLD};

    #[test]
    fn test_circle_gap() {
        let gap = circle_gap(Vec2::ZERO, 5.0, Vec2::new(20.0, 0.0), 5.0);
        assert!((gap - 10.0).abs() < 1e-5);

        let gap = circle_gap(Vec2::ZERO, 5.0, Vec2::new(6.0, 0.0), 5.0);
        assert!(gap < 0.0);
    }

    #[test]
    fn test_near_contact_vs_overlap() {
        // Edges half a pixel apart
        let a = Vec2::ZERO;
        let b = Vec2::new(10.5, 0.0);
        assert!(circles_touch(a, 5.0, b, 5.0, CONTACT_THRESHOLD));
        assert!(!circles_touch(a, 5.0, b, 5.0, PICKUP_THRESHOLD));

        // Exactly touching is not a pickup
        let b = Vec2::new(10.0, 0.0);
        assert!(!circles_touch(a, 5.0, b, 5.0, PICKUP_THRESHOLD));
        let b = Vec2::new(9.9, 0.0);
        assert!(circles_touch(a, 5.0, b, 5.0, PICKUP_THRESHOLD));
    }

    #[test]
    fn test_fully_off_screen() {
        assert!(fully_off_screen(Vec2::new(-50.0, 300.0), 5.0, 800.0, 600.0));
        assert!(fully_off_screen(Vec2::new(806.0, 300.0), 5.0, 800.0, 600.0));
        assert!(fully_off_screen(Vec2::new(400.0, 606.0), 5.0, 800.0, 600.0));
        // Partially visible stays
        assert!(!fully_off_screen(Vec2::new(-4.0, 300.0), 5.0, 800.0, 600.0));
        assert!(!fully_off_screen(Vec2::new(400.0, 300.0), 5.0, 800.0, 600.0));
    }

    #[test]
    fn test_edge_bounce() {
        let vel = Vec2::new(1.0, 1.0);
        // Touching the right edge flips x only
        let out = edge_bounce(Vec2::new(795.0, 300.0), vel, 15.0, 800.0, 600.0);
        assert_eq!(out, Vec2::new(-1.0, 1.0));
        // Corner flips both
        let out = edge_bounce(Vec2::new(5.0, 5.0), vel, 15.0, 800.0, 600.0);
        assert_eq!(out, Vec2::new(-1.0, -1.0));
        // Free space leaves it alone
        let out = edge_bounce(Vec2::new(400.0, 300.0), vel, 15.0, 800.0, 600.0);
        assert_eq!(out, vel);
    }
}
