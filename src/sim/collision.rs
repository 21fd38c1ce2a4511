//! Collision detection and response for axis-aligned boxes
//!
//! Balls are treated as boxes. A contact reports the axis of least
//! penetration as its normal, pointing from the obstacle toward the mover.

use glam::Vec2;

use super::rect::Rect;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at collision (pointing toward the mover, for reflection)
    pub normal: Vec2,
    /// Penetration depth along the normal (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    /// True if `velocity` carries the mover into the surface
    #[inline]
    pub fn is_approaching(&self, velocity: Vec2) -> bool {
        self.hit && velocity.dot(self.normal) < 0.0
    }
}

/// Check collision between a moving box and an obstacle box
pub fn rect_collision(mover: &Rect, obstacle: &Rect) -> CollisionResult {
    let overlap = mover.overlap(obstacle);
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return CollisionResult::miss();
    }

    let offset = mover.center() - obstacle.center();
    if overlap.x < overlap.y {
        let sign = if offset.x < 0.0 { -1.0 } else { 1.0 };
        CollisionResult {
            hit: true,
            normal: Vec2::new(sign, 0.0),
            penetration: overlap.x,
        }
    } else {
        let sign = if offset.y < 0.0 { -1.0 } else { 1.0 };
        CollisionResult {
            hit: true,
            normal: Vec2::new(0.0, sign),
            penetration: overlap.y,
        }
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_collision_from_below() {
        let brick = Rect::new(Vec2::new(100.0, 100.0), Vec2::new(60.0, 15.0));
        // Ball overlaps the bottom edge of the brick by 3px
        let ball = Rect::new(Vec2::new(110.0, 112.0), Vec2::splat(20.0));

        let result = rect_collision(&ball, &brick);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::new(0.0, 1.0));
        assert!((result.penetration - 3.0).abs() < 0.001);
        assert!(result.is_approaching(Vec2::new(250.0, -250.0)));
        assert!(!result.is_approaching(Vec2::new(250.0, 250.0)));
    }

    #[test]
    fn test_collision_from_side() {
        let wall = Rect::new(Vec2::ZERO, Vec2::new(10.0, 500.0));
        let ball = Rect::new(Vec2::new(8.0, 200.0), Vec2::splat(20.0));

        let result = rect_collision(&ball, &wall);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_miss() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::new(30.0, 0.0), Vec2::splat(10.0));
        assert!(!rect_collision(&a, &b).hit);
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 40.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!((reflected.y - 40.0).abs() < 0.001);
    }

    proptest! {
        #[test]
        fn reflection_flips_normal_component_only(
            vx in -500.0f32..500.0,
            vy in -500.0f32..500.0,
            axis in 0usize..4,
        ) {
            let normal = [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y][axis];
            let v = Vec2::new(vx, vy);
            let r = reflect_velocity(v, normal);

            prop_assert!((r.dot(normal) + v.dot(normal)).abs() < 1e-3);
            let tangent = normal.perp();
            prop_assert!((r.dot(tangent) - v.dot(tangent)).abs() < 1e-3);
            prop_assert!((r.length() - v.length()).abs() < 1e-3);
        }
    }
}
