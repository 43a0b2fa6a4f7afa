//! Collision detection between entity outlines
//!
//! Both outlines are clipped to the expanded screen region first, so entities
//! partially wrapped across a screen edge are tested on the part that is
//! actually in play.

use glam::Vec2;

use super::entity::Entity;
use super::geometry::{Rect, clip_to_rect, intersection_bounds};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the outlines overlap
    pub hit: bool,
    /// Center of the overlap region's bounding box (if hit)
    pub point: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
        }
    }
}

/// Check whether two entities' outlines overlap
///
/// Dead entities never collide.
pub fn check_collision(a: &Entity, b: &Entity) -> CollisionResult {
    if a.is_dead() || b.is_dead() {
        return CollisionResult::miss();
    }

    let clip = Rect::collision_clip();
    let region_a = clip_to_rect(a.outline(), &clip);
    let region_b = clip_to_rect(b.outline(), &clip);

    match intersection_bounds(&region_a, &region_b) {
        Some(bounds) => CollisionResult {
            hit: true,
            point: bounds.center(),
        },
        None => CollisionResult::miss(),
    }
}

/// Do `a` and `b` collide?
///
/// With `adjust`, `a` is moved so its position sits on the center of the
/// collision, which lets effects spawned from `a` appear where the hit landed.
pub fn intersects(a: &mut Entity, b: &Entity, adjust: bool) -> bool {
    let result = check_collision(a, b);
    if result.hit && adjust {
        a.set_position(result.point);
    }
    result.hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SQUARE: &[Vec2] = &[
        Vec2::new(-10.0, -10.0),
        Vec2::new(10.0, -10.0),
        Vec2::new(10.0, 10.0),
        Vec2::new(-10.0, 10.0),
    ];

    fn square_at(id: u32, x: f32, y: f32) -> Entity {
        let mut e = Entity::new(id, SQUARE, 20.0, 20.0);
        e.set_position(Vec2::new(x, y));
        e
    }

    #[test]
    fn test_overlapping_entities_collide() {
        let a = square_at(1, 100.0, 100.0);
        let b = square_at(2, 110.0, 105.0);
        let result = check_collision(&a, &b);
        assert!(result.hit);
        // Overlap spans x 110..120, y 105..120
        assert!((result.point - Vec2::new(115.0, 112.5)).length() < 1e-3);
    }

    #[test]
    fn test_separated_entities_miss() {
        let a = square_at(1, 100.0, 100.0);
        let b = square_at(2, 200.0, 100.0);
        assert!(!check_collision(&a, &b).hit);
    }

    #[test]
    fn test_adjust_moves_first_entity() {
        let mut a = square_at(1, 100.0, 100.0);
        let b = square_at(2, 110.0, 105.0);
        assert!(intersects(&mut a, &b, true));
        assert!((a.pos - Vec2::new(115.0, 112.5)).length() < 1e-3);
    }

    #[test]
    fn test_no_adjust_keeps_position() {
        let mut a = square_at(1, 100.0, 100.0);
        let b = square_at(2, 110.0, 105.0);
        assert!(intersects(&mut a, &b, false));
        assert_eq!(a.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_touching_corners_do_not_collide() {
        // Outlines span 100..120 and 120..140: they meet only at (120, 120)
        let mut a = square_at(1, 100.0, 100.0);
        let b = square_at(2, 120.0, 120.0);
        assert!(!intersects(&mut a, &b, true));
        assert_eq!(a.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_far_offscreen_entities_do_not_collide() {
        // Both sit beyond the expanded clip region
        let a = square_at(1, -500.0, -500.0);
        let b = square_at(2, -500.0, -500.0);
        assert!(!check_collision(&a, &b).hit);
    }

    #[test]
    fn test_wrapped_entity_partially_offscreen_collides() {
        let a = square_at(1, -15.0, 200.0);
        let b = square_at(2, -5.0, 200.0);
        assert!(check_collision(&a, &b).hit);
    }

    proptest! {
        #[test]
        fn dead_entities_never_collide(
            ax in -200.0f32..1000.0,
            ay in -120.0f32..600.0,
            dx in -15.0f32..15.0,
            dy in -15.0f32..15.0,
            kill_first in any::<bool>(),
        ) {
            let mut a = square_at(1, ax, ay);
            let mut b = square_at(2, ax + dx, ay + dy);
            if kill_first {
                a.set_dead(true);
            } else {
                b.set_dead(true);
            }
            prop_assert!(!intersects(&mut a, &b, true));
            prop_assert!(!check_collision(&b, &a).hit);
        }
    }
}
