use glam::Vec3;
use crate::collision::{Collider, ColliderSet, LayerMask, NoCollision};
use super::*;

fn query(radius: f32) -> AimQuery {
    AimQuery {
        origin: Vec3::ZERO,
        direction: Vec3::Z,
        mask: LayerMask::EVERYTHING,
        radius,
        max_distance: 1000.0,
        fallback_distance: 100.0,
    }
}

// ============================================================================
// Cast chain
// ============================================================================

#[test]
fn test_ray_hit_wins() {
    let mut world = ColliderSet::new();
    world.insert(Collider::sphere(Vec3::new(0.0, 0.0, 10.0), 1.0, LayerMask::DEFAULT));

    let point = aim_point(&world, &query(0.5));
    assert!((point - Vec3::new(0.0, 0.0, 9.0)).length() < 1e-4);
}

#[test]
fn test_sphere_cast_catches_near_miss() {
    let center = Vec3::new(1.5, 0.0, 10.0);
    let mut world = ColliderSet::new();
    world.insert(Collider::sphere(center, 1.0, LayerMask::DEFAULT));

    // The ray passes 1.5 from the center, the sphere cast of radius 1 does not
    let point = aim_point(&world, &query(1.0));
    assert!((point.distance(center) - 1.0).abs() < 1e-4);

    // Without a radius only the fallback is left
    assert_eq!(aim_point(&world, &query(0.0)), Vec3::new(0.0, 0.0, 100.0));
}

#[test]
fn test_fallback_point_when_nothing_hit() {
    assert_eq!(aim_point(&NoCollision, &query(0.5)), Vec3::new(0.0, 0.0, 100.0));
}

#[test]
fn test_masked_out_collider_is_ignored() {
    let mut world = ColliderSet::new();
    world.insert(Collider::sphere(Vec3::new(0.0, 0.0, 10.0), 1.0, LayerMask::PLAYER));

    let q = AimQuery { mask: LayerMask::ENVIRONMENT, ..query(0.5) };
    assert_eq!(aim_point(&world, &q), Vec3::new(0.0, 0.0, 100.0));
}

#[test]
fn test_direction_is_normalized() {
    let q = AimQuery { direction: Vec3::new(0.0, 0.0, 7.0), ..query(0.0) };
    assert_eq!(aim_point(&NoCollision, &q), Vec3::new(0.0, 0.0, 100.0));
}

#[test]
fn test_zero_direction_returns_origin() {
    let q = AimQuery { origin: Vec3::ONE, direction: Vec3::ZERO, ..query(0.5) };
    assert_eq!(aim_point(&NoCollision, &q), Vec3::ONE);
}
