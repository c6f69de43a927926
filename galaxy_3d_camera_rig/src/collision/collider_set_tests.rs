use glam::Vec3;
use super::*;

const EPS: f32 = 1e-4;

fn assert_vec_near(actual: Vec3, expected: Vec3) {
    assert!(
        (actual - expected).length() < EPS,
        "expected {:?}, got {:?}", expected, actual
    );
}

fn wall_at_z(z: f32, layers: LayerMask) -> Collider {
    Collider::plane(Vec3::new(0.0, 0.0, z), Vec3::new(0.0, 0.0, -1.0), layers)
}

// ============================================================================
// Container
// ============================================================================

#[test]
fn test_insert_remove() {
    let mut set = ColliderSet::new();
    assert!(set.is_empty());

    let key = set.insert(Collider::sphere(Vec3::ZERO, 1.0, LayerMask::DEFAULT));
    assert_eq!(set.len(), 1);
    assert!(set.get(key).is_some());

    let removed = set.remove(key).unwrap();
    assert_eq!(removed.layers, LayerMask::DEFAULT);
    assert!(set.get(key).is_none());
    assert!(set.remove(key).is_none());
}

#[test]
fn test_get_mut_moves_collider() {
    let mut set = ColliderSet::new();
    let key = set.insert(Collider::sphere(Vec3::new(0.0, 0.0, 100.0), 1.0, LayerMask::DEFAULT));
    assert!(set.cast_ray(Vec3::ZERO, Vec3::Z, 10.0, LayerMask::DEFAULT).is_none());

    set.get_mut(key).unwrap().shape = ColliderShape::Sphere { center: Vec3::new(0.0, 0.0, 5.0), radius: 1.0 };
    let hit = set.cast_ray(Vec3::ZERO, Vec3::Z, 10.0, LayerMask::DEFAULT).unwrap();
    assert!((hit.distance - 4.0).abs() < EPS);
}

// ============================================================================
// Sphere casts against spheres
// ============================================================================

#[test]
fn test_sphere_cast_hits_sphere() {
    let mut set = ColliderSet::new();
    set.insert(Collider::sphere(Vec3::new(0.0, 0.0, 10.0), 1.0, LayerMask::DEFAULT));

    let hit = set.cast_sphere(Vec3::ZERO, 0.5, Vec3::Z, 20.0, LayerMask::DEFAULT).unwrap();

    assert!((hit.distance - 8.5).abs() < EPS);
    assert_vec_near(hit.normal, Vec3::new(0.0, 0.0, -1.0));
    assert_vec_near(hit.point, Vec3::new(0.0, 0.0, 9.0));
}

#[test]
fn test_sphere_cast_respects_max_distance() {
    let mut set = ColliderSet::new();
    set.insert(Collider::sphere(Vec3::new(0.0, 0.0, 10.0), 1.0, LayerMask::DEFAULT));

    assert!(set.cast_sphere(Vec3::ZERO, 0.5, Vec3::Z, 8.0, LayerMask::DEFAULT).is_none());
}

#[test]
fn test_sphere_cast_misses_to_the_side() {
    let mut set = ColliderSet::new();
    set.insert(Collider::sphere(Vec3::new(3.0, 0.0, 10.0), 1.0, LayerMask::DEFAULT));

    assert!(set.cast_sphere(Vec3::ZERO, 0.5, Vec3::Z, 20.0, LayerMask::DEFAULT).is_none());
}

#[test]
fn test_sphere_cast_grazes_with_radius() {
    let mut set = ColliderSet::new();
    set.insert(Collider::sphere(Vec3::new(1.2, 0.0, 10.0), 1.0, LayerMask::DEFAULT));

    // A ray misses, a fat sphere does not
    assert!(set.cast_ray(Vec3::ZERO, Vec3::Z, 20.0, LayerMask::DEFAULT).is_none());
    assert!(set.cast_sphere(Vec3::ZERO, 0.5, Vec3::Z, 20.0, LayerMask::DEFAULT).is_some());
}

#[test]
fn test_cast_ignores_sphere_behind_origin() {
    let mut set = ColliderSet::new();
    set.insert(Collider::sphere(Vec3::new(0.0, 0.0, -10.0), 1.0, LayerMask::DEFAULT));

    assert!(set.cast_sphere(Vec3::ZERO, 0.5, Vec3::Z, 20.0, LayerMask::DEFAULT).is_none());
}

#[test]
fn test_cast_ignores_initially_overlapping_sphere() {
    let mut set = ColliderSet::new();
    set.insert(Collider::sphere(Vec3::ZERO, 2.0, LayerMask::DEFAULT));

    assert!(set.cast_sphere(Vec3::ZERO, 0.5, Vec3::Z, 20.0, LayerMask::DEFAULT).is_none());
}

// ============================================================================
// Sphere casts against planes
// ============================================================================

#[test]
fn test_sphere_cast_hits_plane() {
    let mut set = ColliderSet::new();
    set.insert(wall_at_z(10.0, LayerMask::DEFAULT));

    let hit = set.cast_sphere(Vec3::ZERO, 0.5, Vec3::Z, 20.0, LayerMask::DEFAULT).unwrap();

    assert!((hit.distance - 9.5).abs() < EPS);
    assert_vec_near(hit.point, Vec3::new(0.0, 0.0, 10.0));
    assert_vec_near(hit.normal, Vec3::new(0.0, 0.0, -1.0));
}

#[test]
fn test_ray_hits_plane_at_angle() {
    let mut set = ColliderSet::new();
    set.insert(Collider::plane(Vec3::ZERO, Vec3::Y, LayerMask::DEFAULT));

    let direction = Vec3::new(1.0, -1.0, 0.0).normalize();
    let hit = set.cast_ray(Vec3::new(0.0, 2.0, 0.0), direction, 10.0, LayerMask::DEFAULT).unwrap();

    assert_vec_near(hit.point, Vec3::new(2.0, 0.0, 0.0));
    assert!((hit.distance - 2.0 * 2.0_f32.sqrt()).abs() < EPS);
}

#[test]
fn test_cast_moving_away_from_plane_misses() {
    let mut set = ColliderSet::new();
    set.insert(wall_at_z(10.0, LayerMask::DEFAULT));

    assert!(set.cast_sphere(Vec3::ZERO, 0.5, -Vec3::Z, 20.0, LayerMask::DEFAULT).is_none());
}

// ============================================================================
// Layers and nearest hit
// ============================================================================

#[test]
fn test_cast_filters_by_layer() {
    let mut set = ColliderSet::new();
    set.insert(wall_at_z(5.0, LayerMask::PLAYER));

    assert!(set.cast_ray(Vec3::ZERO, Vec3::Z, 20.0, LayerMask::DEFAULT).is_none());
    assert!(set.cast_ray(Vec3::ZERO, Vec3::Z, 20.0, LayerMask::PLAYER).is_some());
    assert!(set.cast_ray(Vec3::ZERO, Vec3::Z, 20.0, LayerMask::EVERYTHING - LayerMask::PLAYER).is_none());
}

#[test]
fn test_cast_returns_nearest_hit() {
    let mut set = ColliderSet::new();
    set.insert(wall_at_z(12.0, LayerMask::DEFAULT));
    set.insert(Collider::sphere(Vec3::new(0.0, 0.0, 6.0), 1.0, LayerMask::ENVIRONMENT));
    set.insert(wall_at_z(9.0, LayerMask::DEFAULT));

    let hit = set.cast_ray(Vec3::ZERO, Vec3::Z, 20.0, LayerMask::EVERYTHING).unwrap();
    assert!((hit.distance - 5.0).abs() < EPS);

    let hit = set.cast_ray(Vec3::ZERO, Vec3::Z, 20.0, LayerMask::DEFAULT).unwrap();
    assert!((hit.distance - 9.0).abs() < EPS);
}
