/// Analytic collider set — a minimal `CollisionQuery` backend.
///
/// Holds spheres and half-space planes in a SlotMap with stable keys.
/// Casts are solved in closed form; the nearest hit across all colliders
/// whose layers intersect the query mask wins.

use glam::Vec3;
use slotmap::{new_key_type, SlotMap};
use super::layer_mask::LayerMask;
use super::query::{CollisionQuery, Hit};

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a Collider within a ColliderSet.
    pub struct ColliderKey;
}

// ===== SHAPES =====

/// Collider geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Solid sphere
    Sphere { center: Vec3, radius: f32 },
    /// Solid half-space `{ p | dot(normal, p) <= offset }`.
    ///
    /// `normal` points out of the solid side and must be unit length.
    Plane { normal: Vec3, offset: f32 },
}

/// A collider: shape plus the layers it lives on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub shape: ColliderShape,
    pub layers: LayerMask,
}

impl Collider {
    /// Sphere collider on the given layers.
    pub fn sphere(center: Vec3, radius: f32, layers: LayerMask) -> Self {
        Self { shape: ColliderShape::Sphere { center, radius }, layers }
    }

    /// Plane collider through `point` facing `normal`, on the given layers.
    pub fn plane(point: Vec3, normal: Vec3, layers: LayerMask) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            shape: ColliderShape::Plane { normal, offset: normal.dot(point) },
            layers,
        }
    }

    fn sweep(&self, origin: Vec3, radius: f32, direction: Vec3, max_distance: f32) -> Option<Hit> {
        match self.shape {
            ColliderShape::Sphere { center, radius: sphere_radius } => {
                sweep_sphere(center, sphere_radius, origin, radius, direction, max_distance)
            }
            ColliderShape::Plane { normal, offset } => {
                sweep_plane(normal, offset, origin, radius, direction, max_distance)
            }
        }
    }
}

/// Swept sphere against a solid sphere: a ray against the Minkowski sum.
fn sweep_sphere(
    center: Vec3,
    sphere_radius: f32,
    origin: Vec3,
    radius: f32,
    direction: Vec3,
    max_distance: f32,
) -> Option<Hit> {
    let combined = sphere_radius + radius;
    let m = origin - center;
    let c = m.length_squared() - combined * combined;
    if c <= 0.0 {
        // Starts overlapping
        return None;
    }
    let b = m.dot(direction);
    if b > 0.0 {
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let t = -b - discriminant.sqrt();
    if t < 0.0 || t > max_distance {
        return None;
    }
    let swept_center = origin + direction * t;
    let normal = (swept_center - center).normalize_or_zero();
    Some(Hit {
        point: center + normal * sphere_radius,
        normal,
        distance: t,
    })
}

/// Swept sphere against a solid half-space.
fn sweep_plane(
    normal: Vec3,
    offset: f32,
    origin: Vec3,
    radius: f32,
    direction: Vec3,
    max_distance: f32,
) -> Option<Hit> {
    let start_distance = normal.dot(origin) - offset;
    if start_distance < radius {
        // Starts overlapping or behind the surface
        return None;
    }
    let approach = -normal.dot(direction);
    if approach <= 0.0 {
        return None;
    }
    let t = (start_distance - radius) / approach;
    if t > max_distance {
        return None;
    }
    Some(Hit {
        point: origin + direction * t - normal * radius,
        normal,
        distance: t,
    })
}

// ===== COLLIDER SET =====

/// A set of static colliders answering ray and sphere casts.
#[derive(Debug, Default)]
pub struct ColliderSet {
    colliders: SlotMap<ColliderKey, Collider>,
}

impl ColliderSet {
    /// Create an empty collider set
    pub fn new() -> Self {
        Self { colliders: SlotMap::with_key() }
    }

    /// Insert a collider, returning its stable key.
    pub fn insert(&mut self, collider: Collider) -> ColliderKey {
        self.colliders.insert(collider)
    }

    /// Remove a collider. Returns it if the key was valid.
    pub fn remove(&mut self, key: ColliderKey) -> Option<Collider> {
        self.colliders.remove(key)
    }

    /// Get a collider by key.
    pub fn get(&self, key: ColliderKey) -> Option<&Collider> {
        self.colliders.get(key)
    }

    /// Get a mutable collider by key (to move dynamic obstacles).
    pub fn get_mut(&mut self, key: ColliderKey) -> Option<&mut Collider> {
        self.colliders.get_mut(key)
    }

    /// Number of colliders.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether the set has no colliders.
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl CollisionQuery for ColliderSet {
    fn cast_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<Hit> {
        self.colliders
            .values()
            .filter(|collider| collider.layers.intersects(mask))
            .filter_map(|collider| collider.sweep(origin, radius, direction, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[cfg(test)]
#[path = "collider_set_tests.rs"]
mod tests;
