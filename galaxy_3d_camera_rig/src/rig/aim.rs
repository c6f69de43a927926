/// Aim-point queries: what the camera (or the shoulder) is looking at.

use glam::Vec3;
use crate::collision::{probe_sphere, CollisionQuery, LayerMask};

/// Parameters of one aim query.
#[derive(Debug, Clone, Copy)]
pub struct AimQuery {
    pub origin: Vec3,
    /// Cast direction (need not be normalized)
    pub direction: Vec3,
    pub mask: LayerMask,
    /// Radius of the second-chance sphere cast
    pub radius: f32,
    pub max_distance: f32,
    /// Distance of the point returned when nothing is hit
    pub fallback_distance: f32,
}

/// Resolve an aim point.
///
/// Ray first, then a sphere cast of `radius`, then the point
/// `origin + direction * fallback_distance`. A degenerate direction falls
/// back to `origin`.
pub fn aim_point(collision: &dyn CollisionQuery, query: &AimQuery) -> Vec3 {
    let Some(direction) = query.direction.try_normalize() else {
        return query.origin;
    };

    let ray = probe_sphere(collision, query.origin, 0.0, direction, query.max_distance, query.mask);
    if let Ok(Some(hit)) = ray {
        return hit.point;
    }

    if query.radius > 0.0 {
        let sphere = probe_sphere(collision, query.origin, query.radius, direction, query.max_distance, query.mask);
        if let Ok(Some(hit)) = sphere {
            return hit.point;
        }
    }

    query.origin + direction * query.fallback_distance
}

#[cfg(test)]
#[path = "aim_tests.rs"]
mod tests;
