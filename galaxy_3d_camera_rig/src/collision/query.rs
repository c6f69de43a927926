/// Collision query strategy.
///
/// The rig delegates every shape cast to a `CollisionQuery` supplied by
/// the caller, so it stays agnostic to the physics backend.

use glam::Vec3;
use crate::error::{Error, Result};
use super::layer_mask::LayerMask;

/// Casts shorter than this (or with a shorter direction) are degenerate.
pub const MIN_PROBE_DISTANCE: f32 = 1e-6;

/// Result of a successful cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Contact point on the hit surface (world space)
    pub point: Vec3,
    /// Surface normal at the contact point (unit length)
    pub normal: Vec3,
    /// Distance travelled along the cast direction before contact
    pub distance: f32,
}

/// Strategy for single-shot shape casts against a layer-masked world.
///
/// `direction` is expected to be unit length. Implementations ignore
/// colliders the shape already overlaps at `origin`.
pub trait CollisionQuery {
    /// Sweep a sphere of `radius` from `origin` along `direction`.
    fn cast_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<Hit>;

    /// Cast a ray. Defaults to a zero-radius sphere cast.
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<Hit> {
        self.cast_sphere(origin, 0.0, direction, max_distance, mask)
    }
}

/// No-op collision query — nothing is ever hit.
///
/// Useful for open scenes or when clipping is not wanted.
pub struct NoCollision;

impl CollisionQuery for NoCollision {
    fn cast_sphere(
        &self,
        _origin: Vec3,
        _radius: f32,
        _direction: Vec3,
        _max_distance: f32,
        _mask: LayerMask,
    ) -> Option<Hit> {
        None
    }
}

/// Validate and run a sphere cast.
///
/// `direction` need not be normalized. Returns `Error::DegenerateProbe`
/// when the distance or direction is zero (or not finite); callers that
/// treat degenerate probes as "no hit" match on it.
pub fn probe_sphere(
    query: &dyn CollisionQuery,
    origin: Vec3,
    radius: f32,
    direction: Vec3,
    max_distance: f32,
    mask: LayerMask,
) -> Result<Option<Hit>> {
    if !max_distance.is_finite() || max_distance < MIN_PROBE_DISTANCE {
        return Err(Error::DegenerateProbe(format!(
            "cast distance {} is too short", max_distance
        )));
    }
    let length = direction.length();
    if !length.is_finite() || length < MIN_PROBE_DISTANCE {
        return Err(Error::DegenerateProbe(format!(
            "cast direction {:?} has no length", direction
        )));
    }
    let unit = direction / length;
    if radius > 0.0 {
        Ok(query.cast_sphere(origin, radius, unit, max_distance, mask))
    } else {
        Ok(query.cast_ray(origin, unit, max_distance, mask))
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
