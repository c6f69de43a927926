/// Clipping resolver.
///
/// Two independent sphere casts per tick, both from the Height node:
/// - forward: toward the zoom point `(0, 0, zoom)` in XAxis space
/// - horizontal: toward the offset point `(offset, 0, 0)` in Height space
///
/// A hit yields a clip position pushed off the surface along its normal by
/// `clip_point_offset`. Degenerate casts (zero zoom, zero offset) report
/// no hit.

use glam::Vec3;
use crate::collision::{probe_sphere, CollisionQuery, Hit, LayerMask};
use crate::debug::{DebugColor, DebugDraw};
use crate::error::{Error, Result};
use crate::{rig_trace, rig_warn};
use super::config::RigConfig;
use super::node::{RigHierarchy, RigKeys};

/// Outcome of one clip probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipProbe {
    /// Something was hit between the pivot and the desired point
    pub clipping: bool,
    /// Resolved clip position (world space); the desired point when not clipping
    pub position: Vec3,
}

/// Shape of a single probe.
#[derive(Debug, Clone, Copy)]
pub struct ProbeShape {
    pub origin: Vec3,
    /// Desired (unclipped) end point
    pub desired: Vec3,
    pub radius: f32,
    pub max_distance: f32,
}

/// Cast one probe and resolve its clip position.
pub fn resolve_probe(
    query: &dyn CollisionQuery,
    shape: ProbeShape,
    mask: LayerMask,
    clip_point_offset: f32,
    debug: Option<&mut dyn DebugDraw>,
) -> ClipProbe {
    let direction = shape.desired - shape.origin;
    let hit = hit_or_none(probe_sphere(query, shape.origin, shape.radius, direction, shape.max_distance, mask));

    let probe = match hit {
        Some(hit) => ClipProbe {
            clipping: true,
            position: hit.point + hit.normal * clip_point_offset,
        },
        None => ClipProbe { clipping: false, position: shape.desired },
    };

    if let Some(debug) = debug {
        let color = if probe.clipping { DebugColor::BLOCKED } else { DebugColor::CLEAR };
        debug.line(shape.origin, shape.desired, color);
        debug.wire_sphere(shape.desired, shape.radius, color);
        if probe.clipping {
            debug.wire_sphere(probe.position, shape.radius, DebugColor::CLIP_POINT);
        }
    }

    probe
}

/// A failed cast counts as no hit. Degenerate shapes are expected while
/// zoom or offset pass through zero; anything else is worth a warning.
fn hit_or_none(result: Result<Option<Hit>>) -> Option<Hit> {
    match result {
        Ok(hit) => hit,
        Err(Error::DegenerateProbe(reason)) => {
            rig_trace!("galaxy3d::Clipping", "Probe skipped: {}", reason);
            None
        }
        Err(err) => {
            rig_warn!("galaxy3d::Clipping", "Cast failed, treated as no hit: {}", err);
            None
        }
    }
}

/// Probe shape along the zoom axis.
pub fn forward_probe_shape(hierarchy: &RigHierarchy, keys: &RigKeys, zoom: f32, config: &RigConfig) -> ProbeShape {
    ProbeShape {
        origin: hierarchy.world_position(keys.height),
        desired: hierarchy.transform_point(keys.x_axis, Vec3::new(0.0, 0.0, zoom)),
        radius: config.forward_clip_radius,
        max_distance: zoom.abs(),
    }
}

/// Probe shape along the shoulder-offset axis.
pub fn horizontal_probe_shape(
    hierarchy: &RigHierarchy,
    keys: &RigKeys,
    horizontal_offset: f32,
    config: &RigConfig,
) -> ProbeShape {
    ProbeShape {
        origin: hierarchy.world_position(keys.height),
        desired: hierarchy.transform_point(keys.height, Vec3::new(horizontal_offset, 0.0, 0.0)),
        radius: config.horizontal_clip_radius,
        max_distance: horizontal_offset.abs(),
    }
}

#[cfg(test)]
#[path = "clipping_tests.rs"]
mod tests;
