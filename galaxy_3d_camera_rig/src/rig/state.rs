/// Per-activation camera state.
///
/// Created by `ThirdPersonRig::activate()` from the rig's current node
/// offsets, mutated every tick, dropped on deactivation.

use glam::Vec3;

/// Mutable state of an active rig.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    /// Current zoom (CameraNode local Z, non-positive)
    pub zoom: f32,
    /// Zoom the current value approaches
    pub target_zoom: f32,
    /// Shoulder offset (HorizontalOffset local X, unsmoothed)
    pub horizontal_offset: f32,

    /// World position the Root moves toward
    pub target_position: Vec3,

    /// Current Root yaw (degrees, wrapped to [0, 360))
    pub yaw: f32,
    /// Current XAxis pitch (degrees)
    pub pitch: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,

    /// Forward probe hit something this tick
    pub forward_clipping: bool,
    /// Resolved forward clip position (world space, valid while clipping)
    pub forward_clip_position: Vec3,
    /// Horizontal probe hit something this tick
    pub horizontal_clipping: bool,
    /// Resolved horizontal clip position (world space, valid while clipping)
    pub horizontal_clip_position: Vec3,
}

impl CameraState {
    /// Seed a state from current node values; targets equal current values.
    pub fn seeded(zoom: f32, horizontal_offset: f32, position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            zoom,
            target_zoom: zoom,
            horizontal_offset,
            target_position: position,
            yaw,
            pitch,
            target_yaw: yaw,
            target_pitch: pitch,
            forward_clipping: false,
            forward_clip_position: Vec3::ZERO,
            horizontal_clipping: false,
            horizontal_clip_position: Vec3::ZERO,
        }
    }
}
