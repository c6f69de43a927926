/// Local transform of a rig node (translation + rotation, no scale).

use glam::{Mat4, Quat, Vec3};

/// Local-space offset of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pure translation
    pub fn from_position(position: Vec3) -> Self {
        Self { position, rotation: Quat::IDENTITY }
    }

    /// Parent-from-local matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }
}

/// Rotation about +Y by `degrees` (positive turns +Z toward +X).
pub fn yaw_rotation(degrees: f32) -> Quat {
    Quat::from_rotation_y(degrees.to_radians())
}

/// Rotation about +X by `degrees` (positive tilts +Z toward -Y, i.e. looks down).
pub fn pitch_rotation(degrees: f32) -> Quat {
    Quat::from_rotation_x(degrees.to_radians())
}

/// Yaw (degrees) of a rotation, ignoring pitch and roll.
pub fn yaw_of(rotation: Quat) -> f32 {
    let (yaw, _, _) = rotation.to_euler(glam::EulerRot::YXZ);
    yaw.to_degrees()
}

/// Pitch (degrees) of a rotation, ignoring yaw and roll.
pub fn pitch_of(rotation: Quat) -> f32 {
    let (_, pitch, _) = rotation.to_euler(glam::EulerRot::YXZ);
    pitch.to_degrees()
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
