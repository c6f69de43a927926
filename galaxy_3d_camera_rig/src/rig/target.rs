/// Target-state calculation.
///
/// Derives, once per tick, where the Root should go and which yaw/pitch
/// the rig should turn to. Two exclusive look modes: look-at a target
/// point, or free look driven by the look input.

use glam::{Vec2, Vec3};
use super::config::RigConfig;
use super::smoothing::wrap_angle;
use super::state::CameraState;

/// Which rule produced the rotation targets this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookMode {
    /// Look target present: absolute yaw/pitch toward it
    LookAt,
    /// Look input applied relative to the current rotation
    FreeLook,
    /// No input: targets unchanged
    Hold,
}

/// External inputs of the calculator for one tick.
#[derive(Debug, Clone, Copy)]
pub struct TargetInputs {
    pub follow_target: Option<Vec3>,
    pub look_target: Option<Vec3>,
    pub look_input: Vec2,
    /// Root world position (held when there is no follow target)
    pub root_position: Vec3,
    /// Height node world position (look-at pivot)
    pub pivot_position: Vec3,
}

/// Wrap a pitch to (-180, 180] and clamp it to the configured bounds.
///
/// The raw angle is first mapped into [0, 360); anything above 180
/// becomes negative.
pub fn clamp_pitch(raw: f32, look_up_max_angle: f32, look_down_min_angle: f32) -> f32 {
    let mut angle = raw.rem_euclid(360.0);
    if angle > 180.0 {
        angle -= 360.0;
    }
    angle.clamp(look_up_max_angle, look_down_min_angle)
}

/// Yaw and pitch (degrees) of the rotation looking from `from` to `to`.
///
/// Returns None when the points coincide.
pub fn look_at_angles(from: Vec3, to: Vec3) -> Option<(f32, f32)> {
    let direction = to - from;
    if direction.length_squared() < 1e-12 {
        return None;
    }
    let yaw = direction.x.atan2(direction.z).to_degrees();
    let horizontal = Vec2::new(direction.x, direction.z).length();
    let pitch = (-direction.y).atan2(horizontal).to_degrees();
    Some((yaw, pitch))
}

/// Update `target_position`, `target_yaw` and `target_pitch`.
pub fn update_targets(state: &mut CameraState, config: &RigConfig, inputs: &TargetInputs) -> LookMode {
    state.target_position = inputs.follow_target.unwrap_or(inputs.root_position);

    if let Some(look_target) = inputs.look_target {
        if let Some((yaw, pitch)) = look_at_angles(inputs.pivot_position, look_target) {
            state.target_yaw = wrap_angle(yaw);
            state.target_pitch = clamp_pitch(pitch, config.look_up_max_angle, config.look_down_min_angle);
        }
        return LookMode::LookAt;
    }

    if inputs.look_input != Vec2::ZERO {
        let horizontal_sign = if config.invert_horizontal { -1.0 } else { 1.0 };
        let vertical_sign = if config.invert_vertical { -1.0 } else { 1.0 };

        state.target_yaw = wrap_angle(
            state.yaw + inputs.look_input.x * config.horizontal_sensitivity * horizontal_sign,
        );
        state.target_pitch = clamp_pitch(
            state.pitch + inputs.look_input.y * config.vertical_sensitivity * vertical_sign,
            config.look_up_max_angle,
            config.look_down_min_angle,
        );
        return LookMode::FreeLook;
    }

    LookMode::Hold
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
