/// Smoothing helpers used by the integrator stage.
///
/// Two families:
/// - rate-limited steps (`move_towards`, `move_towards_value`,
///   `move_towards_angle`): at most a fixed amount per call
/// - interpolation (`approach`, `approach_vec3`): a fraction of the
///   remaining distance per call, factor from `lerp_factor()`
///
/// Interpolated values snap onto the goal once within `SNAP_EPSILON`, so a
/// settled rig sits exactly on its fixed point.

use glam::Vec3;

/// Distance under which interpolated values snap onto their goal.
pub const SNAP_EPSILON: f32 = 1e-5;

/// Interpolation factor for a rate and a frame time, clamped to [0, 1].
pub fn lerp_factor(speed: f32, delta_time: f32) -> f32 {
    (speed * delta_time).clamp(0.0, 1.0)
}

/// Clamp a zoom to `[-max_zoom_out, -min_zoom_in]`.
pub fn clamp_zoom(zoom: f32, min_zoom_in: f32, max_zoom_out: f32) -> f32 {
    zoom.clamp(-max_zoom_out, -min_zoom_in)
}

/// Step `current` toward `target` by at most `max_delta` (linear).
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let offset = target - current;
    let distance = offset.length();
    if distance <= max_delta || distance < SNAP_EPSILON {
        return target;
    }
    current + offset / distance * max_delta
}

/// Step a scalar toward `target` by at most `max_delta`, without wrapping.
/// Used for bounded angles, where the path must stay between both ends.
pub fn move_towards_value(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        return target;
    }
    current + delta.signum() * max_delta
}

/// Wrap an angle (degrees) into [0, 360).
pub fn wrap_angle(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to 360 in f32
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest signed difference `target - current` in (-180, 180].
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Rotate `current` toward `target` (degrees) by at most `max_delta`,
/// along the shortest arc. Returns `target` itself once reachable.
pub fn move_towards_angle(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = delta_angle(current, target);
    if delta.abs() <= max_delta {
        return target;
    }
    current + delta.signum() * max_delta
}

/// Interpolate a scalar toward `target` by factor `t`.
pub fn approach(current: f32, target: f32, t: f32) -> f32 {
    let value = current + (target - current) * t;
    if (target - value).abs() < SNAP_EPSILON {
        target
    } else {
        value
    }
}

/// Interpolate a point toward `target` by factor `t`.
pub fn approach_vec3(current: Vec3, target: Vec3, t: f32) -> Vec3 {
    let value = current.lerp(target, t);
    if value.distance(target) < SNAP_EPSILON {
        target
    } else {
        value
    }
}

#[cfg(test)]
#[path = "smoothing_tests.rs"]
mod tests;
