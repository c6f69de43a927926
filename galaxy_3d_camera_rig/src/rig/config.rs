/// Rig configuration — authoring-time tunables, read-only to the tick.

use crate::collision::LayerMask;
use crate::error::Result;
use crate::rig_err;

/// Tunables of a third-person rig.
///
/// Angles are in degrees. Pitch is positive when looking down, so
/// `look_up_max_angle` is usually negative and `look_down_min_angle`
/// positive.
#[derive(Debug, Clone, PartialEq)]
pub struct RigConfig {
    // ===== SMOOTHING =====
    /// Max Root displacement per second toward the follow target
    pub move_lerp_speed: f32,
    /// Zoom interpolation rate; also scales raw zoom input
    pub zoom_lerp_speed: f32,
    /// Max yaw step (degrees) per tick
    pub horizontal_rotation_lerp_speed: f32,
    /// Max pitch step (degrees) per tick
    pub vertical_rotation_lerp_speed: f32,
    /// Interpolation rate of the clip-resolved node positions
    pub clip_lerp_speed: f32,
    /// Multiply the rotation steps by the frame time.
    ///
    /// Off by default: the yaw/pitch steps are a fixed angle per tick.
    pub scale_rotation_by_delta_time: bool,

    // ===== LOOK INPUT =====
    pub horizontal_sensitivity: f32,
    pub vertical_sensitivity: f32,
    pub invert_horizontal: bool,
    pub invert_vertical: bool,
    /// Poll the installed `InputProvider` each tick
    pub use_input: bool,

    // ===== BOUNDS =====
    /// Closest zoom distance (positive magnitude)
    pub min_zoom_in: f32,
    /// Farthest zoom distance (positive magnitude)
    pub max_zoom_out: f32,
    /// Lowest pitch (looking up)
    pub look_up_max_angle: f32,
    /// Highest pitch (looking down)
    pub look_down_min_angle: f32,

    // ===== CLIPPING =====
    pub forward_clip_radius: f32,
    pub horizontal_clip_radius: f32,
    /// Distance the resolved clip point is pushed out along the hit normal
    pub clip_point_offset: f32,
    /// Layers the clip probes collide with
    pub collision_layers: LayerMask,

    // ===== AIM QUERIES =====
    /// Max distance of screen-center / offset aim casts
    pub aim_max_distance: f32,
    /// Distance of the fallback aim point when every cast misses
    pub aim_fallback_distance: f32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            move_lerp_speed: 10.0,
            zoom_lerp_speed: 5.0,
            horizontal_rotation_lerp_speed: 10.0,
            vertical_rotation_lerp_speed: 10.0,
            clip_lerp_speed: 20.0,
            scale_rotation_by_delta_time: false,
            horizontal_sensitivity: 1.0,
            vertical_sensitivity: 1.0,
            invert_horizontal: false,
            invert_vertical: false,
            use_input: false,
            min_zoom_in: 1.0,
            max_zoom_out: 30.0,
            look_up_max_angle: -60.0,
            look_down_min_angle: 90.0,
            forward_clip_radius: 0.2,
            horizontal_clip_radius: 0.2,
            clip_point_offset: 0.1,
            collision_layers: LayerMask::EVERYTHING,
            aim_max_distance: 1000.0,
            aim_fallback_distance: 100.0,
        }
    }
}

impl RigConfig {
    const SOURCE: &'static str = "galaxy3d::RigConfig";

    /// Check the tunables for values the tick cannot work with.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("move_lerp_speed", self.move_lerp_speed),
            ("zoom_lerp_speed", self.zoom_lerp_speed),
            ("horizontal_rotation_lerp_speed", self.horizontal_rotation_lerp_speed),
            ("vertical_rotation_lerp_speed", self.vertical_rotation_lerp_speed),
            ("clip_lerp_speed", self.clip_lerp_speed),
            ("min_zoom_in", self.min_zoom_in),
            ("max_zoom_out", self.max_zoom_out),
            ("forward_clip_radius", self.forward_clip_radius),
            ("horizontal_clip_radius", self.horizontal_clip_radius),
            ("aim_max_distance", self.aim_max_distance),
            ("aim_fallback_distance", self.aim_fallback_distance),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(rig_err!(Self::SOURCE, ConfigurationError,
                    "{} must be a finite non-negative value, got {}", name, value));
            }
        }

        let finite = [
            ("horizontal_sensitivity", self.horizontal_sensitivity),
            ("vertical_sensitivity", self.vertical_sensitivity),
            ("clip_point_offset", self.clip_point_offset),
            ("look_up_max_angle", self.look_up_max_angle),
            ("look_down_min_angle", self.look_down_min_angle),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(rig_err!(Self::SOURCE, ConfigurationError,
                    "{} must be finite, got {}", name, value));
            }
        }

        if self.min_zoom_in > self.max_zoom_out {
            return Err(rig_err!(Self::SOURCE, ConfigurationError,
                "min_zoom_in ({}) is greater than max_zoom_out ({})",
                self.min_zoom_in, self.max_zoom_out));
        }
        if self.look_up_max_angle > self.look_down_min_angle {
            return Err(rig_err!(Self::SOURCE, ConfigurationError,
                "look_up_max_angle ({}) is greater than look_down_min_angle ({})",
                self.look_up_max_angle, self.look_down_min_angle));
        }
        for (name, value) in [
            ("look_up_max_angle", self.look_up_max_angle),
            ("look_down_min_angle", self.look_down_min_angle),
        ] {
            if !(-180.0..=180.0).contains(&value) {
                return Err(rig_err!(Self::SOURCE, ConfigurationError,
                    "{} must lie in [-180, 180], got {}", name, value));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
