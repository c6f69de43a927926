/// Third-person camera rig — public state surface and tick driver.
///
/// A `ThirdPersonRig` owns a `RigHierarchy`, its `RigConfig` and, while
/// active, a `CameraState`. Every frame the host calls:
///
/// 1. `advance(dt)`: gather input, compute target position/yaw/pitch
/// 2. `resolve(dt, collision)`: clamp, integrate, probe, write the nodes
///
/// `tick(dt, collision)` runs both. A rig that is not active is inert.
///
/// The rig never stores the host's camera; it exposes the CameraNode world
/// transform (`camera_node_transform()`, `view_matrix()`) and an optional
/// opaque `CameraHandle` the host can use to find its own camera again.

use glam::{Mat4, Vec2, Vec3};
use crate::collision::{CollisionQuery, LayerMask};
use crate::debug::DebugDraw;
use crate::error::Result;
use crate::{rig_debug, rig_err, rig_info, rig_trace, rig_warn};
use super::aim::{aim_point, AimQuery};
use super::clipping::{forward_probe_shape, horizontal_probe_shape, resolve_probe};
use super::config::RigConfig;
use super::input::{apply_input, InputAggregator, InputProvider};
use super::node::{RigHierarchy, RigKeys};
use super::smoothing::{
    approach, approach_vec3, clamp_zoom, lerp_factor, move_towards, move_towards_angle,
    move_towards_value, wrap_angle,
};
use super::state::CameraState;
use super::target::{clamp_pitch, update_targets, LookMode, TargetInputs};
use super::transform::{pitch_rotation, pitch_of, yaw_of, yaw_rotation};

/// Opaque identifier of the host camera driven by a rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraHandle(pub u64);

/// Third-person camera rig.
pub struct ThirdPersonRig {
    hierarchy: RigHierarchy,
    config: RigConfig,
    /// Outcome of the last hierarchy validation
    keys: Result<RigKeys>,
    /// Some while active
    state: Option<CameraState>,
    input: InputAggregator,
    look_mode: LookMode,

    follow_target: Option<Vec3>,
    look_target: Option<Vec3>,

    camera_handle: Option<CameraHandle>,
    debug_draw: Option<Box<dyn DebugDraw>>,
}

impl ThirdPersonRig {
    const SOURCE: &'static str = "galaxy3d::Rig";

    /// Create an inactive rig.
    ///
    /// The hierarchy is validated immediately; a malformed chain does not
    /// prevent construction but `activate()` will refuse it until fixed
    /// through `edit_hierarchy()`.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` if `config` is invalid.
    pub fn new(hierarchy: RigHierarchy, config: RigConfig) -> Result<Self> {
        config.validate()?;
        let keys = hierarchy.validate_hierarchy();

        Ok(Self {
            hierarchy,
            config,
            keys,
            state: None,
            input: InputAggregator::new(),
            look_mode: LookMode::Hold,
            follow_target: None,
            look_target: None,
            camera_handle: None,
            debug_draw: None,
        })
    }

    // ===== LIFECYCLE =====

    /// Validate the configuration and the hierarchy.
    ///
    /// Called after every authoring edit. On failure an active rig is
    /// deactivated.
    pub fn on_validate(&mut self) -> Result<()> {
        self.keys = self.hierarchy.validate_hierarchy();
        let result = self.config.validate().and(self.keys.clone().map(|_| ()));

        if result.is_err() && self.state.is_some() {
            rig_warn!(Self::SOURCE, "Rig became invalid, deactivating");
            self.deactivate();
        }
        result
    }

    /// Validate, then seed the camera state from the current node offsets.
    ///
    /// Activating an already active rig only re-validates it.
    ///
    /// # Errors
    ///
    /// `MissingReference` / `ConfigurationError` from validation; the rig
    /// stays inactive.
    pub fn activate(&mut self) -> Result<()> {
        self.on_validate()?;
        if self.state.is_some() {
            return Ok(());
        }
        let keys = self.keys.clone()?;

        let zoom = self.hierarchy.local(keys.camera_node).position.z;
        let horizontal_offset = self.hierarchy.local(keys.horizontal_offset).position.x;
        let position = self.hierarchy.world_position(keys.root);
        let yaw = wrap_angle(yaw_of(self.hierarchy.local(keys.root).rotation));
        let pitch = clamp_pitch(
            pitch_of(self.hierarchy.local(keys.x_axis).rotation),
            self.config.look_up_max_angle,
            self.config.look_down_min_angle,
        );

        self.state = Some(CameraState::seeded(zoom, horizontal_offset, position, yaw, pitch));
        self.look_mode = LookMode::Hold;
        rig_info!(Self::SOURCE, "Rig activated (zoom {:.2}, offset {:.2}, yaw {:.1}, pitch {:.1})",
            zoom, horizontal_offset, yaw, pitch);
        Ok(())
    }

    /// Drop the camera state. Node transforms keep their last values.
    pub fn deactivate(&mut self) {
        if self.state.take().is_some() {
            self.input.clear_pending();
            rig_info!(Self::SOURCE, "Rig deactivated");
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    // ===== AUTHORING =====

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` if `config` is invalid; the previous
    /// configuration is kept.
    pub fn set_config(&mut self, config: RigConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        rig_debug!(Self::SOURCE, "Configuration replaced");
        self.on_validate()
    }

    pub fn hierarchy(&self) -> &RigHierarchy {
        &self.hierarchy
    }

    /// Edit the node chain, then re-validate it.
    ///
    /// # Errors
    ///
    /// The validation error if the edited chain is malformed; an active rig
    /// is deactivated.
    pub fn edit_hierarchy<R>(&mut self, edit: impl FnOnce(&mut RigHierarchy) -> R) -> Result<R> {
        let value = edit(&mut self.hierarchy);
        self.on_validate()?;
        Ok(value)
    }

    /// Keys of the validated chain (None while the chain is malformed).
    pub fn keys(&self) -> Option<RigKeys> {
        self.keys.as_ref().ok().copied()
    }

    pub fn set_debug_draw(&mut self, debug_draw: Option<Box<dyn DebugDraw>>) {
        self.debug_draw = debug_draw;
    }

    pub fn camera_handle(&self) -> Option<CameraHandle> {
        self.camera_handle
    }

    pub fn set_camera_handle(&mut self, handle: Option<CameraHandle>) {
        self.camera_handle = handle;
    }

    // ===== TICK =====

    /// Run `advance()` then `resolve()`.
    pub fn tick(&mut self, delta_time: f32, collision: &dyn CollisionQuery) -> Result<()> {
        self.advance(delta_time)?;
        if !is_valid_delta_time(delta_time) {
            return Ok(());
        }
        self.resolve(delta_time, collision)
    }

    /// Gather input and update the targets.
    ///
    /// # Errors
    ///
    /// The last validation error while the hierarchy is malformed.
    pub fn advance(&mut self, delta_time: f32) -> Result<()> {
        let keys = self.keys.clone()?;
        if !Self::check_delta_time(delta_time) {
            return Ok(());
        }
        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };

        let input = self.input.gather(self.config.use_input);
        apply_input(state, &input, self.config.zoom_lerp_speed);

        let inputs = TargetInputs {
            follow_target: self.follow_target,
            look_target: self.look_target,
            look_input: input.look_delta,
            root_position: self.hierarchy.world_position(keys.root),
            pivot_position: self.hierarchy.world_position(keys.height),
        };
        self.look_mode = update_targets(state, &self.config, &inputs);
        Ok(())
    }

    /// Clamp, integrate, probe and write the node transforms.
    ///
    /// # Errors
    ///
    /// The last validation error while the hierarchy is malformed.
    pub fn resolve(&mut self, delta_time: f32, collision: &dyn CollisionQuery) -> Result<()> {
        let keys = self.keys.clone()?;
        if !Self::check_delta_time(delta_time) {
            return Ok(());
        }
        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };
        let config = &self.config;
        let hierarchy = &mut self.hierarchy;
        if let Some(debug) = self.debug_draw.as_mut() {
            debug.begin_frame();
        }

        // ===== ZOOM =====
        state.target_zoom = clamp_zoom(state.target_zoom, config.min_zoom_in, config.max_zoom_out);
        state.zoom = clamp_zoom(state.zoom, config.min_zoom_in, config.max_zoom_out);
        state.zoom = approach(state.zoom, state.target_zoom, lerp_factor(config.zoom_lerp_speed, delta_time));

        // ===== ROOT: POSITION + YAW =====
        let root_position = move_towards(
            hierarchy.world_position(keys.root),
            state.target_position,
            config.move_lerp_speed * delta_time,
        );
        hierarchy.set_world_position(keys.root, root_position);

        let rotation_scale = if config.scale_rotation_by_delta_time { delta_time } else { 1.0 };
        state.yaw = wrap_angle(move_towards_angle(
            state.yaw,
            state.target_yaw,
            config.horizontal_rotation_lerp_speed * rotation_scale,
        ));
        hierarchy.set_local_rotation(keys.root, yaw_rotation(state.yaw));

        // ===== X AXIS: PITCH =====
        state.pitch = move_towards_value(
            state.pitch,
            state.target_pitch,
            config.vertical_rotation_lerp_speed * rotation_scale,
        );
        hierarchy.set_local_rotation(keys.x_axis, pitch_rotation(state.pitch));

        // ===== PROBES =====
        let forward = resolve_probe(
            collision,
            forward_probe_shape(hierarchy, &keys, state.zoom, config),
            config.collision_layers,
            config.clip_point_offset,
            debug_sink(&mut self.debug_draw),
        );
        state.forward_clipping = forward.clipping;
        state.forward_clip_position = forward.position;

        let horizontal = resolve_probe(
            collision,
            horizontal_probe_shape(hierarchy, &keys, state.horizontal_offset, config),
            config.collision_layers,
            config.clip_point_offset,
            debug_sink(&mut self.debug_draw),
        );
        state.horizontal_clipping = horizontal.clipping;
        state.horizontal_clip_position = horizontal.position;

        // ===== NODE WRITES =====
        let clip_t = lerp_factor(config.clip_lerp_speed, delta_time);

        let offset_goal = if horizontal.clipping {
            hierarchy.inverse_transform_point(keys.height, horizontal.position)
        } else {
            Vec3::new(state.horizontal_offset, 0.0, 0.0)
        };
        let offset_local = approach_vec3(hierarchy.local(keys.horizontal_offset).position, offset_goal, clip_t);
        hierarchy.set_local_position(keys.horizontal_offset, offset_local);

        let camera_goal = if forward.clipping {
            hierarchy.inverse_transform_point(keys.x_axis, forward.position)
        } else {
            Vec3::new(0.0, 0.0, state.zoom)
        };
        let camera_local = approach_vec3(hierarchy.local(keys.camera_node).position, camera_goal, clip_t);
        hierarchy.set_local_position(keys.camera_node, camera_local);

        rig_trace!(Self::SOURCE, "zoom {:.3} yaw {:.2} pitch {:.2} clip forward={} horizontal={}",
            state.zoom, state.yaw, state.pitch, state.forward_clipping, state.horizontal_clipping);
        Ok(())
    }

    fn check_delta_time(delta_time: f32) -> bool {
        if is_valid_delta_time(delta_time) {
            true
        } else {
            rig_warn!(Self::SOURCE, "Ignoring tick with invalid delta time {}", delta_time);
            false
        }
    }

    // ===== STATE SURFACE: ZOOM / OFFSET / HEIGHT =====

    /// Current zoom (non-positive).
    ///
    /// Reads the CameraNode local Z while inactive.
    pub fn zoom(&self) -> f32 {
        match (&self.state, self.keys()) {
            (Some(state), _) => state.zoom,
            (None, Some(keys)) => self.hierarchy.local(keys.camera_node).position.z,
            (None, None) => 0.0,
        }
    }

    /// Zoom the rig moves toward.
    pub fn target_zoom(&self) -> f32 {
        self.state.as_ref().map(|s| s.target_zoom).unwrap_or_else(|| self.zoom())
    }

    /// Set the zoom distance. The sign is ignored: zoom is always behind
    /// the pivot.
    ///
    /// While active this sets the target (clamped on the next `resolve()`);
    /// while inactive it moves the CameraNode directly.
    pub fn set_zoom(&mut self, value: f32) {
        let zoom = -value.abs();
        if let Some(state) = self.state.as_mut() {
            state.target_zoom = zoom;
        } else if let Some(keys) = self.keys() {
            let mut position = self.hierarchy.local(keys.camera_node).position;
            position.z = zoom;
            self.hierarchy.set_local_position(keys.camera_node, position);
        }
    }

    /// Shoulder offset (signed, unclipped).
    pub fn horizontal_offset(&self) -> f32 {
        match (&self.state, self.keys()) {
            (Some(state), _) => state.horizontal_offset,
            (None, Some(keys)) => self.hierarchy.local(keys.horizontal_offset).position.x,
            (None, None) => 0.0,
        }
    }

    pub fn set_horizontal_offset(&mut self, offset: f32) {
        if let Some(state) = self.state.as_mut() {
            state.horizontal_offset = offset;
        } else if let Some(keys) = self.keys() {
            let mut position = self.hierarchy.local(keys.horizontal_offset).position;
            position.x = offset;
            self.hierarchy.set_local_position(keys.horizontal_offset, position);
        }
    }

    /// Height of the pivot above the Root (Height node local Y).
    pub fn height(&self) -> f32 {
        self.keys()
            .map(|keys| self.hierarchy.local(keys.height).position.y)
            .unwrap_or(0.0)
    }

    pub fn set_height(&mut self, height: f32) {
        if let Some(keys) = self.keys() {
            let mut position = self.hierarchy.local(keys.height).position;
            position.y = height;
            self.hierarchy.set_local_position(keys.height, position);
        }
    }

    // ===== STATE SURFACE: INPUT =====

    pub fn look_input(&self) -> Vec2 {
        self.input.look_input()
    }

    /// Held look input, applied every tick until changed.
    pub fn set_look_input(&mut self, look: Vec2) {
        self.input.set_look_input(look);
    }

    /// Add a one-shot zoom delta (positive zooms in).
    pub fn add_zoom_input(&mut self, delta: f32) {
        self.input.add_zoom_input(delta);
    }

    /// Swap the shoulder side on the next tick.
    pub fn request_offset_flip(&mut self) {
        self.input.request_offset_flip();
    }

    /// Install the provider polled when `RigConfig::use_input` is set.
    pub fn set_input_provider(&mut self, provider: Option<Box<dyn InputProvider>>) {
        self.input.set_provider(provider);
    }

    /// Look sensitivities (horizontal, vertical)
    pub fn sensitivity(&self) -> (f32, f32) {
        (self.config.horizontal_sensitivity, self.config.vertical_sensitivity)
    }

    /// # Errors
    ///
    /// `ConfigurationError` for non-finite values.
    pub fn set_sensitivity(&mut self, horizontal: f32, vertical: f32) -> Result<()> {
        if !(horizontal.is_finite() && vertical.is_finite()) {
            return Err(rig_err!(Self::SOURCE, ConfigurationError,
                "Invalid look sensitivity ({}, {})", horizontal, vertical));
        }
        self.config.horizontal_sensitivity = horizontal;
        self.config.vertical_sensitivity = vertical;
        Ok(())
    }

    /// Look inversion flags (horizontal, vertical)
    pub fn invert(&self) -> (bool, bool) {
        (self.config.invert_horizontal, self.config.invert_vertical)
    }

    pub fn set_invert(&mut self, horizontal: bool, vertical: bool) {
        self.config.invert_horizontal = horizontal;
        self.config.invert_vertical = vertical;
    }

    // ===== STATE SURFACE: TARGETS =====

    pub fn follow_target(&self) -> Option<Vec3> {
        self.follow_target
    }

    /// World position the Root follows (None: hold position).
    pub fn set_follow_target(&mut self, target: Option<Vec3>) {
        self.follow_target = target;
    }

    pub fn look_target(&self) -> Option<Vec3> {
        self.look_target
    }

    /// World point to look at. Overrides the look input while set.
    pub fn set_look_target(&mut self, target: Option<Vec3>) {
        self.look_target = target;
    }

    /// Rule that produced the rotation targets on the last `advance()`.
    pub fn look_mode(&self) -> LookMode {
        self.look_mode
    }

    // ===== STATE SURFACE: OUTPUT =====

    pub fn state(&self) -> Option<&CameraState> {
        self.state.as_ref()
    }

    pub fn forward_clipping(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.forward_clipping)
    }

    pub fn horizontal_clipping(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.horizontal_clipping)
    }

    /// World matrix of the CameraNode.
    pub fn camera_node_transform(&self) -> Option<Mat4> {
        self.keys().map(|keys| self.hierarchy.world_matrix(keys.camera_node))
    }

    /// World position of the CameraNode.
    pub fn camera_position(&self) -> Option<Vec3> {
        self.keys().map(|keys| self.hierarchy.world_position(keys.camera_node))
    }

    /// Unit forward (+Z) of the CameraNode in world space.
    pub fn camera_forward(&self) -> Option<Vec3> {
        self.keys().map(|keys| self.hierarchy.world_rotation(keys.camera_node) * Vec3::Z)
    }

    /// Right-handed view matrix for the CameraNode, as `Mat4::look_to_rh`
    /// builds it: the rig's +Z forward maps to view-space -Z, so pair it
    /// with `Mat4::perspective_rh`.
    pub fn view_matrix(&self) -> Option<Mat4> {
        self.keys().map(|keys| {
            let position = self.hierarchy.world_position(keys.camera_node);
            let rotation = self.hierarchy.world_rotation(keys.camera_node);
            Mat4::look_to_rh(position, rotation * Vec3::Z, rotation * Vec3::Y)
        })
    }

    // ===== AIM =====

    /// Point under the screen center: cast from the camera along its
    /// forward.
    pub fn screen_center_point(
        &self,
        collision: &dyn CollisionQuery,
        mask: LayerMask,
        radius: f32,
    ) -> Result<Vec3> {
        let keys = self.keys.clone()?;
        let origin = self.hierarchy.world_position(keys.camera_node);
        Ok(aim_point(collision, &self.aim_query(&keys, origin, mask, radius)))
    }

    /// Point along the camera forward as seen from the shoulder
    /// (HorizontalOffset node).
    pub fn offset_aim_point(
        &self,
        collision: &dyn CollisionQuery,
        mask: LayerMask,
        radius: f32,
    ) -> Result<Vec3> {
        let keys = self.keys.clone()?;
        let origin = self.hierarchy.world_position(keys.horizontal_offset);
        Ok(aim_point(collision, &self.aim_query(&keys, origin, mask, radius)))
    }

    fn aim_query(&self, keys: &RigKeys, origin: Vec3, mask: LayerMask, radius: f32) -> AimQuery {
        AimQuery {
            origin,
            direction: self.hierarchy.world_rotation(keys.camera_node) * Vec3::Z,
            mask,
            radius,
            max_distance: self.config.aim_max_distance,
            fallback_distance: self.config.aim_fallback_distance,
        }
    }
}

fn is_valid_delta_time(delta_time: f32) -> bool {
    delta_time.is_finite() && delta_time >= 0.0
}

fn debug_sink(debug_draw: &mut Option<Box<dyn DebugDraw>>) -> Option<&mut dyn DebugDraw> {
    match debug_draw {
        Some(debug) => Some(debug.as_mut()),
        None => None,
    }
}

#[cfg(test)]
#[path = "camera_rig_tests.rs"]
mod tests;
