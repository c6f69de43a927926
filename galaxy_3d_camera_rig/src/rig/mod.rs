//! Rig module — the third-person camera rig and its per-tick stages.
//!
//! Stages run in a fixed order every frame:
//! input → targets → zoom/rotation integration → clip probes → node writes.
//! Each stage is a free function over `CameraState` so it can be tested
//! (or replaced) on its own; `ThirdPersonRig` sequences them.

mod transform;
mod node;
mod config;
mod state;
mod input;
mod target;
mod smoothing;
mod clipping;
mod aim;
mod camera_rig;

pub use transform::{Transform, yaw_rotation, pitch_rotation, yaw_of, pitch_of};
pub use node::{RigHierarchy, RigNode, RigNodeKey, RigNodeRole, RigKeys};
pub use config::RigConfig;
pub use state::CameraState;
pub use input::{RigInput, InputProvider, ScriptedInput, InputAggregator, apply_input};
pub use target::{LookMode, TargetInputs, clamp_pitch, look_at_angles, update_targets};
pub use smoothing::{
    SNAP_EPSILON, lerp_factor, clamp_zoom, move_towards, move_towards_value, wrap_angle,
    delta_angle, move_towards_angle, approach, approach_vec3,
};
pub use clipping::{ClipProbe, ProbeShape, resolve_probe, forward_probe_shape, horizontal_probe_shape};
pub use aim::{AimQuery, aim_point};
pub use camera_rig::{ThirdPersonRig, CameraHandle};
