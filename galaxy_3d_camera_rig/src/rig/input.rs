/// Input aggregation.
///
/// Once per tick the rig needs a look delta, a zoom delta and an
/// offset-flip request. They come either from an installed
/// `InputProvider` (self-sourcing) or from values the caller writes
/// directly on the rig.

use std::collections::VecDeque;
use glam::Vec2;
use super::state::CameraState;

/// Input consumed by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigInput {
    /// Look delta (x: yaw, y: pitch), in input units
    pub look_delta: Vec2,
    /// Zoom delta (positive zooms in)
    pub zoom_delta: f32,
    /// Swap the shoulder side this tick
    pub flip_offset: bool,
}

/// Source of per-tick input (mouse, gamepad, replay, AI...).
pub trait InputProvider: Send {
    /// Read the input for the current tick.
    fn poll(&mut self) -> RigInput;
}

/// Input provider replaying a fixed sequence, then reporting no input.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<RigInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = RigInput>) -> Self {
        Self { frames: frames.into_iter().collect() }
    }

    /// Queue one more frame
    pub fn push(&mut self, input: RigInput) {
        self.frames.push_back(input);
    }

    /// Frames not yet consumed
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputProvider for ScriptedInput {
    fn poll(&mut self) -> RigInput {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Gathers the tick input from the provider or from caller-written values.
///
/// `look_input` persists until the caller changes it. Zoom deltas and flip
/// requests written by the caller are one-shot: they are consumed by the
/// next `gather()`.
#[derive(Default)]
pub struct InputAggregator {
    provider: Option<Box<dyn InputProvider>>,
    look_input: Vec2,
    pending_zoom: f32,
    pending_flip: bool,
}

impl InputAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install (or remove) the self-sourcing provider.
    pub fn set_provider(&mut self, provider: Option<Box<dyn InputProvider>>) {
        self.provider = provider;
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Last look input (caller-written, or last polled when self-sourcing)
    pub fn look_input(&self) -> Vec2 {
        self.look_input
    }

    pub fn set_look_input(&mut self, look: Vec2) {
        self.look_input = look;
    }

    /// Accumulate a one-shot zoom delta for the next tick
    pub fn add_zoom_input(&mut self, delta: f32) {
        self.pending_zoom += delta;
    }

    /// Request a one-shot shoulder swap on the next tick
    pub fn request_offset_flip(&mut self) {
        self.pending_flip = true;
    }

    /// Produce the input for this tick.
    ///
    /// When `self_sourcing` is set and a provider is installed, its look
    /// delta replaces `look_input`; caller one-shots are merged in either way.
    pub fn gather(&mut self, self_sourcing: bool) -> RigInput {
        let mut input = RigInput {
            look_delta: self.look_input,
            ..RigInput::default()
        };
        if self_sourcing {
            if let Some(provider) = self.provider.as_mut() {
                input = provider.poll();
                self.look_input = input.look_delta;
            }
        }
        input.zoom_delta += std::mem::take(&mut self.pending_zoom);
        input.flip_offset |= std::mem::take(&mut self.pending_flip);
        input
    }

    /// Drop pending one-shots (used on deactivation).
    pub fn clear_pending(&mut self) {
        self.pending_zoom = 0.0;
        self.pending_flip = false;
    }
}

/// Apply the input side effects to the camera state.
///
/// - flip: `horizontal_offset *= -1`, immediately
/// - zoom: `target_zoom += zoom_delta * zoom_lerp_speed`
pub fn apply_input(state: &mut CameraState, input: &RigInput, zoom_lerp_speed: f32) {
    if input.flip_offset {
        state.horizontal_offset = -state.horizontal_offset;
    }
    state.target_zoom += input.zoom_delta * zoom_lerp_speed;
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
