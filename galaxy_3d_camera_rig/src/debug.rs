/// Debug visualization hook.
///
/// The rig describes its probe geometry (cast segments, cast spheres, hit
/// points) to an optional `DebugDraw` sink every tick. Purely observational:
/// nothing the sink does feeds back into the rig state.

use std::sync::{Arc, Mutex};
use glam::Vec3;

/// RGBA color, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugColor(pub [f32; 4]);

impl DebugColor {
    /// Unobstructed probe
    pub const CLEAR: DebugColor = DebugColor([0.2, 0.9, 0.2, 1.0]);
    /// Obstructed probe
    pub const BLOCKED: DebugColor = DebugColor([0.95, 0.2, 0.2, 1.0]);
    /// Resolved clip position
    pub const CLIP_POINT: DebugColor = DebugColor([1.0, 0.85, 0.1, 1.0]);
}

/// A single debug primitive, as emitted by the rig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebugShape {
    Line { from: Vec3, to: Vec3, color: DebugColor },
    WireSphere { center: Vec3, radius: f32, color: DebugColor },
}

/// Sink for diagnostic geometry.
pub trait DebugDraw: Send {
    /// Draw a line segment (world space)
    fn line(&mut self, from: Vec3, to: Vec3, color: DebugColor);

    /// Draw a wireframe sphere (world space)
    fn wire_sphere(&mut self, center: Vec3, radius: f32, color: DebugColor);

    /// Called once at the start of every `resolve()`.
    ///
    /// Immediate-mode sinks ignore it; retained sinks clear last frame.
    fn begin_frame(&mut self) {}
}

/// Debug sink that discards everything.
pub struct NoOpDebugDraw;

impl DebugDraw for NoOpDebugDraw {
    fn line(&mut self, _from: Vec3, _to: Vec3, _color: DebugColor) {}
    fn wire_sphere(&mut self, _center: Vec3, _radius: f32, _color: DebugColor) {}
}

/// Debug sink that keeps the shapes of the last frame.
///
/// Clones share the same buffer: the host keeps one handle and gives the
/// other to the rig, then hands `shapes()` to its line renderer.
#[derive(Debug, Clone, Default)]
pub struct RecordingDebugDraw {
    shapes: Arc<Mutex<Vec<DebugShape>>>,
}

impl RecordingDebugDraw {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes emitted since the last `begin_frame()`
    pub fn shapes(&self) -> Vec<DebugShape> {
        self.shapes.lock().map(|shapes| shapes.clone()).unwrap_or_default()
    }

    fn push(&self, shape: DebugShape) {
        if let Ok(mut shapes) = self.shapes.lock() {
            shapes.push(shape);
        }
    }
}

impl DebugDraw for RecordingDebugDraw {
    fn line(&mut self, from: Vec3, to: Vec3, color: DebugColor) {
        self.push(DebugShape::Line { from, to, color });
    }

    fn wire_sphere(&mut self, center: Vec3, radius: f32, color: DebugColor) {
        self.push(DebugShape::WireSphere { center, radius, color });
    }

    fn begin_frame(&mut self) {
        if let Ok(mut shapes) = self.shapes.lock() {
            shapes.clear();
        }
    }
}

#[cfg(test)]
#[path = "debug_tests.rs"]
mod tests;
