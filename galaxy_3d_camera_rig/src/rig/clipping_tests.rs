use glam::Vec3;
use crate::collision::{Collider, ColliderSet, LayerMask, NoCollision};
use crate::debug::{DebugShape, RecordingDebugDraw};
use crate::log::{self, Logger, LogEntry, LogSeverity};
use serial_test::serial;
use std::sync::{Arc, Mutex};
use super::*;

const EPS: f32 = 1e-4;

fn assert_vec_near(actual: Vec3, expected: Vec3) {
    assert!(
        (actual - expected).length() < EPS,
        "expected {:?}, got {:?}", expected, actual
    );
}

/// Keeps clipping entries only
struct ClippingLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for ClippingLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.source == "galaxy3d::Clipping" {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }
}

fn rig(offset: f32, zoom: f32) -> (RigHierarchy, RigKeys) {
    let hierarchy = RigHierarchy::new(Vec3::ZERO, 1.0, offset, zoom);
    let keys = hierarchy.validate_hierarchy().unwrap();
    (hierarchy, keys)
}

fn wall_behind(z: f32, layers: LayerMask) -> ColliderSet {
    let mut set = ColliderSet::new();
    set.insert(Collider::plane(Vec3::new(0.0, 0.0, z), Vec3::Z, layers));
    set
}

// ============================================================================
// Probe shapes
// ============================================================================

#[test]
fn test_forward_probe_shape_follows_zoom_axis() {
    let (h, keys) = rig(0.0, -5.0);
    let shape = forward_probe_shape(&h, &keys, -5.0, &RigConfig::default());

    assert_vec_near(shape.origin, Vec3::new(0.0, 1.0, 0.0));
    assert_vec_near(shape.desired, Vec3::new(0.0, 1.0, -5.0));
    assert_eq!(shape.max_distance, 5.0);
    assert_eq!(shape.radius, RigConfig::default().forward_clip_radius);
}

#[test]
fn test_horizontal_probe_shape_follows_offset_axis() {
    let (h, keys) = rig(0.5, -5.0);
    let config = RigConfig { horizontal_clip_radius: 0.35, ..Default::default() };
    let shape = horizontal_probe_shape(&h, &keys, -1.5, &config);

    assert_vec_near(shape.desired, Vec3::new(-1.5, 1.0, 0.0));
    assert_eq!(shape.max_distance, 1.5);
    assert_eq!(shape.radius, 0.35);
}

// ============================================================================
// resolve_probe
// ============================================================================

#[test]
fn test_forward_probe_hits_wall_behind_camera() {
    let (h, keys) = rig(0.0, -5.0);
    let config = RigConfig::default();
    let world = wall_behind(-3.0, LayerMask::DEFAULT);

    let shape = forward_probe_shape(&h, &keys, -5.0, &config);
    let probe = resolve_probe(&world, shape, config.collision_layers, config.clip_point_offset, None);

    assert!(probe.clipping);
    assert_vec_near(probe.position, Vec3::new(0.0, 1.0, -2.9));
}

#[test]
fn test_forward_probe_wall_beyond_zoom_does_not_clip() {
    let (h, keys) = rig(0.0, -5.0);
    let config = RigConfig::default();
    let world = wall_behind(-8.0, LayerMask::DEFAULT);

    let shape = forward_probe_shape(&h, &keys, -5.0, &config);
    let probe = resolve_probe(&world, shape, config.collision_layers, config.clip_point_offset, None);

    assert!(!probe.clipping);
    assert_vec_near(probe.position, shape.desired);
}

#[test]
fn test_probe_ignores_layers_outside_mask() {
    let (h, keys) = rig(0.0, -5.0);
    let config = RigConfig {
        collision_layers: LayerMask::EVERYTHING - LayerMask::PLAYER,
        ..Default::default()
    };
    let world = wall_behind(-3.0, LayerMask::PLAYER);

    let shape = forward_probe_shape(&h, &keys, -5.0, &config);
    let probe = resolve_probe(&world, shape, config.collision_layers, config.clip_point_offset, None);

    assert!(!probe.clipping);
}

#[test]
fn test_horizontal_probe_hits_side_wall() {
    let (h, keys) = rig(2.0, -5.0);
    let config = RigConfig::default();
    let mut world = ColliderSet::new();
    world.insert(Collider::plane(Vec3::new(1.0, 0.0, 0.0), -Vec3::X, LayerMask::DEFAULT));

    let shape = horizontal_probe_shape(&h, &keys, 2.0, &config);
    let probe = resolve_probe(&world, shape, config.collision_layers, config.clip_point_offset, None);

    assert!(probe.clipping);
    assert_vec_near(probe.position, Vec3::new(0.9, 1.0, 0.0));
}

#[test]
fn test_probes_are_independent() {
    // Wall behind, nothing to the side
    let (h, keys) = rig(1.0, -5.0);
    let config = RigConfig::default();
    let world = wall_behind(-3.0, LayerMask::DEFAULT);

    let forward = resolve_probe(&world, forward_probe_shape(&h, &keys, -5.0, &config),
        config.collision_layers, config.clip_point_offset, None);
    let horizontal = resolve_probe(&world, horizontal_probe_shape(&h, &keys, 1.0, &config),
        config.collision_layers, config.clip_point_offset, None);

    assert!(forward.clipping);
    assert!(!horizontal.clipping);
}

#[test]
fn test_zero_offset_is_degenerate_no_hit() {
    let (h, keys) = rig(0.0, -5.0);
    let config = RigConfig::default();
    let mut world = ColliderSet::new();
    world.insert(Collider::sphere(Vec3::new(0.0, 1.0, 0.0), 5.0, LayerMask::DEFAULT));

    let shape = horizontal_probe_shape(&h, &keys, 0.0, &config);
    let probe = resolve_probe(&world, shape, config.collision_layers, config.clip_point_offset, None);

    assert!(!probe.clipping);
    assert_vec_near(probe.position, Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn test_zero_zoom_is_degenerate_no_hit() {
    let (h, keys) = rig(0.0, 0.0);
    let config = RigConfig::default();

    let shape = forward_probe_shape(&h, &keys, 0.0, &config);
    let probe = resolve_probe(&NoCollision, shape, config.collision_layers, config.clip_point_offset, None);

    assert!(!probe.clipping);
}

// ============================================================================
// Cast failures
// ============================================================================

#[test]
fn test_successful_cast_passes_hit_through() {
    let hit = Hit { point: Vec3::new(0.0, 1.0, -2.0), normal: Vec3::Z, distance: 2.0 };
    assert_eq!(hit_or_none(Ok(Some(hit))), Some(hit));
    assert_eq!(hit_or_none(Ok(None)), None);
}

#[test]
#[serial]
fn test_unexpected_cast_error_warns_and_reports_no_hit() {
    let entries = Arc::new(Mutex::new(Vec::new()));
    log::set_logger(ClippingLogger { entries: entries.clone() });
    log::set_min_severity(LogSeverity::Trace);

    assert_eq!(hit_or_none(Err(Error::DegenerateProbe("zero length".to_string()))), None);
    assert_eq!(hit_or_none(Err(Error::ConfigurationError("bad radius".to_string()))), None);

    {
        // Other tests may trace their own degenerate casts meanwhile
        let captured = entries.lock().unwrap();
        let degenerate: Vec<_> = captured.iter().filter(|e| e.message.contains("zero length")).collect();
        assert_eq!(degenerate.len(), 1);
        assert_eq!(degenerate[0].severity, LogSeverity::Trace);

        let warnings: Vec<_> = captured.iter().filter(|e| e.severity == LogSeverity::Warn).collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("bad radius"));
    }

    log::reset_logger();
}

// ============================================================================
// Debug output
// ============================================================================

#[test]
fn test_probe_emits_debug_geometry() {
    let (h, keys) = rig(0.0, -5.0);
    let config = RigConfig::default();
    let world = wall_behind(-3.0, LayerMask::DEFAULT);
    let recorder = RecordingDebugDraw::new();
    let mut sink = recorder.clone();

    let shape = forward_probe_shape(&h, &keys, -5.0, &config);
    resolve_probe(&world, shape, config.collision_layers, config.clip_point_offset, Some(&mut sink));

    let shapes = recorder.shapes();
    assert_eq!(shapes.len(), 3);
    assert!(matches!(shapes[0], DebugShape::Line { .. }));
    assert!(matches!(shapes[2], DebugShape::WireSphere { .. }));
}
