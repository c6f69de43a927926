/// Spatial rig — the chain of nested transforms the camera is built from.
///
/// Root → Height → HorizontalOffset → XAxis → CameraNode
///
/// - Root: follows the target, carries yaw
/// - Height: vertical pivot offset
/// - HorizontalOffset: shoulder offset (local X)
/// - XAxis: carries pitch
/// - CameraNode: zoom distance (local Z, non-positive)
///
/// Nodes live in a SlotMap and reference their parent by key. The chain
/// order is checked by `validate_hierarchy()` whenever the authoring layer
/// edits the rig, never during the tick.

use std::fmt;
use glam::{Mat4, Quat, Vec3};
use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::rig_err;
use super::transform::Transform;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a RigNode within a RigHierarchy.
    pub struct RigNodeKey;
}

// ===== ROLES =====

/// Position of a node in the rig chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RigNodeRole {
    Root,
    Height,
    HorizontalOffset,
    XAxis,
    CameraNode,
}

impl RigNodeRole {
    /// The four roles below Root, in chain order
    pub const CHILDREN: [RigNodeRole; 4] = [
        RigNodeRole::Height,
        RigNodeRole::HorizontalOffset,
        RigNodeRole::XAxis,
        RigNodeRole::CameraNode,
    ];

    /// Role the parent of this node must have (None for Root).
    pub fn expected_parent(&self) -> Option<RigNodeRole> {
        match self {
            RigNodeRole::Root => None,
            RigNodeRole::Height => Some(RigNodeRole::Root),
            RigNodeRole::HorizontalOffset => Some(RigNodeRole::Height),
            RigNodeRole::XAxis => Some(RigNodeRole::HorizontalOffset),
            RigNodeRole::CameraNode => Some(RigNodeRole::XAxis),
        }
    }
}

impl fmt::Display for RigNodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RigNodeRole::Root => "Root",
            RigNodeRole::Height => "Height",
            RigNodeRole::HorizontalOffset => "HorizontalOffset",
            RigNodeRole::XAxis => "XAxis",
            RigNodeRole::CameraNode => "CameraNode",
        };
        f.write_str(name)
    }
}

// ===== NODE =====

/// A node of the rig: local transform plus parent link.
#[derive(Debug, Clone)]
pub struct RigNode {
    /// Local transform relative to the parent
    pub local: Transform,
    parent: Option<RigNodeKey>,
}

impl RigNode {
    /// Parent key (None for a detached node or the Root)
    pub fn parent(&self) -> Option<RigNodeKey> {
        self.parent
    }
}

/// Keys of a validated chain.
///
/// Only produced by `RigHierarchy::validate_hierarchy()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RigKeys {
    pub root: RigNodeKey,
    pub height: RigNodeKey,
    pub horizontal_offset: RigNodeKey,
    pub x_axis: RigNodeKey,
    pub camera_node: RigNodeKey,
}

// ===== HIERARCHY =====

/// Arena of rig nodes plus the role assignments.
///
/// World-space queries take a key; a key that is not (or no longer) in the
/// arena contributes an identity transform.
#[derive(Debug, Clone)]
pub struct RigHierarchy {
    nodes: SlotMap<RigNodeKey, RigNode>,
    root: RigNodeKey,
    height: Option<RigNodeKey>,
    horizontal_offset: Option<RigNodeKey>,
    x_axis: Option<RigNodeKey>,
    camera_node: Option<RigNodeKey>,
}

impl RigHierarchy {
    const SOURCE: &'static str = "galaxy3d::RigHierarchy";

    /// Create a hierarchy holding only the Root.
    ///
    /// The authoring layer adds, parents and assigns the other four nodes.
    pub fn empty(root_position: Vec3) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(RigNode {
            local: Transform::from_position(root_position),
            parent: None,
        });
        Self {
            nodes,
            root,
            height: None,
            horizontal_offset: None,
            x_axis: None,
            camera_node: None,
        }
    }

    /// Create a well-formed chain.
    ///
    /// # Arguments
    ///
    /// * `root_position` - World position of the Root
    /// * `height` - Height node local Y
    /// * `horizontal_offset` - HorizontalOffset node local X
    /// * `zoom` - CameraNode local Z (non-positive: behind the pivot)
    pub fn new(root_position: Vec3, height: f32, horizontal_offset: f32, zoom: f32) -> Self {
        let mut hierarchy = Self::empty(root_position);
        let root = hierarchy.root;

        let height_key = hierarchy.insert_child(root, Vec3::new(0.0, height, 0.0));
        let offset_key = hierarchy.insert_child(height_key, Vec3::new(horizontal_offset, 0.0, 0.0));
        let x_axis_key = hierarchy.insert_child(offset_key, Vec3::ZERO);
        let camera_key = hierarchy.insert_child(x_axis_key, Vec3::new(0.0, 0.0, zoom));

        hierarchy.height = Some(height_key);
        hierarchy.horizontal_offset = Some(offset_key);
        hierarchy.x_axis = Some(x_axis_key);
        hierarchy.camera_node = Some(camera_key);
        hierarchy
    }

    fn insert_child(&mut self, parent: RigNodeKey, position: Vec3) -> RigNodeKey {
        self.nodes.insert(RigNode {
            local: Transform::from_position(position),
            parent: Some(parent),
        })
    }

    // ===== AUTHORING =====

    /// Add a node under `parent` (or detached). The node is not assigned a role.
    ///
    /// # Errors
    ///
    /// `MissingReference` if `parent` is not in the hierarchy.
    pub fn add_node(&mut self, parent: Option<RigNodeKey>, local: Transform) -> Result<RigNodeKey> {
        if let Some(parent) = parent {
            self.require(parent, "parent")?;
        }
        Ok(self.nodes.insert(RigNode { local, parent }))
    }

    /// Assign a node to one of the four child roles.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError` when assigning the Root role
    /// - `MissingReference` if `key` is not in the hierarchy
    pub fn assign(&mut self, role: RigNodeRole, key: RigNodeKey) -> Result<()> {
        self.require(key, &role.to_string())?;
        let slot = match role {
            RigNodeRole::Root => {
                return Err(rig_err!(Self::SOURCE, ConfigurationError,
                    "the Root role is fixed and cannot be reassigned"));
            }
            RigNodeRole::Height => &mut self.height,
            RigNodeRole::HorizontalOffset => &mut self.horizontal_offset,
            RigNodeRole::XAxis => &mut self.x_axis,
            RigNodeRole::CameraNode => &mut self.camera_node,
        };
        *slot = Some(key);
        Ok(())
    }

    /// Clear a role assignment (the node itself stays).
    pub fn unassign(&mut self, role: RigNodeRole) {
        match role {
            RigNodeRole::Root => {}
            RigNodeRole::Height => self.height = None,
            RigNodeRole::HorizontalOffset => self.horizontal_offset = None,
            RigNodeRole::XAxis => self.x_axis = None,
            RigNodeRole::CameraNode => self.camera_node = None,
        }
    }

    /// Reparent a node.
    ///
    /// # Errors
    ///
    /// - `MissingReference` if `node` or `parent` is not in the hierarchy
    /// - `ConfigurationError` if the change would create a cycle
    pub fn set_parent(&mut self, node: RigNodeKey, parent: Option<RigNodeKey>) -> Result<()> {
        self.require(node, "node")?;
        if let Some(parent) = parent {
            self.require(parent, "parent")?;
            if self.is_ancestor_or_self(node, parent) {
                return Err(rig_err!(Self::SOURCE, ConfigurationError,
                    "reparenting would create a cycle in the rig hierarchy"));
            }
        }
        if let Some(entry) = self.nodes.get_mut(node) {
            entry.parent = parent;
        }
        Ok(())
    }

    /// Remove a node. Its children become detached.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError` when removing the Root
    /// - `MissingReference` if `key` is not in the hierarchy
    pub fn remove_node(&mut self, key: RigNodeKey) -> Result<RigNode> {
        if key == self.root {
            return Err(rig_err!(Self::SOURCE, ConfigurationError, "the Root node cannot be removed"));
        }
        let removed = self.nodes.remove(key)
            .ok_or_else(|| rig_err!(Self::SOURCE, MissingReference, "node is not in the hierarchy"))?;
        for node in self.nodes.values_mut() {
            if node.parent == Some(key) {
                node.parent = None;
            }
        }
        Ok(removed)
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    fn is_ancestor_or_self(&self, ancestor: RigNodeKey, node: RigNodeKey) -> bool {
        let mut current = Some(node);
        let mut steps = 0;
        while let Some(key) = current {
            if key == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                return true;
            }
            current = self.nodes.get(key).and_then(|n| n.parent);
        }
        false
    }

    fn require(&self, key: RigNodeKey, what: &str) -> Result<()> {
        if self.nodes.contains_key(key) {
            Ok(())
        } else {
            Err(rig_err!(Self::SOURCE, MissingReference, "{} is not in the hierarchy", what))
        }
    }

    // ===== VALIDATION =====

    /// Check the chain order and return the keys of every role.
    ///
    /// # Errors
    ///
    /// - `MissingReference` if a role is unassigned or its node was removed
    /// - `ConfigurationError` if a node's parent is not the previous role
    pub fn validate_hierarchy(&self) -> Result<RigKeys> {
        let mut keys = [self.root; 4];
        for (i, role) in RigNodeRole::CHILDREN.iter().enumerate() {
            let key = self.key(*role)
                .ok_or_else(|| rig_err!(Self::SOURCE, MissingReference, "{} node is not assigned", role))?;
            if !self.nodes.contains_key(key) {
                return Err(rig_err!(Self::SOURCE, MissingReference,
                    "{} node was removed from the hierarchy", role));
            }
            keys[i] = key;
        }

        let chain = [self.root, keys[0], keys[1], keys[2], keys[3]];
        for (i, role) in RigNodeRole::CHILDREN.iter().enumerate() {
            let parent = self.nodes.get(chain[i + 1]).and_then(|n| n.parent);
            if parent != Some(chain[i]) {
                let expected = role.expected_parent().unwrap_or(RigNodeRole::Root);
                return Err(rig_err!(Self::SOURCE, ConfigurationError,
                    "{} must be a direct child of {}", role, expected));
            }
        }

        Ok(RigKeys {
            root: self.root,
            height: keys[0],
            horizontal_offset: keys[1],
            x_axis: keys[2],
            camera_node: keys[3],
        })
    }

    // ===== ACCESS =====

    /// Key of the node assigned to `role`.
    pub fn key(&self, role: RigNodeRole) -> Option<RigNodeKey> {
        match role {
            RigNodeRole::Root => Some(self.root),
            RigNodeRole::Height => self.height,
            RigNodeRole::HorizontalOffset => self.horizontal_offset,
            RigNodeRole::XAxis => self.x_axis,
            RigNodeRole::CameraNode => self.camera_node,
        }
    }

    /// Root key (always present)
    pub fn root(&self) -> RigNodeKey {
        self.root
    }

    pub fn node(&self, key: RigNodeKey) -> Option<&RigNode> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: RigNodeKey) -> Option<&mut RigNode> {
        self.nodes.get_mut(key)
    }

    /// Number of nodes (assigned or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Local transform of a node (identity if unknown)
    pub fn local(&self, key: RigNodeKey) -> Transform {
        self.nodes.get(key).map(|n| n.local).unwrap_or_default()
    }

    pub fn set_local_position(&mut self, key: RigNodeKey, position: Vec3) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.local.position = position;
        }
    }

    pub fn set_local_rotation(&mut self, key: RigNodeKey, rotation: Quat) {
        if let Some(node) = self.nodes.get_mut(key) {
            node.local.rotation = rotation;
        }
    }

    // ===== WORLD SPACE =====

    /// World-from-local matrix of a node.
    pub fn world_matrix(&self, key: RigNodeKey) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut current = Some(key);
        let mut steps = 0;
        while let Some(k) = current {
            let Some(node) = self.nodes.get(k) else { break };
            matrix = node.local.matrix() * matrix;
            current = node.parent;
            steps += 1;
            if steps >= self.nodes.len() {
                break;
            }
        }
        matrix
    }

    pub fn world_position(&self, key: RigNodeKey) -> Vec3 {
        self.world_matrix(key).w_axis.truncate()
    }

    pub fn world_rotation(&self, key: RigNodeKey) -> Quat {
        let (_, rotation, _) = self.world_matrix(key).to_scale_rotation_translation();
        rotation
    }

    /// Local point of `key` → world space
    pub fn transform_point(&self, key: RigNodeKey, local_point: Vec3) -> Vec3 {
        self.world_matrix(key).transform_point3(local_point)
    }

    /// World point → local space of `key`
    pub fn inverse_transform_point(&self, key: RigNodeKey, world_point: Vec3) -> Vec3 {
        self.world_matrix(key).inverse().transform_point3(world_point)
    }

    /// Move a node so that its world position becomes `world_position`.
    pub fn set_world_position(&mut self, key: RigNodeKey, world_position: Vec3) {
        let local = match self.nodes.get(key).and_then(|n| n.parent) {
            Some(parent) => self.inverse_transform_point(parent, world_position),
            None => world_position,
        };
        self.set_local_position(key, local);
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
