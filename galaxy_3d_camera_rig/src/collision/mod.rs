//! Collision module — shape-cast queries consumed by the rig.
//!
//! The rig never simulates physics. It asks a caller-supplied
//! `CollisionQuery` for single-shot ray and sphere casts against a
//! `LayerMask`. `ColliderSet` is a small analytic backend for hosts
//! without a physics engine.

mod layer_mask;
mod query;
mod collider_set;

pub use layer_mask::LayerMask;
pub use query::{CollisionQuery, Hit, NoCollision, probe_sphere, MIN_PROBE_DISTANCE};
pub use collider_set::{ColliderSet, Collider, ColliderShape, ColliderKey};
