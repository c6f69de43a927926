/*!
# Galaxy 3D Camera Rig

Third-person camera rig for the Galaxy 3D engine.

A rig is a chain of five nested transforms driven once per frame. It follows
a target, orbits it from player input or a look-at point, and pulls the
camera in front of obstacles with sphere casts.

## Architecture

- **RigHierarchy**: arena of rig nodes (Root → Height → HorizontalOffset → XAxis → CameraNode)
- **RigConfig**: validated tunables (speeds, bounds, clip radii, layers)
- **ThirdPersonRig**: lifecycle, per-frame `advance()` / `resolve()`, public state
- **InputProvider**: strategy trait for self-sourced input
- **CollisionQuery**: strategy trait for ray / sphere casts (`ColliderSet` provided)
- **DebugDraw**: optional sink for probe geometry

The rig computes a camera world transform; the host copies it into its own
camera (`camera_node_transform()`, `view_matrix()`).
*/

// Internal modules
mod error;
pub mod log;
pub mod collision;
pub mod debug;
pub mod rig;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Rig driver
    pub use crate::rig::ThirdPersonRig;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        pub use crate::log::{set_logger, reset_logger, set_min_severity, min_severity, log, log_detailed};
    }

    // Rig sub-module with every stage and type
    pub mod rig {
        pub use crate::rig::*;
    }

    // Collision sub-module
    pub mod collision {
        pub use crate::collision::*;
    }

    // Debug drawing sub-module
    pub mod debug {
        pub use crate::debug::*;
    }
}

// Re-export math library at crate root
pub use glam;
