//! A small rigid-body simulation core.
//!
//! Bodies are spheres, infinite planes and axis-aligned boxes. The world
//! advances them with a fixed time step, detects every overlapping pair,
//! resolves the contacts with a single impulse pass and exposes a
//! read-only list of renderables for whatever host draws the scene.

pub mod math;
pub mod core;
pub mod bodies;
pub mod shapes;
pub mod collision;
pub mod constraints;
pub mod render;

/// Re-export common types for easier usage
pub use crate::core::{PhysicsWorld, SimulationConfig, StaticResponse, BodyHandle, ConstraintHandle};
pub use crate::bodies::{RigidBody, RigidBodyType, RigidBodyHandle, Material, BodyFlags};
pub use crate::shapes::{Shape, ShapeType, Sphere, Plane, BoxShape};
pub use crate::constraints::{Constraint, Spring};
pub use crate::render::{Renderable, Geometry};
pub use crate::math::{Vector3, Vector4};

/// Error types for the physics engine
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum PhysicsError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),
    }
}

/// Result type for physics engine operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
