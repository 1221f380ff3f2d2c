pub mod world;
pub mod config;
pub mod storage;
pub mod events;

pub use self::world::PhysicsWorld;
pub use self::config::{SimulationConfig, StaticResponse};
pub use self::storage::{BodyStorage, ConstraintStorage, Storage};
pub use self::events::{EventQueue, CollisionEvent, BodyEvent, BodyEventType};

use thunderdome as td;

/// A unique identifier for a body in the physics world.
///
/// Handles are generational: once a body is removed its handle never
/// resolves again, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyHandle(pub(crate) td::Index);

impl BodyHandle {
    /// Get the underlying [`thunderdome::Index`] of this handle
    #[inline]
    pub fn index(&self) -> td::Index {
        self.0
    }
}

/// A unique identifier for a constraint in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintHandle(pub(crate) td::Index);

impl ConstraintHandle {
    /// Get the underlying [`thunderdome::Index`] of this handle
    #[inline]
    pub fn index(&self) -> td::Index {
        self.0
    }
}
