use crate::core::BodyHandle;
use crate::math::Vector3;
use crate::shapes::ShapeType;

/// An overlap found by the narrow phase.
///
/// Contacts live for a single step: detection produces them and
/// resolution consumes them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// The first body. When a plane is involved it is always this one.
    pub body_a: BodyHandle,

    /// The second body
    pub body_b: BodyHandle,

    /// Shapes of `body_a` and `body_b`
    pub shapes: (ShapeType, ShapeType),

    /// Unit contact normal, pointing from `body_a` toward `body_b`
    pub normal: Vector3,

    /// Overlap depth along the normal at detection time
    pub penetration: f32,
}

impl Contact {
    /// Returns true if the first body is a plane
    pub fn involves_plane(&self) -> bool {
        self.shapes.0 == ShapeType::Plane
    }

    /// Checks if this contact involves the specified body
    pub fn contains(&self, body: BodyHandle) -> bool {
        self.body_a == body || self.body_b == body
    }
}
