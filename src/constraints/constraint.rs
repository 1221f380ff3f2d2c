use crate::core::{BodyHandle, BodyStorage};
use crate::bodies::RigidBody;
use crate::math::Vector3;
use std::any::Any;

/// Base trait for constraints between bodies.
///
/// A constraint observes the bodies it links but never owns them; it
/// refers to them by handle and acts on them through the world's storage.
pub trait Constraint: Send + Sync + std::fmt::Debug + 'static {
    /// Returns the type name of the constraint
    fn constraint_type(&self) -> &'static str;

    /// Returns the bodies involved in the constraint
    fn get_bodies(&self) -> &[BodyHandle];

    /// Checks if the constraint involves a specific body
    fn involves_body(&self, body: BodyHandle) -> bool {
        self.get_bodies().contains(&body)
    }

    /// Applies the constraint for one step of length `dt`
    fn update(&mut self, dt: f32, bodies: &mut BodyStorage<RigidBody>);

    /// Line segment the renderer should draw for this constraint, if any
    fn render_segment(&self, _bodies: &BodyStorage<RigidBody>) -> Option<(Vector3, Vector3)> {
        None
    }

    /// Returns a dynamic reference to any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Returns a dynamic mutable reference to any for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
