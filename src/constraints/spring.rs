use crate::constraints::Constraint;
use crate::core::{BodyHandle, BodyStorage, Storage};
use crate::bodies::RigidBody;
use crate::error::PhysicsError;
use crate::math::Vector3;
use crate::Result;
use std::any::Any;

/// A damped spring pulling two bodies toward a rest distance.
///
/// The spring only produces forces. They land in the bodies' accumulated
/// acceleration and take effect on the next integration.
#[derive(Debug, Clone)]
pub struct Spring {
    /// The two connected bodies, `[a, b]`
    bodies: [BodyHandle; 2],

    /// Distance at which the spring exerts no force
    rest_length: f32,

    /// The spring stiffness coefficient (higher values mean stiffer springs)
    stiffness: f32,

    /// The spring damping coefficient, scaling the relative velocity
    damping: f32,

    /// Whether the spring is enabled
    enabled: bool,
}

impl Spring {
    /// Creates a new spring between two distinct bodies.
    ///
    /// Rest length, stiffness and damping must be non-negative and finite.
    pub fn new(
        body_a: BodyHandle,
        body_b: BodyHandle,
        rest_length: f32,
        stiffness: f32,
        damping: f32,
    ) -> Result<Self> {
        if body_a == body_b {
            return Err(PhysicsError::InvalidParameter(format!(
                "spring needs two distinct bodies, got {:?} twice",
                body_a
            )));
        }

        Ok(Self {
            bodies: [body_a, body_b],
            rest_length: non_negative("rest length", rest_length)?,
            stiffness: non_negative("stiffness", stiffness)?,
            damping: non_negative("damping", damping)?,
            enabled: true,
        })
    }

    /// Returns the first body
    pub fn get_body_a(&self) -> BodyHandle {
        self.bodies[0]
    }

    /// Returns the second body
    pub fn get_body_b(&self) -> BodyHandle {
        self.bodies[1]
    }

    /// Returns whether the spring is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sets whether the spring is enabled
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Gets the spring rest length
    pub fn get_rest_length(&self) -> f32 {
        self.rest_length
    }

    /// Sets the spring rest length
    pub fn set_rest_length(&mut self, rest_length: f32) -> Result<()> {
        self.rest_length = non_negative("rest length", rest_length)?;
        Ok(())
    }

    /// Gets the spring stiffness coefficient
    pub fn get_stiffness(&self) -> f32 {
        self.stiffness
    }

    /// Sets the spring stiffness coefficient
    pub fn set_stiffness(&mut self, stiffness: f32) -> Result<()> {
        self.stiffness = non_negative("stiffness", stiffness)?;
        Ok(())
    }

    /// Gets the spring damping coefficient
    pub fn get_damping(&self) -> f32 {
        self.damping
    }

    /// Sets the spring damping coefficient
    pub fn set_damping(&mut self, damping: f32) -> Result<()> {
        self.damping = non_negative("damping", damping)?;
        Ok(())
    }

    /// Current distance between the two bodies
    pub fn current_length(&self, bodies: &BodyStorage<RigidBody>) -> Result<f32> {
        let body_a = bodies.get_body(self.bodies[0])?;
        let body_b = bodies.get_body(self.bodies[1])?;
        Ok(body_a.get_position().distance(&body_b.get_position()))
    }

    /// Force the spring exerts on `body_a`; `body_b` receives the negation.
    ///
    /// Hooke's law along the line from A to B, plus damping against the
    /// relative velocity of the endpoints. Coincident bodies get no
    /// restoring term since there is no direction to push along.
    pub fn force(&self, body_a: &RigidBody, body_b: &RigidBody) -> Vector3 {
        let delta = body_b.get_position() - body_a.get_position();
        let distance = delta.length();

        let mut force = Vector3::zero();

        if distance != 0.0 {
            force += delta / distance * ((distance - self.rest_length) * self.stiffness);
        }

        force -= (body_a.get_velocity() - body_b.get_velocity()) * self.damping;

        force
    }
}

impl Constraint for Spring {
    fn constraint_type(&self) -> &'static str {
        "Spring"
    }

    fn get_bodies(&self) -> &[BodyHandle] {
        &self.bodies
    }

    fn update(&mut self, _dt: f32, bodies: &mut BodyStorage<RigidBody>) {
        if !self.enabled {
            return;
        }

        let (body_a, body_b) = match bodies.get_pair_mut(self.bodies[0], self.bodies[1]) {
            Ok(pair) => pair,
            Err(err) => {
                log::warn!("spring skipped: {}", err);
                return;
            }
        };

        let force = self.force(body_a, body_b);

        body_a.apply_force(force);
        body_b.apply_force(-force);
    }

    fn render_segment(&self, bodies: &BodyStorage<RigidBody>) -> Option<(Vector3, Vector3)> {
        let body_a = bodies.get(self.bodies[0])?;
        let body_b = bodies.get(self.bodies[1])?;
        Some((body_a.get_position(), body_b.get_position()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn non_negative(name: &str, value: f32) -> Result<f32> {
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(PhysicsError::InvalidParameter(format!(
            "spring {} must be non-negative and finite, got {}",
            name, value
        )))
    }
}
