use crate::error::PhysicsError;
use crate::Result;

/// Surface properties used by integration and collision response
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Velocity damping coefficient in [0, 1].
    /// Each step the body receives a force of `-velocity * friction`.
    pub friction: f32,

    /// Coefficient of restitution (bounciness), >= 0.
    /// Averaged with the collision partner's value.
    pub elasticity: f32,
}

impl Material {
    /// Creates a new material, rejecting out-of-range coefficients
    pub fn new(friction: f32, elasticity: f32) -> Result<Self> {
        let material = Self { friction, elasticity };
        material.validate()?;
        Ok(material)
    }

    /// A perfectly elastic material without damping
    pub fn elastic() -> Self {
        Self {
            friction: 0.0,
            elasticity: 1.0,
        }
    }

    /// A dead material that absorbs every collision
    pub fn inelastic() -> Self {
        Self {
            friction: 0.3,
            elasticity: 0.0,
        }
    }

    /// Checks that friction lies in [0, 1] and elasticity is non-negative
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(PhysicsError::InvalidParameter(format!(
                "friction must be in [0, 1], got {}",
                self.friction
            )));
        }

        if !(self.elasticity >= 0.0 && self.elasticity.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "elasticity must be non-negative and finite, got {}",
                self.elasticity
            )));
        }

        Ok(())
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            friction: 0.3,
            elasticity: 1.0,
        }
    }
}
